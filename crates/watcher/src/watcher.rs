use std::time::Duration;

use chrono::Utc;

use review_common::config::AppConfig;
use review_common::types::PollState;
use review_notifier::Messenger;

use crate::api::HomeworkApi;
use crate::cycle::run_cycle;

/// Repeats poll cycles forever, reporting every failure to the log and the chat.
pub struct Watcher<A, M> {
    api: A,
    messenger: M,
    chat_id: String,
    interval: Duration,
    state: PollState,
}

impl<A: HomeworkApi, M: Messenger> Watcher<A, M> {
    pub fn new(config: &AppConfig, api: A, messenger: M) -> Self {
        Self {
            api,
            messenger,
            chat_id: config.telegram_chat_id.clone(),
            interval: config.retry_interval(),
            state: PollState::new(config.initial_from_date),
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Start the polling loop. Runs indefinitely until the task is cancelled.
    pub async fn run(&mut self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            from_date = self.state.watermark_timestamp,
            "Homework watcher started"
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Run one cycle. Any failure is logged and reported to the chat; the
    /// state is kept as it was.
    pub async fn tick(&mut self) {
        let state = self.state.clone();
        let now = || Utc::now().timestamp();

        match run_cycle(&self.api, &self.messenger, &self.chat_id, state, now).await {
            Ok(state) => self.state = state,
            Err(e) => {
                let message = format!("Сбой в работе программы: {e}");
                tracing::error!(error = %e, "{message}");

                if let Err(send_err) = self.messenger.send(&self.chat_id, &message).await {
                    tracing::error!(error = %send_err, "Failed to report failure to chat");
                }
            }
        }
    }
}
