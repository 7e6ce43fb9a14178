//! One poll pass: fetch → validate → format → diff → notify.

use review_common::error::AppError;
use review_common::types::PollState;
use review_notifier::Messenger;

use crate::api::{HomeworkApi, fetch_statuses};
use crate::formatter::parse_status;
use crate::validator::check_response;

/// Run a single poll cycle and return the (possibly updated) state.
///
/// `now` reads the current unix time. It replaces a zero watermark in the
/// request and, read again after a successful send, becomes the new watermark.
///
/// Fetch and shape failures are returned untouched for the caller to report.
/// A failed delivery is only logged: the state is returned unchanged so the
/// same text is sent again on the next cycle.
pub async fn run_cycle(
    api: &impl HomeworkApi,
    messenger: &impl Messenger,
    chat_id: &str,
    state: PollState,
    now: impl Fn() -> i64,
) -> Result<PollState, AppError> {
    let from_date = if state.watermark_timestamp == 0 {
        now()
    } else {
        state.watermark_timestamp
    };

    let response = fetch_statuses(api, from_date).await?;
    let homework = check_response(&response)?;
    let text = parse_status(homework)?;

    if state.last_notified_status.as_deref() == Some(text.as_str()) {
        tracing::debug!("Homework status unchanged");
        return Ok(state);
    }

    if let Err(e) = messenger.send(chat_id, &text).await {
        tracing::error!(error = %e, "Failed to deliver status update");
        return Ok(state);
    }

    // The very first delivery keeps the initial watermark; later ones never move it back.
    let watermark_timestamp = if state.last_notified_status.is_some() {
        now().max(state.watermark_timestamp)
    } else {
        state.watermark_timestamp
    };

    tracing::info!(watermark = watermark_timestamp, "Status update delivered");

    Ok(PollState {
        last_notified_status: Some(text),
        watermark_timestamp,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use review_common::types::RawResponse;

    use super::*;

    const T0: i64 = 1_630_000_000;
    const NOW: i64 = 1_700_000_000;

    /// Serves the same status for every request and records `from_date`.
    struct FixedApi {
        status: u16,
        body: String,
        requested: Mutex<Vec<i64>>,
    }

    impl FixedApi {
        fn homework(status: &str) -> Self {
            Self::raw(
                200,
                json!({
                    "homeworks": [{"homework_name": "hw05", "status": status}],
                    "current_date": NOW
                })
                .to_string(),
            )
        }

        fn raw(status: u16, body: String) -> Self {
            Self {
                status,
                body,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl HomeworkApi for FixedApi {
        async fn get_statuses(&self, from_date: i64) -> Result<RawResponse, AppError> {
            self.requested.lock().unwrap().push(from_date);
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl Messenger for RecordingMessenger {
        async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::Messenger("chat not found".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_first_notification_keeps_watermark() {
        let api = FixedApi::homework("reviewing");
        let messenger = RecordingMessenger::default();

        let state = run_cycle(&api, &messenger, "42", PollState::new(T0), || NOW)
            .await
            .unwrap();

        assert_eq!(state.watermark_timestamp, T0);
        assert_eq!(
            state.last_notified_status.as_deref(),
            Some("Изменился статус проверки работы \"hw05\". Работа взята на проверку ревьюером.")
        );
        assert_eq!(*api.requested.lock().unwrap(), vec![T0]);
        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "42");
    }

    #[tokio::test]
    async fn test_second_distinct_notification_advances_watermark() {
        let messenger = RecordingMessenger::default();

        let api = FixedApi::homework("reviewing");
        let state = run_cycle(&api, &messenger, "42", PollState::new(T0), || NOW)
            .await
            .unwrap();
        let api = FixedApi::homework("approved");
        let state = run_cycle(&api, &messenger, "42", state, || NOW + 600)
            .await
            .unwrap();

        assert_eq!(state.watermark_timestamp, NOW + 600);
        assert!(state.last_notified_status.unwrap().ends_with("Ура!"));
        assert_eq!(messenger.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_watermark_never_moves_back() {
        let messenger = RecordingMessenger::default();
        let mut state = PollState {
            last_notified_status: Some("old".into()),
            watermark_timestamp: 100,
        };

        let mut seen = Vec::new();
        for (status, now) in [("reviewing", 50), ("approved", 500), ("rejected", 200)] {
            let api = FixedApi::homework(status);
            state = run_cycle(&api, &messenger, "42", state, || now).await.unwrap();
            seen.push(state.watermark_timestamp);
        }

        assert_eq!(seen, vec![100, 500, 500]);
        assert_eq!(messenger.sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_watermark_read_after_delivery() {
        let api = FixedApi::homework("approved");
        let messenger = RecordingMessenger::default();
        let start = PollState {
            last_notified_status: Some("old".into()),
            watermark_timestamp: T0,
        };
        let calls = Mutex::new(0);

        let state = run_cycle(&api, &messenger, "42", start, || {
            let mut calls = calls.lock().unwrap();
            *calls += 1;
            assert_eq!(messenger.sent.lock().unwrap().len(), 1, "clock read before send");
            NOW
        })
        .await
        .unwrap();

        assert_eq!(state.watermark_timestamp, NOW);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unchanged_status_is_noop() {
        let api = FixedApi::homework("rejected");
        let messenger = RecordingMessenger::default();

        let first = run_cycle(&api, &messenger, "42", PollState::new(T0), || NOW)
            .await
            .unwrap();
        let second = run_cycle(&api, &messenger, "42", first.clone(), || NOW + 600)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(messenger.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delivery_leaves_state() {
        let messenger = RecordingMessenger {
            fail: true,
            ..Default::default()
        };
        let start = PollState {
            last_notified_status: Some("old".into()),
            watermark_timestamp: T0,
        };

        let api = FixedApi::homework("approved");
        let state = run_cycle(&api, &messenger, "42", start.clone(), || NOW)
            .await
            .unwrap();

        assert_eq!(state, start);
    }

    #[tokio::test]
    async fn test_api_status_error_propagates() {
        let api = FixedApi::raw(500, "Internal Server Error".into());
        let messenger = RecordingMessenger::default();

        let err = run_cycle(&api, &messenger, "42", PollState::new(T0), || NOW)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ApiStatus(500)));
        assert!(messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_homeworks_is_shape_error() {
        let api = FixedApi::raw(200, json!({"homeworks": [], "current_date": NOW}).to_string());
        let messenger = RecordingMessenger::default();

        let err = run_cycle(&api, &messenger, "42", PollState::new(T0), || NOW)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Shape(_)));
    }

    #[tokio::test]
    async fn test_zero_watermark_requests_from_now() {
        let api = FixedApi::homework("reviewing");
        let messenger = RecordingMessenger::default();

        let state = run_cycle(&api, &messenger, "42", PollState::new(0), || NOW)
            .await
            .unwrap();

        assert_eq!(*api.requested.lock().unwrap(), vec![NOW]);
        assert_eq!(state.watermark_timestamp, 0);
    }
}
