use review_common::config::AppConfig;
use review_notifier::TelegramNotifier;
use review_watcher::api::PracticumApi;
use review_watcher::logging;
use review_watcher::watcher::Watcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config is read before logging so the log file location can come from it.
    let config = AppConfig::from_env();

    let log_file = config
        .as_ref()
        .map(|c| c.log_file.as_str())
        .unwrap_or("program.log");
    let file = match logging::open_log_file(log_file) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("cannot open log file {log_file}: {e}");
            None
        }
    };
    logging::init_logging(file);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(critical = true, error = %e, "Missing required configuration, exiting");
            return Err(e.into());
        }
    };

    tracing::info!("Homework review relay starting...");

    let api = PracticumApi::new(&config.endpoint, &config.practicum_token, config.http_timeout())?;
    let notifier = TelegramNotifier::new(
        &config.telegram_api_url,
        &config.telegram_token,
        config.http_timeout(),
    )?;
    let mut watcher = Watcher::new(&config, api, notifier);

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = watcher.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
        }
    }

    tracing::info!("Homework review relay stopped.");
    Ok(())
}
