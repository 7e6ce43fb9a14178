use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVES: &str = "review_watcher=debug,review_notifier=info";

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &str) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize logging: human-readable lines on stdout and, when a file is
/// given, JSON lines appended to that file.
///
/// `RUST_LOG` overrides the default directives.
pub fn init_logging(log_file: Option<File>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVES.into());

    let file_layer = log_file.map(|file| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .init();
}
