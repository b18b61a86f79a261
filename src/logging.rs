use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Installs the global tracing subscriber: human-readable stdout output,
/// plus daily-rotated JSON files under `config.log_dir` when
/// `ENABLE_FILE_LOGS` is set.
///
/// Safe to call more than once; later calls leave the installed subscriber
/// in place (the test harness initializes per-binary).
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let file_layer = config.enable_file_logs.then(|| {
        let appender = tracing_appender::rolling::daily(&config.log_dir, "skyvocab.log");
        fmt::layer().with_writer(appender).with_ansi(false).json()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init();
}
