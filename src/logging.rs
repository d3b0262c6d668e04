use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file.
pub const LOG_FILE_ENV: &str = "VWCONFIG_LOG";

/// Initialize tracing.
///
/// Filtering follows `RUST_LOG` (default `warn`). Logs go to stderr, or to
/// the file named by `VWCONFIG_LOG` so stdout and stderr stay clean for
/// scripts consuming the resolved configuration.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(log_path) = std::env::var(LOG_FILE_ENV).ok() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
        return;
    };

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("Warning: Failed to create log file: {}", log_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
