use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing.
///
/// Logs go to stderr by default. Set `FORMWORK_LOG` to a file path to write
/// there instead (ANSI disabled). `RUST_LOG` controls the filter; the
/// default is `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(log_path) = std::env::var("FORMWORK_LOG") {
        let Ok(file) = std::fs::File::create(&log_path) else {
            eprintln!("Warning: Failed to create log file: {}", log_path);
            return;
        };
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
