//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "lineage=info";

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to [`DEFAULT_FILTER`]. Logs go to stderr so stdout stays free
/// for command output. Subsequent calls are silently ignored.
pub fn init_logging() {
    init_logging_with(None);
}

/// Like [`init_logging`], with an explicit filter taking precedence over
/// `RUST_LOG`.
pub fn init_logging_with(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
