use std::path::Path;
use std::sync::Once;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` isn't set
pub const DEFAULT_FILTER: &str = "segundo=info,copista=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log file path: {0}")]
    InvalidPath(String),

    #[error("Failed to create log directory: {0}")]
    CreateDirectory(#[from] std::io::Error),

    #[error("A global logger is already installed")]
    AlreadyInstalled,
}

/// Install the global subscriber, writing to `log_file`
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout/stderr. Keep the returned
/// guard alive for as long as the app runs, dropping it flushes the writer.
pub fn init(log_file: &Path) -> Result<WorkerGuard, LoggingError> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_file.display().to_string()))?;
    let directory = log_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    install_panic_hook();

    Ok(guard)
}

/// Log panics before the default hook prints them
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(%info, "panic");
            default_hook(info);
        }));
    });
}
