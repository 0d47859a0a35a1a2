use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for the rolling JSON log.
const LOG_FILE: &str = "caam-site.log";

/// Initialize the tracing subscriber.
///
/// Human-readable output goes to stderr, filtered by `RUST_LOG` (default
/// `info`). With a log directory, a daily-rotated JSON log is written as
/// well; keep the returned guard alive until exit so it gets flushed.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            // Fall back to stderr-only logging if the directory is unusable
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Could not create log directory {}: {}", dir.display(), e);
                (None, None)
            } else {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(fmt::layer().json().with_writer(writer)), Some(guard))
            }
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}
