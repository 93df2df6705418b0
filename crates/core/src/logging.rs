use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Directory holding rolling log files, `~/.refscope/logs`.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".refscope/logs")
}

/// Installs the global subscriber: a daily file `<component>.<date>` under
/// [`log_dir`], mirrored to stderr when `to_stderr` is set.
///
/// Lines go through a background worker that the returned guard flushes on
/// drop.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Cannot create log directory {}: {}", dir.display(), e);
    }
    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, component));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    // stdout carries the LSP transport
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}
