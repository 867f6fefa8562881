//! Tracing setup for the passop binary.
//!
//! `RUST_LOG` wins over the configured level. Passwords are never passed to
//! any log macro in the workspace, so both sinks are safe to keep around.

use passop_core::config::LoggingConfig;
use passop_infrastructure::PassopPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// - stderr layer only when `verbose`, so normal output stays clean
/// - daily-rolling file `passop.log.YYYY-MM-DD` under the logs directory when enabled
///
/// The returned guard must be held until exit to flush the file writer.
pub fn init(config: &LoggingConfig, paths: &PassopPaths, verbose: bool) -> Option<WorkerGuard> {
    let default_level = if verbose {
        "debug"
    } else {
        config.level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let (file_layer, guard) = match file_writer(config, paths) {
        Some((writer, guard)) => (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        ),
        None => (None, None),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }

    guard
}

fn file_writer(
    config: &LoggingConfig,
    paths: &PassopPaths,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file {
        return None;
    }

    let logs_dir = paths.logs_dir().ok()?;
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!(
            "Failed to create log directory {}: {}",
            logs_dir.display(),
            e
        );
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, "passop.log");
    Some(tracing_appender::non_blocking(appender))
}
