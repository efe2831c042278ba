use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::prelude::*;

use crate::config;

/// Installs the global subscriber.
///
/// Progress is written to stderr; if $SDK_CATALOG_LOG_FILE is set, every event
/// is also appended to that file as JSON. The returned guard flushes stderr
/// output on drop and must be held until the job finishes.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let (stderr, guard) = tracing_appender::non_blocking(std::io::stderr());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(stderr)
        .with_target(false)
        .without_time();

    let json_layer = match config::log_file() {
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).inspect_err(|e| {
                    eprintln!("Failed to create log directory {:?}: {}", parent, e);
                })?;
            }
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .inspect_err(|e| {
                    eprintln!("Failed to open log file {:?}: {}", log_path, e);
                })?;

            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(log_file)
                    .fmt_fields(JsonFields::default()),
            )
        }
        None => None,
    };

    // Use RUST_LOG if set, otherwise default to INFO
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
