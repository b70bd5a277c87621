//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the exam results front-end.

use std::path::Path;

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::LoggingConfig;
use crate::utils::errors::{ExamResultsError, Result};

/// Initialize logging based on configuration.
///
/// Console output goes to stderr so it does not interleave with the rendered
/// views on stdout. When a log file is configured the returned guard must be
/// held for as long as logs should be flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| ExamResultsError::Config(format!("Invalid log filter: {}", e)))?;

    let console = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(file_path) => {
            let path = Path::new(file_path);
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "exam-results.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| ExamResultsError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed request against the data store
pub fn log_store_request(collection: &str, operation: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            collection = collection,
            operation = operation,
            duration_ms = duration_ms,
            "Store request completed"
        );
    } else {
        error!(
            collection = collection,
            operation = operation,
            duration_ms = duration_ms,
            "Store request failed"
        );
    }
}

/// Log a mutation issued by a view
pub fn log_mutation(collection: &str, operation: &str, id: Option<&str>) {
    info!(
        collection = collection,
        operation = operation,
        id = id,
        "Mutation issued"
    );
}

/// Log a snapshot state change
pub fn log_view_transition(view: &str, from: &str, to: &str) {
    debug!(view = view, from = from, to = to, "Snapshot state changed");
}

/// Log rejected user input
pub fn log_validation_failure(view: &str, message: &str) {
    warn!(view = view, message = message, "Input rejected");
}
