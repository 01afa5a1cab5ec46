//! Tracing/logging initialization for the CLI.

use crate::constants;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Reads `STRATA_LOG_FORMAT`; `Err` carries the unrecognized value
    fn parse(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::to_lowercase).as_deref() {
            None | Some("text") => Ok(Self::Text),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(other.to_string()),
        }
    }
}

/// Filter directive for a `-v` count, falling back to `STRATA_LOG`
fn level_for(verbosity: u8) -> String {
    match verbosity {
        0 => std::env::var(constants::ENV_STRATA_LOG).unwrap_or_else(|_| "warn".to_string()),
        1 => "strata=debug".to_string(),
        _ => "strata=trace".to_string(),
    }
}

/// Appends to `path` when given and openable, otherwise stderr
fn log_writer(path: Option<String>) -> BoxMakeWriter {
    let Some(path) = path else {
        return BoxMakeWriter::new(std::io::stderr);
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!("Warning: Could not open log file '{path}': {e}. Using stderr.");
            BoxMakeWriter::new(std::io::stderr)
        }
    }
}

/// Initialize tracing-subscriber for build diagnostics.
pub fn init_tracing(verbosity: u8) {
    let env_filter = EnvFilter::try_new(level_for(verbosity)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let format = LogFormat::parse(std::env::var(constants::ENV_STRATA_LOG_FORMAT).ok().as_deref())
        .unwrap_or_else(|unknown| {
            // Tracing is not yet initialized; eprintln! is the only output channel available.
            eprintln!(
                "Warning: Unrecognized {} '{unknown}'. Valid values: 'json', 'text'. Using 'text'.",
                constants::ENV_STRATA_LOG_FORMAT
            );
            LogFormat::Text
        });
    let writer = log_writer(std::env::var(constants::ENV_STRATA_LOG_FILE).ok());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_span_list(false)
                    .with_thread_names(true)
                    .with_writer(writer),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_thread_names(true)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .init(),
    }
}
