//! Logging initialization.

use std::io;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use super::types::LoggerConfig;

/// Builds the filter used by every layer.
///
/// `RUST_LOG` takes precedence over the configured default level.
pub fn env_filter(config: &LoggerConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(config.default_level.into())
        .from_env_lossy()
}

/// Initializes the logging subsystem with the provided config.
///
/// # Panics
///
/// If a global subscriber is already installed.
pub fn init(config: LoggerConfig) {
    try_init(config).expect("init: logging already initialized");
}

/// Like [`init`], but fails instead of panicking when a global subscriber is
/// already installed.
pub fn try_init(config: LoggerConfig) -> Result<(), TryInitError> {
    let filt = env_filter(&config);

    // Logs go to stderr so command output on stdout stays machine readable.
    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_writer(io::stderr)
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(io::stderr)
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    };

    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        service_version = ?config.service_version,
        "logging initialized"
    );
    Ok(())
}
