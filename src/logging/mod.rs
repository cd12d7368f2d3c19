//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ferry::logging::init_logging;
//! use ferry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a conversion
///
/// # Example
///
/// ```no_run
/// use ferry::log_conversion_start;
///
/// log_conversion_start!("adt.hl7", 1024);
/// ```
#[macro_export]
macro_rules! log_conversion_start {
    ($source:expr, $bytes:expr) => {
        tracing::info!(
            source = %$source,
            bytes = $bytes,
            "Starting conversion"
        );
    };
}

/// Log the completion of a conversion
///
/// # Example
///
/// ```no_run
/// use ferry::log_conversion_complete;
/// use std::time::Duration;
///
/// log_conversion_complete!(12, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_conversion_complete {
    ($entries:expr, $duration:expr) => {
        tracing::info!(
            entries = $entries,
            duration_ms = $duration.as_millis(),
            "Conversion completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ferry::log_error_with_context;
/// use ferry::domain::FerryError;
///
/// let error = FerryError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
