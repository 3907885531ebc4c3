//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - console output on stderr, filtered by the configured level or `RUST_LOG`
//! - optional JSON log files with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use pft_extract::logging::init_logging;
//! use pft_extract::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of processing one input file
///
/// # Example
///
/// ```no_run
/// use pft_extract::log_file_processing;
///
/// log_file_processing!("input/sample.xml", 1, 3);
/// ```
#[macro_export]
macro_rules! log_file_processing {
    ($path:expr, $current:expr, $total:expr) => {
        tracing::info!(
            path = %$path,
            current = $current,
            total = $total,
            "Processing file"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pft_extract::log_error_with_context;
/// use pft_extract::domain::PftError;
///
/// let error = PftError::MissingElement("Subject".to_string());
/// log_error_with_context!(&error, "input/sample.xml");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
