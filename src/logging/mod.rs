//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - human-readable console output
//! - optional JSON log files with daily or hourly rotation
//! - log level from the CLI, config file or `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use informe::logging::init_logging;
//! use informe::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::warn!(template = "6", "Unknown template, using defaults");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a template switch and the reconciliation it caused
///
/// # Example
///
/// ```no_run
/// use informe::log_template_change;
/// use informe::domain::TemplateId;
///
/// let from = TemplateId::evolution();
/// let to = TemplateId::new("6").unwrap();
/// log_template_change!(&from, &to, 5, 5);
/// ```
#[macro_export]
macro_rules! log_template_change {
    ($from:expr, $to:expr, $before:expr, $after:expr) => {
        tracing::info!(
            from = %$from,
            to = %$to,
            sections_before = $before,
            sections_after = $after,
            "Template changed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use informe::log_error_with_context;
/// use informe::domain::InformeError;
///
/// let error = InformeError::Format("not valid JSON".to_string());
/// log_error_with_context!(&error, "Rejected import");
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

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use informe::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{InformeError, TemplateId};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let from = TemplateId::evolution();
        let to = TemplateId::new("6").unwrap();
        crate::log_template_change!(&from, &to, 5usize, 5usize);
        crate::log_error_with_context!(&InformeError::Other("x".into()), "ctx");
        crate::log_retry_attempt!(1u32, 2u32, "timeout");
    }
}
