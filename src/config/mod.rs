//! Configuration management for Informe.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Informe uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `INFORME_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use informe::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("informe.toml")?;
//!
//! println!("Default template: {}", config.document.default_template);
//! println!("Assistant endpoint: {}", config.assistant.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`DocumentConfig`] - Default template and export directory
//! - [`AssistantConfig`] - Generative Language API endpoint, retries, preference file
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [document]
//! default_template = "2"
//! output_dir = "./informes"
//!
//! [assistant]
//! api_key = "${GEMINI_API_KEY}"
//! max_retries = 1
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, AssistantConfig, DocumentConfig, InformeConfig, LoggingConfig};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
