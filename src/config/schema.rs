//! Configuration schema types
//!
//! This module defines the configuration structure for Informe. Every section
//! is optional in the TOML file; missing keys take the defaults below.

use crate::config::SecretString;
use crate::core::catalog;
use crate::domain::TemplateId;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main Informe configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InformeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Document defaults and file output
    #[serde(default)]
    pub document: DocumentConfig,

    /// Writing assistant backend
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl InformeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.document.validate()?;
        self.assistant.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Document defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Template used by `informe new` when none is given
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Directory that receives exported documents
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Replace an existing file with the same export name
    #[serde(default)]
    pub overwrite: bool,
}

impl DocumentConfig {
    fn validate(&self) -> Result<(), String> {
        let template = TemplateId::new(self.default_template.clone())
            .map_err(|e| format!("Invalid document.default_template: {e}"))?;
        if !catalog::is_known(&template) {
            let known: Vec<String> = catalog::templates()
                .into_iter()
                .map(|t| t.id.into_inner())
                .collect();
            return Err(format!(
                "Unknown document.default_template '{}'. Must be one of: {}",
                self.default_template,
                known.join(", ")
            ));
        }

        if self.output_dir.trim().is_empty() {
            return Err("document.output_dir cannot be empty".to_string());
        }

        Ok(())
    }

    /// The configured default template, falling back to the evolution note
    pub fn template(&self) -> TemplateId {
        TemplateId::new(self.default_template.clone()).unwrap_or_else(|_| TemplateId::evolution())
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            output_dir: default_output_dir(),
            overwrite: false,
        }
    }
}

/// Writing assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Generative Language API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; takes precedence over the key saved in preferences
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Extra attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// File holding the persisted assistant preferences
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,
}

impl AssistantConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid assistant.base_url '{}': {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "assistant.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err("assistant.timeout_seconds must be between 1 and 300".to_string());
        }

        if self.max_retries > 10 {
            return Err("assistant.max_retries must be <= 10".to_string());
        }

        if self.preferences_path.trim().is_empty() {
            return Err("assistant.preferences_path cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            preferences_path: default_preferences_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_template() -> String {
    TemplateId::EVOLUTION.to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_preferences_path() -> String {
    "informe-preferences.json".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config_is_valid() {
        let config = InformeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.document.default_template, "2");
        assert_eq!(config.assistant.max_retries, 1);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_document_config_rejects_unknown_template() {
        let mut config = DocumentConfig::default();
        config.default_template = "9".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Unknown document.default_template"));

        config.default_template = "  ".to_string();
        assert!(config.validate().is_err());

        config.default_template = "4".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.template().as_str(), "4");
    }

    #[test]
    fn test_document_config_rejects_empty_output_dir() {
        let config = DocumentConfig {
            output_dir: String::new(),
            ..DocumentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_assistant_config_validation() {
        let mut config = AssistantConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = default_base_url();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.timeout_seconds = 30;
        config.max_retries = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_assistant_api_key_not_serialized() {
        let config = AssistantConfig {
            api_key: Some(secret_string("AIza-hidden".to_string())),
            ..AssistantConfig::default()
        };
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("AIza-hidden"));
        assert_eq!(
            config.api_key.as_ref().unwrap().expose_secret().as_str(),
            "AIza-hidden"
        );
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: InformeConfig = toml::from_str(
            r#"
[document]
default_template = "5"

[assistant]
max_retries = 3
"#,
        )
        .unwrap();

        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.document.default_template, "5");
        assert_eq!(config.document.output_dir, ".");
        assert_eq!(config.assistant.max_retries, 3);
        assert_eq!(config.assistant.timeout_seconds, 30);
        assert!(config.assistant.api_key.is_none());
        assert_eq!(config.logging.local_rotation, "daily");
    }
}
