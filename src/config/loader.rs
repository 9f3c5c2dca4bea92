//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::InformeConfig;
use super::secret::secret_string_opt;
use crate::domain::errors::InformeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into InformeConfig
/// 4. Applies environment variable overrides (INFORME_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use informe::config::loader::load_config;
///
/// let config = load_config("informe.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<InformeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(InformeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        InformeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: InformeConfig = toml::from_str(&contents)
        .map_err(|e| InformeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads the configuration file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases, so a bare
/// `INFORME_ASSISTANT_API_KEY` is enough to use the assistant without a file.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<InformeConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    finish(InformeConfig::default())
}

fn finish(mut config: InformeConfig) -> Result<InformeConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        InformeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported in a
/// single error.
pub(crate) fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(InformeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using INFORME_* prefix
///
/// Environment variables follow the pattern: INFORME_<SECTION>_<KEY>
/// For example: INFORME_DOCUMENT_OUTPUT_DIR, INFORME_ASSISTANT_MAX_RETRIES.
/// Values that do not parse are ignored and the file value stays.
fn apply_env_overrides(config: &mut InformeConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("INFORME_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Document overrides
    if let Ok(val) = std::env::var("INFORME_DOCUMENT_DEFAULT_TEMPLATE") {
        config.document.default_template = val;
    }
    if let Ok(val) = std::env::var("INFORME_DOCUMENT_OUTPUT_DIR") {
        config.document.output_dir = val;
    }
    if let Ok(val) = std::env::var("INFORME_DOCUMENT_OVERWRITE") {
        if let Ok(overwrite) = val.parse() {
            config.document.overwrite = overwrite;
        }
    }

    // Assistant overrides
    if let Ok(val) = std::env::var("INFORME_ASSISTANT_BASE_URL") {
        config.assistant.base_url = val;
    }
    if let Ok(val) = std::env::var("INFORME_ASSISTANT_API_KEY") {
        config.assistant.api_key = secret_string_opt(Some(val));
    }
    if let Ok(val) = std::env::var("INFORME_ASSISTANT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.assistant.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("INFORME_ASSISTANT_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.assistant.max_retries = retries;
        }
    }
    if let Ok(val) = std::env::var("INFORME_ASSISTANT_RETRY_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.assistant.retry_delay_ms = delay;
        }
    }
    if let Ok(val) = std::env::var("INFORME_ASSISTANT_PREFERENCES_PATH") {
        config.assistant.preferences_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("INFORME_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("INFORME_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("INFORME_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("INFORME_TEST_SUBST_VAR", "test_value");
        let input = "api_key = \"${INFORME_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"");
        std::env::remove_var("INFORME_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_reports_all_missing() {
        std::env::remove_var("INFORME_TEST_MISSING_A");
        std::env::remove_var("INFORME_TEST_MISSING_B");
        let input = "a = \"${INFORME_TEST_MISSING_A}\"\nb = \"${INFORME_TEST_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("INFORME_TEST_MISSING_A"));
        assert!(err.contains("INFORME_TEST_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("INFORME_TEST_COMMENTED");
        let input = "# api_key = \"${INFORME_TEST_COMMENTED}\"\nlog_level = \"info\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-informe.toml");
        assert!(matches!(result, Err(InformeError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("nonexistent-informe.toml").unwrap();
        assert_eq!(config.document.output_dir, ".");
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[document]
default_template = "6"
output_dir = "/tmp/informes"

[assistant]
timeout_seconds = 45
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.document.default_template, "6");
        assert_eq!(config.document.output_dir, "/tmp/informes");
        assert_eq!(config.assistant.timeout_seconds, 45);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nlocal_rotation = \"size\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err().to_string();
        assert!(err.contains("local_rotation"));
    }
}
