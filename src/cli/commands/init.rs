//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "informe.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Informe configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Put your Gemini key in a .env file:");
                println!("     GEMINI_API_KEY=...");
                println!("  3. Validate configuration: informe validate-config");
                println!("  4. Create a document: informe new --patient \"Nombre Apellido\"");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Informe Configuration File

[application]
log_level = "info"

[document]
default_template = "2"
output_dir = "."

[assistant]
# api_key = "${GEMINI_API_KEY}"
preferences_path = "informe-preferences.json"
"#
        .to_string()
    }

    /// Generate configuration with all options documented
    fn generate_config_with_examples() -> String {
        r#"# Informe Configuration File
# Clinical report editor with a Gemini writing assistant
#
# Values can reference environment variables with ${VAR_NAME}; a .env file in
# the working directory is loaded at startup. Any key can also be overridden
# with INFORME_<SECTION>_<KEY>, e.g. INFORME_DOCUMENT_OUTPUT_DIR.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[document]
# Template for `informe new` when --template is not given
#   1 Informe médico de traslado
#   2 Evolución médica (default)
#   3 Epicrisis médica
#   4 Epicrisis médica de traslado
#   5 Registro clínico - título libre
#   6 Informe médico
default_template = "2"

# Directory where new documents are written
output_dir = "./informes"

# Replace a file that already has the same name
overwrite = false

[assistant]
# Generative Language API endpoint
base_url = "https://generativelanguage.googleapis.com/v1beta"

# API key; takes precedence over the key stored with `informe prefs --api-key`
# api_key = "${GEMINI_API_KEY}"

# Request timeout in seconds
timeout_seconds = 30

# Extra attempts for timeouts, connection errors and 5xx-style failures
max_retries = 1
retry_delay_ms = 500

# Where model, profile and other assistant preferences are kept
preferences_path = "informe-preferences.json"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"

# Log rotation: daily or hourly
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InformeConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: InformeConfig = toml::from_str(&content).unwrap();
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# Informe Configuration File"));
        assert!(config.contains("[assistant]"));
        assert!(config.contains("local_rotation"));
    }

    #[tokio::test]
    async fn test_init_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("informe.toml").to_string_lossy().to_string();
        let args = InitArgs {
            output: output.clone(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert_eq!(args.execute().await.unwrap(), 2);

        let forced = InitArgs {
            output,
            with_examples: true,
            force: true,
        };
        assert_eq!(forced.execute().await.unwrap(), 0);
    }
}
