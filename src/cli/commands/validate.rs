//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Informe configuration file.

use crate::config::load_config;
use crate::core::catalog;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as its last step
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is not valid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let template = config.document.template();
        let template_label = catalog::label_for(&template).unwrap_or_default();

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Default Template: {template} ({template_label})");
        println!("  Output Directory: {}", config.document.output_dir);
        println!("  Overwrite: {}", config.document.overwrite);
        println!("  Assistant Endpoint: {}", config.assistant.base_url);
        println!(
            "  Assistant API Key: {}",
            if config.assistant.api_key.is_some() {
                "configured"
            } else {
                "from preferences"
            }
        );
        println!(
            "  Timeout / Retries: {}s / {}",
            config.assistant.timeout_seconds, config.assistant.max_retries
        );
        println!("  Preferences File: {}", config.assistant.preferences_path);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  Log Files: disabled");
        }
        println!();
        Ok(0)
    }
}
