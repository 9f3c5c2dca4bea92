//! Prefs command implementation
//!
//! Shows or updates the stored assistant preferences. Without options it only
//! prints them; the API key is never echoed.

use super::load_config_or_report;
use crate::assistant::prompts::quick_actions;
use crate::assistant::{AssistantMode, AssistantProfile, PreferenceStore, Preferences};
use clap::Args;

/// Arguments for the prefs command
#[derive(Args, Debug, Default)]
pub struct PrefsArgs {
    /// Store an API key
    #[arg(long, conflicts_with = "clear_api_key")]
    pub api_key: Option<String>,

    /// Remove the stored API key
    #[arg(long)]
    pub clear_api_key: bool,

    /// Model id (blank selects the default)
    #[arg(long)]
    pub model: Option<String>,

    /// Project id for the project-scoped endpoint (blank clears it)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Persona: general, urgencias or pediatria
    #[arg(long)]
    pub profile: Option<AssistantProfile>,

    /// Show replies with markdown formatting
    #[arg(long)]
    pub allow_markdown: Option<bool>,

    /// Switch to a fallback model when the selected one is unavailable
    #[arg(long)]
    pub auto_model: Option<bool>,

    /// Assistant panel width in pixels (clamped)
    #[arg(long)]
    pub panel_width: Option<u32>,

    /// Also list the quick actions of both modes
    #[arg(long)]
    pub actions: bool,
}

impl PrefsArgs {
    /// Execute the prefs command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_config_or_report(config_path) else {
            return Ok(2);
        };

        let store = PreferenceStore::new(&config.assistant.preferences_path);
        let mut preferences = store.load();

        if self.update(&mut preferences) {
            store.save(&preferences);
            println!("✅ Preferences saved to {}", store.path().display());
            println!();
        }

        println!("🤖 Assistant preferences");
        print!("{}", describe(&preferences, config.assistant.api_key.is_some()));

        if self.actions {
            for mode in [AssistantMode::Chat, AssistantMode::Edit] {
                println!();
                println!("⚡ Quick actions ({mode} mode)");
                for action in quick_actions(mode) {
                    println!("  {} {}", action.icon, action.label);
                }
            }
        }
        Ok(0)
    }

    /// Apply the requested changes; returns whether anything was requested
    fn update(&self, preferences: &mut Preferences) -> bool {
        let mut changed = false;

        if let Some(key) = &self.api_key {
            preferences.set_api_key(key);
            changed = true;
        }
        if self.clear_api_key {
            preferences.api_key = None;
            changed = true;
        }
        if let Some(model) = &self.model {
            preferences.set_model(model);
            changed = true;
        }
        if let Some(project_id) = &self.project_id {
            preferences.set_project_id(project_id);
            changed = true;
        }
        if let Some(profile) = self.profile {
            preferences.assistant_profile = profile;
            changed = true;
        }
        if let Some(allow) = self.allow_markdown {
            preferences.allow_markdown = allow;
            changed = true;
        }
        if let Some(auto) = self.auto_model {
            preferences.auto_model = auto;
            changed = true;
        }
        if let Some(width) = self.panel_width {
            preferences.set_panel_width(width);
            changed = true;
        }

        changed
    }
}

fn describe(preferences: &Preferences, config_key: bool) -> String {
    let key_state = match (config_key, preferences.has_api_key()) {
        (true, _) => "from configuration",
        (false, true) => "stored",
        (false, false) => "not set",
    };
    let project = preferences.project().unwrap_or("—");

    [
        format!("  API key: {key_state}"),
        format!("  Model: {}", preferences.model),
        format!("  Project: {project}"),
        format!("  Profile: {}", preferences.assistant_profile),
        format!("  Markdown: {}", preferences.allow_markdown),
        format!("  Auto model: {}", preferences.auto_model),
        format!("  Panel width: {}", preferences.panel_width),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}
