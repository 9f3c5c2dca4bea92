//! Assistant preferences and their on-disk store
//!
//! Preferences live in a small JSON file shared with other local settings; the
//! assistant owns a single namespaced entry in it, [`PREFERENCES_KEY`], holding
//! the JSON-encoded [`Preferences`]. Storage problems never reach the user: a
//! missing or corrupt entry loads as defaults and a failed save is only logged.

use super::fallback::{normalize_model_id, DEFAULT_MODEL};
use super::prompts::AssistantProfile;
use crate::config::{secret_string_opt, SecretString};
use secrecy::ExposeSecret;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key of the assistant's entry in the preference file
pub const PREFERENCES_KEY: &str = "ai-assistant-preferences";

/// Narrowest allowed panel width
pub const PANEL_WIDTH_MIN: u32 = 320;
/// Widest allowed panel width
pub const PANEL_WIDTH_MAX: u32 = 720;
/// Panel width when none is stored
pub const PANEL_WIDTH_DEFAULT: u32 = 400;

/// Assistant settings remembered between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// API key; blank keys are stored as `""` and loaded as `None`
    #[serde(
        serialize_with = "serialize_api_key",
        deserialize_with = "deserialize_api_key"
    )]
    pub api_key: Option<SecretString>,

    /// Project id for the project-scoped endpoint (empty when unused)
    #[serde(deserialize_with = "lenient_string")]
    pub project_id: String,

    /// Selected model id
    #[serde(deserialize_with = "lenient_string")]
    pub model: String,

    /// Persona
    pub assistant_profile: AssistantProfile,

    /// Show replies with markdown formatting
    #[serde(deserialize_with = "lenient_true")]
    pub allow_markdown: bool,

    /// Switch to a fallback model when the selected one is unavailable
    #[serde(deserialize_with = "lenient_true")]
    pub auto_model: bool,

    /// Settings panel expanded
    #[serde(deserialize_with = "lenient_false")]
    pub show_settings: bool,

    /// Assistant panel width in pixels
    #[serde(deserialize_with = "lenient_width")]
    pub panel_width: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: String::new(),
            model: DEFAULT_MODEL.to_string(),
            assistant_profile: AssistantProfile::General,
            allow_markdown: true,
            auto_model: true,
            show_settings: false,
            panel_width: PANEL_WIDTH_DEFAULT,
        }
    }
}

impl Preferences {
    /// Bring loaded values back into range
    pub fn normalized(mut self) -> Self {
        self.panel_width = clamp_panel_width(self.panel_width);
        self.model = normalize_model_id(&self.model);
        self.project_id = self.project_id.trim().to_string();
        self
    }

    /// Whether a usable API key is set
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_blank())
    }

    /// Replace the API key; setting one collapses the settings panel
    pub fn set_api_key(&mut self, key: &str) {
        self.api_key = secret_string_opt(Some(key.to_string()));
        if self.api_key.is_some() {
            self.show_settings = false;
        }
    }

    /// Select a model; blank selects the default
    pub fn set_model(&mut self, model: &str) {
        self.model = normalize_model_id(model);
    }

    /// Set the project id
    pub fn set_project_id(&mut self, project_id: &str) {
        self.project_id = project_id.trim().to_string();
    }

    /// Resize the panel within the allowed range
    pub fn set_panel_width(&mut self, width: u32) {
        self.panel_width = clamp_panel_width(width);
    }

    /// Expand or collapse the settings panel
    pub fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
    }

    /// Project id when one is set
    pub fn project(&self) -> Option<&str> {
        Some(self.project_id.as_str()).filter(|p| !p.is_empty())
    }
}

/// Clamp into `PANEL_WIDTH_MIN..=PANEL_WIDTH_MAX`; zero means "unset"
pub fn clamp_panel_width(width: u32) -> u32 {
    let width = if width == 0 { PANEL_WIDTH_DEFAULT } else { width };
    width.clamp(PANEL_WIDTH_MIN, PANEL_WIDTH_MAX)
}

fn serialize_api_key<S>(key: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match key {
        Some(key) => serializer.serialize_str(key.expose_secret().as_str()),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_api_key<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(secret_string_opt(value.as_str().map(String::from)))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn lenient_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    // only an explicit `false` turns these off
    let value = Value::deserialize(deserializer)?;
    Ok(value != Value::Bool(false))
}

fn lenient_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    })
}

fn lenient_width<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let width = value
        .as_f64()
        .filter(|w| w.is_finite() && *w > 0.0)
        .map(|w| w.round().min(u32::MAX as f64) as u32)
        .unwrap_or(PANEL_WIDTH_DEFAULT);
    Ok(width)
}

/// JSON file holding namespaced preference entries
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store backed by the file at `path` (created on first save)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the preference file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Option<Map<String, Value>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Could not read preference file");
                return None;
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "Preference file is not a JSON object");
                None
            }
        }
    }

    /// Load preferences, falling back to defaults on any problem
    pub fn load(&self) -> Preferences {
        let Some(entry) = self.read_entries().and_then(|mut map| map.remove(PREFERENCES_KEY)) else {
            tracing::debug!(path = %self.path.display(), "No stored assistant preferences");
            return Preferences::default();
        };

        // the entry is a JSON-encoded string; a bare object is accepted too
        let decoded = match entry {
            Value::String(encoded) => serde_json::from_str::<Preferences>(&encoded),
            other => serde_json::from_value::<Preferences>(other),
        };

        match decoded {
            Ok(preferences) => preferences.normalized(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored assistant preferences are corrupt, using defaults");
                Preferences::default()
            }
        }
    }

    /// Persist preferences; failures are logged, never returned
    ///
    /// Other entries of the file are kept.
    pub fn save(&self, preferences: &Preferences) {
        if let Err(e) = self.try_save(preferences) {
            tracing::warn!(path = %self.path.display(), error = %e, "Could not save assistant preferences");
        }
    }

    fn try_save(&self, preferences: &Preferences) -> crate::domain::Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(
            PREFERENCES_KEY.to_string(),
            Value::String(serde_json::to_string(preferences)?),
        );

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(entries))?)?;
        tracing::debug!(path = %self.path.display(), "Assistant preferences saved");
        Ok(())
    }
}
