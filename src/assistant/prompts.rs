//! Assistant personas, system prompts and quick actions

use crate::domain::Section;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clinical persona the assistant writes as
///
/// Unknown profile names fall back to [`AssistantProfile::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantProfile {
    #[default]
    General,
    Urgencias,
    Pediatria,
}

impl AssistantProfile {
    /// Lenient conversion from a stored profile name
    pub fn coerce(raw: &str) -> Self {
        match raw.trim() {
            "urgencias" => AssistantProfile::Urgencias,
            "pediatria" => AssistantProfile::Pediatria,
            _ => AssistantProfile::General,
        }
    }

    /// Profile name as stored in preferences
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantProfile::General => "general",
            AssistantProfile::Urgencias => "urgencias",
            AssistantProfile::Pediatria => "pediatria",
        }
    }

    /// Persona instructions sent ahead of every conversation
    pub fn persona(&self) -> &'static str {
        match self {
            AssistantProfile::Urgencias => {
                "Actúa como un médico de urgencias priorizando el reconocimiento de riesgos vitales y acciones inmediatas."
            }
            AssistantProfile::Pediatria => {
                "Actúa como pediatra, cuidando la comunicación empática y ajustando dosis o intervenciones por peso y edad."
            }
            AssistantProfile::General => {
                "Actúa como internista experimentado con enfoque integral y lenguaje técnico claro."
            }
        }
    }
}

impl fmt::Display for AssistantProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "general" => Ok(AssistantProfile::General),
            "urgencias" => Ok(AssistantProfile::Urgencias),
            "pediatria" => Ok(AssistantProfile::Pediatria),
            other => Err(format!(
                "Unknown assistant profile '{other}'. Must be one of: general, urgencias, pediatria"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for AssistantProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| AssistantProfile::coerce(&r)).unwrap_or_default())
    }
}

/// Conversation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantMode {
    /// Free questions about the whole case
    #[default]
    Chat,

    /// Rewrite one target section
    Edit,
}

impl FromStr for AssistantMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(AssistantMode::Chat),
            "edit" => Ok(AssistantMode::Edit),
            other => Err(format!("Unknown assistant mode '{other}'. Must be chat or edit")),
        }
    }
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssistantMode::Chat => "chat",
            AssistantMode::Edit => "edit",
        })
    }
}

/// Canned request offered as a one-click action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub prompt: &'static str,
}

const CHAT_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Resumen caso",
        icon: "📋",
        prompt: "Genera un resumen clínico completo y estructurado del caso actual.",
    },
    QuickAction {
        label: "Análisis crítico",
        icon: "🔍",
        prompt: "Analiza riesgos, brechas diagnósticas y oportunidades de mejora del manejo.",
    },
    QuickAction {
        label: "Diferenciales",
        icon: "🩺",
        prompt: "Proporciona diagnósticos diferenciales priorizados con breve justificación.",
    },
];

const EDIT_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Resumir",
        icon: "✂️",
        prompt: "Resume el texto de la sección manteniendo los datos clínicos esenciales.",
    },
    QuickAction {
        label: "Expandir",
        icon: "📖",
        prompt: "Amplía el texto con mayor detalle técnico sin inventar información.",
    },
    QuickAction {
        label: "Mejorar estilo",
        icon: "✨",
        prompt: "Reescribe con redacción profesional, clara y cohesionada.",
    },
    QuickAction {
        label: "Corregir",
        icon: "🔧",
        prompt: "Corrige ortografía y formato conservando el significado original.",
    },
];

/// Quick actions available in a mode
pub fn quick_actions(mode: AssistantMode) -> &'static [QuickAction] {
    match mode {
        AssistantMode::Chat => CHAT_ACTIONS,
        AssistantMode::Edit => EDIT_ACTIONS,
    }
}

/// Find a quick action by label, ignoring case and accents
pub fn find_quick_action(mode: AssistantMode, label: &str) -> Option<&'static QuickAction> {
    let wanted = crate::core::text::strip_accents(label.trim()).to_lowercase();
    quick_actions(mode)
        .iter()
        .find(|action| crate::core::text::strip_accents(action.label).to_lowercase() == wanted)
}

/// System prompt for a profile and mode
///
/// Edit mode only narrows the prompt when there is a target section.
pub fn system_prompt(
    profile: AssistantProfile,
    mode: AssistantMode,
    section: Option<&Section>,
) -> String {
    let persona = profile.persona();
    match (mode, section) {
        (AssistantMode::Edit, Some(section)) => format!(
            "{persona}\n\nTe enfocas únicamente en editar la sección \"{}\". Usa la solicitud del usuario como guía, respeta los datos entregados y responde con texto listo para reemplazar la sección.",
            section.title
        ),
        _ => format!(
            "{persona}\nOfrece análisis clínico, recomendaciones o documentos apoyándote SIEMPRE en la información proporcionada."
        ),
    }
}

/// User request wrapped with the section it targets
pub fn edit_prompt(section: &Section, request: &str) -> String {
    format!(
        "Sección objetivo: {}\nContenido actual:\n{}\n\nSolicitud: {request}",
        section.title, section.content
    )
}
