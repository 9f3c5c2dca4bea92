//! Model ids and fallback selection

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Preferred replacements, best first
pub const FALLBACK_ORDER: [&str; 4] = [
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
    "gemini-1.5-pro-latest",
    "gemini-pro",
];

/// Canonical model id: surrounding whitespace and a `models/` prefix removed
///
/// ```
/// use informe::assistant::fallback::{normalize_model_id, DEFAULT_MODEL};
///
/// assert_eq!(normalize_model_id(" models/gemini-pro "), "gemini-pro");
/// assert_eq!(normalize_model_id(""), DEFAULT_MODEL);
/// ```
pub fn normalize_model_id(model: &str) -> String {
    let trimmed = model.trim();
    let id = trimmed.strip_prefix("models/").unwrap_or(trimmed).trim();
    if id.is_empty() {
        DEFAULT_MODEL.to_string()
    } else {
        id.to_string()
    }
}

/// Pick a replacement model from what the backend reported as available
///
/// The first entry of [`FALLBACK_ORDER`] present in `available` wins; with no
/// match (or nothing reported) the first entry of the order is suggested.
pub fn suggest_fallback_model(available: &[String]) -> String {
    let normalized: Vec<String> = available
        .iter()
        .filter(|model| !model.trim().is_empty())
        .map(|model| normalize_model_id(model))
        .collect();

    FALLBACK_ORDER
        .iter()
        .find(|preferred| normalized.iter().any(|model| model == *preferred))
        .unwrap_or(&FALLBACK_ORDER[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn models(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test_case(&[] => "gemini-1.5-flash-latest"; "nothing reported")]
    #[test_case(&["gemini-pro", "gemini-1.5-flash"] => "gemini-1.5-flash"; "order wins over listing")]
    #[test_case(&["models/gemini-1.5-pro-latest"] => "gemini-1.5-pro-latest"; "prefixed ids match")]
    #[test_case(&["text-bison"] => "gemini-1.5-flash-latest"; "no preferred model listed")]
    fn test_suggest_fallback_model(available: &[&str]) -> String {
        suggest_fallback_model(&models(available))
    }

    #[test]
    fn test_normalize_keeps_plain_ids() {
        assert_eq!(normalize_model_id("gemini-1.5-flash"), "gemini-1.5-flash");
        assert_eq!(normalize_model_id("models/"), DEFAULT_MODEL);
    }
}
