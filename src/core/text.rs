//! Text normalization helpers shared by export, print and the assistant

use regex::Regex;
use std::sync::OnceLock;

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("hard-coded pattern is valid"))
        }
    };
}

cached_regex!(reserved_filename_chars, r#"[\\/:*?"<>|]"#);
cached_regex!(whitespace_run, r"\s+");
cached_regex!(blank_line_run, r"\n{3,}");
cached_regex!(code_fence, r"(?s)```.*?```");
cached_regex!(inline_code, r"`([^`]+)`");
cached_regex!(bold, r"\*\*(.+?)\*\*");
cached_regex!(italic, r"\*(.+?)\*");
cached_regex!(link, r"\[(.+?)\]\((.*?)\)");
cached_regex!(heading, r"#+\s*(.+)");
cached_regex!(bullet, r"[-*]\s+");

/// Remove diacritics from Latin letters (`Evolución` becomes `Evolucion`)
pub fn strip_accents(value: &str) -> String {
    value
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ñ' => 'n',
            'Ñ' => 'N',
            'ç' => 'c',
            'Ç' => 'C',
            'ý' | 'ÿ' => 'y',
            'Ý' => 'Y',
            other => other,
        })
        .collect()
}

/// Replace characters that are reserved in file names and squeeze whitespace
///
/// ```
/// use informe::core::text::sanitize_filename;
///
/// assert_eq!(sanitize_filename(" Epicrisis:  Juan/Pérez "), "Epicrisis- Juan-Pérez");
/// ```
pub fn sanitize_filename(value: &str) -> String {
    let replaced = reserved_filename_chars().replace_all(value, "-");
    whitespace_run()
        .replace_all(&replaced, " ")
        .trim()
        .to_string()
}

/// Collapse three or more consecutive newlines into a single blank line and trim
pub fn collapse_blank_lines(value: &str) -> String {
    blank_line_run()
        .replace_all(value, "\n\n")
        .trim()
        .to_string()
}

/// Strip markdown decoration from an assistant reply before it lands in a section
///
/// Code fences are dropped entirely; emphasis, inline code, links, headings and
/// bullet markers keep only their text.
pub fn markdown_to_plain_text(text: &str) -> String {
    let text = code_fence().replace_all(text, "");
    let text = inline_code().replace_all(&text, "$1");
    let text = bold().replace_all(&text, "$1");
    let text = italic().replace_all(&text, "$1");
    let text = link().replace_all(&text, "$1");
    let text = heading().replace_all(&text, "$1");
    let text = bullet().replace_all(&text, "");
    collapse_blank_lines(&text)
}
