//! Section reconciliation
//!
//! When the template changes, the new template's skeleton decides the *shape* of the
//! section list while the user's titles and text are kept. Sections carry no key,
//! so the correspondence between old and new sections is purely positional: if the
//! user reorders sections before switching templates, content follows the position,
//! not the heading.

use crate::domain::Section;

/// Title given to sections appended during hydration without a title of their own
pub const CUSTOM_SECTION_TITLE: &str = "Sección personalizada";

/// Merge a template skeleton with the sections the user currently has
///
/// - No previous sections: the result is a copy of the skeleton.
/// - Within the skeleton length, each position keeps the previous trimmed title
///   (or the skeleton's title when the previous one is blank) and the previous
///   content (or empty content when there is no previous section there).
/// - Previous sections beyond the skeleton length are appended unchanged.
///
/// ```
/// use informe::core::reconcile::merge_sections_with_content;
/// use informe::domain::Section;
///
/// let skeleton = vec![Section::titled("Antecedentes"), Section::titled("Plan")];
/// let previous = vec![Section::new("", "hist"), Section::new("Seguimiento", "ok")];
///
/// let merged = merge_sections_with_content(&skeleton, &previous);
/// assert_eq!(merged[0], Section::new("Antecedentes", "hist"));
/// assert_eq!(merged[1], Section::new("Seguimiento", "ok"));
/// ```
pub fn merge_sections_with_content(skeleton: &[Section], previous: &[Section]) -> Vec<Section> {
    if previous.is_empty() {
        return skeleton.to_vec();
    }

    let mut merged: Vec<Section> = skeleton
        .iter()
        .enumerate()
        .map(|(index, base)| match previous.get(index) {
            Some(prior) => {
                let title = prior.title.trim();
                Section {
                    title: if title.is_empty() {
                        base.title.clone()
                    } else {
                        title.to_string()
                    },
                    content: prior.content.clone(),
                }
            }
            None => base.clone(),
        })
        .collect();

    if previous.len() > skeleton.len() {
        merged.extend_from_slice(&previous[skeleton.len()..]);
    }

    merged
}

/// Write incoming sections over existing ones in place
///
/// An existing section at the same position takes the incoming content, and the
/// incoming title only when it is not blank. Incoming sections past the end are
/// appended, titled [`CUSTOM_SECTION_TITLE`] when blank. An empty `incoming`
/// leaves `existing` untouched.
pub fn hydrate_sections(existing: &mut Vec<Section>, incoming: &[Section]) {
    for (index, section) in incoming.iter().enumerate() {
        let title = section.title.trim();
        match existing.get_mut(index) {
            Some(target) => {
                if !title.is_empty() {
                    target.title = title.to_string();
                }
                target.content = section.content.clone();
            }
            None => existing.push(Section {
                title: if title.is_empty() {
                    CUSTOM_SECTION_TITLE.to_string()
                } else {
                    title.to_string()
                },
                content: section.content.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeleton(titles: &[&str]) -> Vec<Section> {
        titles.iter().map(|t| Section::titled(*t)).collect()
    }

    #[test]
    fn test_empty_previous_yields_skeleton() {
        let base = skeleton(&["Antecedentes", "Plan"]);
        assert_eq!(merge_sections_with_content(&base, &[]), base);
    }

    #[test]
    fn test_blank_and_whitespace_titles_fall_back() {
        let base = skeleton(&["Antecedentes", "Plan"]);
        let previous = vec![Section::new("", "a"), Section::new("   ", "b")];
        let merged = merge_sections_with_content(&base, &previous);
        assert_eq!(merged[0].title, "Antecedentes");
        assert_eq!(merged[1].title, "Plan");
        assert_eq!(merged[1].content, "b");
    }

    #[test]
    fn test_user_titles_are_trimmed() {
        let base = skeleton(&["Antecedentes"]);
        let previous = vec![Section::new("  Alergias \n", "none")];
        let merged = merge_sections_with_content(&base, &previous);
        assert_eq!(merged[0].title, "Alergias");
    }

    #[test]
    fn test_shorter_previous_keeps_skeleton_tail() {
        let base = skeleton(&["A", "B", "C"]);
        let previous = vec![Section::new("", "only first")];
        let merged = merge_sections_with_content(&base, &previous);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], Section::new("A", "only first"));
        assert_eq!(merged[1], Section::titled("B"));
        assert_eq!(merged[2], Section::titled("C"));
    }

    #[test]
    fn test_overflow_is_appended_unchanged() {
        let base = skeleton(&["A", "B"]);
        let previous = vec![
            Section::new("", "1"),
            Section::new("", "2"),
            Section::new("  Extra  ", "x"),
        ];
        let merged = merge_sections_with_content(&base, &previous);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2], Section::new("  Extra  ", "x"));
    }

    #[test]
    fn test_empty_skeleton_keeps_only_previous() {
        let previous = vec![Section::new("Nota", "texto")];
        assert_eq!(merge_sections_with_content(&[], &previous), previous);
        assert!(merge_sections_with_content(&[], &[]).is_empty());
    }

    #[test]
    fn test_hydrate_updates_in_place_and_appends() {
        let mut existing = skeleton(&["Antecedentes", "Plan"]);
        let incoming = vec![
            Section::new("", "hta"),
            Section::new("Indicaciones", "reposo"),
            Section::new(" ", "extra"),
        ];
        hydrate_sections(&mut existing, &incoming);
        assert_eq!(existing[0], Section::new("Antecedentes", "hta"));
        assert_eq!(existing[1], Section::new("Indicaciones", "reposo"));
        assert_eq!(existing[2], Section::new(CUSTOM_SECTION_TITLE, "extra"));
    }

    #[test]
    fn test_hydrate_with_nothing_is_noop() {
        let mut existing = skeleton(&["A"]);
        hydrate_sections(&mut existing, &[]);
        assert_eq!(existing, skeleton(&["A"]));
    }
}
