//! Document editor state
//!
//! [`DocumentEditor`] holds one report being edited: the active template, the
//! displayed title, the patient rows, the clinical sections and the physician
//! metadata. Every method corresponds to one user event and runs to completion.
//!
//! The snapshot contract lives here too: [`DocumentEditor::snapshot`] captures the
//! full editable state and [`DocumentEditor::apply`] restores it from a sanitized
//! import. Neither can fail.

use super::container::{Container, MemoryContainer};
use crate::core::catalog::{
    self, FIELD_AGE, FIELD_BIRTH_DATE, FIELD_NAME, FIELD_REPORT_DATE,
};
use crate::core::dates;
use crate::core::reconcile::{self, CUSTOM_SECTION_TITLE};
use crate::domain::{
    DocumentSnapshot, FieldType, ImportedTitle, InformeError, PatientField, Result, Section,
    SnapshotPatch, TemplateId, SNAPSHOT_VERSION,
};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Label given to rows added by the user
pub const NEW_FIELD_LABEL: &str = "Nuevo campo";

fn auto_title_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Evolución médica \(").expect("hard-coded pattern is valid"))
}

/// One report being edited
///
/// # Example
///
/// ```
/// use informe::core::document::DocumentEditor;
/// use informe::domain::TemplateId;
///
/// let mut editor = DocumentEditor::new();
/// editor.set_section_content(0, "HTA en tratamiento").unwrap();
/// editor.change_template(TemplateId::new("6").unwrap());
///
/// let snapshot = editor.snapshot();
/// assert_eq!(snapshot.sections.len(), 5); // user sections survive a shrink
/// assert_eq!(snapshot.sections[0].content, "HTA en tratamiento");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentEditor<P = MemoryContainer<PatientField>, S = MemoryContainer<Section>> {
    template: TemplateId,
    title: String,
    patients: P,
    sections: S,
    medico: String,
    especialidad: String,
    clock: fn() -> NaiveDate,
}

impl DocumentEditor {
    /// A fresh editor in its restored-defaults state
    pub fn new() -> Self {
        Self::with_containers(MemoryContainer::default(), MemoryContainer::default())
    }
}

impl Default for DocumentEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S> DocumentEditor<P, S>
where
    P: Container<PatientField>,
    S: Container<Section>,
{
    /// Build an editor over caller-provided containers, then restore defaults
    pub fn with_containers(patients: P, sections: S) -> Self {
        let mut editor = Self {
            template: TemplateId::evolution(),
            title: String::new(),
            patients,
            sections,
            medico: String::new(),
            especialidad: String::new(),
            clock: dates::today,
        };
        editor.restore_all();
        editor
    }

    /// Replace the source of "today" used when the report date is missing
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self.update_age();
        self
    }

    /// Active template
    pub fn template(&self) -> &TemplateId {
        &self.template
    }

    /// Displayed title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Treating physician
    pub fn medico(&self) -> &str {
        &self.medico
    }

    /// Physician specialty
    pub fn especialidad(&self) -> &str {
        &self.especialidad
    }

    /// Patient rows as held
    pub fn patient_fields(&self) -> &[PatientField] {
        self.patients.items()
    }

    /// Sections as held
    pub fn sections(&self) -> &[Section] {
        self.sections.items()
    }

    /// Value of the report-date row, empty when absent
    pub fn report_date(&self) -> String {
        self.field_value(FIELD_REPORT_DATE).unwrap_or_default()
    }

    /// Trimmed value of the patient-name row, empty when absent
    pub fn patient_name(&self) -> String {
        self.field_value(FIELD_NAME)
            .map(|name| name.trim().to_string())
            .unwrap_or_default()
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.patients
            .items()
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.clone())
    }

    fn field_index(&self, id: &str) -> Option<usize> {
        self.patients.items().iter().position(|field| field.id == id)
    }

    /// Back to a blank evolution note: default template, sections, rows and metadata
    pub fn restore_all(&mut self) {
        self.template = TemplateId::evolution();
        self.sections.render(catalog::default_sections());
        self.restore_patient_defaults();
        self.update_title();
        self.medico.clear();
        self.especialidad.clear();
        tracing::debug!("Document restored to defaults");
    }

    /// Replace the patient rows with the canonical defaults
    pub fn restore_patient_defaults(&mut self) {
        self.patients.render(catalog::default_patient_fields());
        self.update_age();
    }

    /// Regenerate the title from the active template and report date
    pub fn update_title(&mut self) {
        self.title = catalog::title_for(&self.template, &self.report_date());
    }

    /// Recompute the age row from the birth-date and report-date rows
    ///
    /// Does nothing unless both the birth-date and the age rows exist.
    pub fn update_age(&mut self) {
        let (Some(birth), Some(age_index)) = (
            self.field_value(FIELD_BIRTH_DATE),
            self.field_index(FIELD_AGE),
        ) else {
            return;
        };
        let age = dates::calculate_age(&birth, &self.report_date(), (self.clock)())
            .map(|years| years.to_string())
            .unwrap_or_default();
        if let Some(field) = self.patients.get_mut(age_index) {
            field.value = age;
        }
    }

    /// Switch template, keeping user content through positional reconciliation
    pub fn change_template(&mut self, template: TemplateId) {
        let previous = self.sections.collect();
        let skeleton = catalog::skeleton_for(&template);
        let merged = reconcile::merge_sections_with_content(&skeleton, &previous);
        crate::log_template_change!(&self.template, &template, previous.len(), merged.len());
        self.sections.render(merged);
        self.template = template;
        self.update_title();
    }

    /// Set the value of the row with the given id
    ///
    /// Editing the report date refreshes the title and the age; editing the birth
    /// date refreshes the age.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no row has that id.
    pub fn set_field_value(&mut self, id: &str, value: impl Into<String>) -> Result<()> {
        let index = self
            .field_index(id)
            .ok_or_else(|| InformeError::Validation(format!("No patient field with id '{id}'")))?;
        self.set_field_value_at(index, value)
    }

    /// Set the value of the row at `index`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the index is out of range.
    pub fn set_field_value_at(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let field = self.patients.get_mut(index).ok_or_else(|| {
            InformeError::Validation(format!("No patient field at position {index}"))
        })?;
        field.value = value.into();
        let id = field.id.clone();

        if id == FIELD_REPORT_DATE {
            self.update_title();
            self.update_age();
        } else if id == FIELD_BIRTH_DATE {
            self.update_age();
        }
        Ok(())
    }

    /// Append a custom patient row
    pub fn add_patient_field(&mut self) {
        self.patients
            .push(PatientField::new(NEW_FIELD_LABEL, "", FieldType::Text));
    }

    /// Remove the patient row at `index`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the index is out of range.
    pub fn remove_patient_field(&mut self, index: usize) -> Result<PatientField> {
        self.patients.remove(index).ok_or_else(|| {
            InformeError::Validation(format!("No patient field at position {index}"))
        })
    }

    /// Append an empty custom section
    pub fn add_section(&mut self) {
        self.sections.push(Section::titled(CUSTOM_SECTION_TITLE));
    }

    /// Remove the last section, if any
    pub fn remove_last_section(&mut self) -> Option<Section> {
        let len = self.sections.len();
        if len == 0 {
            return None;
        }
        self.sections.remove(len - 1)
    }

    /// Remove the section at `index`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the index is out of range.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        self.sections
            .remove(index)
            .ok_or_else(|| InformeError::Validation(format!("No section at position {index}")))
    }

    /// Replace the body of the section at `index`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the index is out of range.
    pub fn set_section_content(&mut self, index: usize, content: impl Into<String>) -> Result<()> {
        let section = self
            .sections
            .get_mut(index)
            .ok_or_else(|| InformeError::Validation(format!("No section at position {index}")))?;
        section.content = content.into();
        Ok(())
    }

    /// Replace the heading of the section at `index`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the index is out of range.
    pub fn set_section_title(&mut self, index: usize, title: impl Into<String>) -> Result<()> {
        let section = self
            .sections
            .get_mut(index)
            .ok_or_else(|| InformeError::Validation(format!("No section at position {index}")))?;
        section.title = title.into();
        Ok(())
    }

    /// Write incoming section text over the current sections without reshaping them
    pub fn hydrate_sections(&mut self, incoming: &[Section]) {
        let mut current = self.sections.items().to_vec();
        reconcile::hydrate_sections(&mut current, incoming);
        self.sections.render(current);
    }

    /// Replace the displayed title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the treating physician
    pub fn set_medico(&mut self, medico: impl Into<String>) {
        self.medico = medico.into();
    }

    /// Set the physician specialty
    pub fn set_especialidad(&mut self, especialidad: impl Into<String>) {
        self.especialidad = especialidad.into();
    }

    /// Default row ids missing from the current rows
    ///
    /// Recorded in snapshots so a later restore can tell "deleted by the user" from
    /// "never existed". `apply` does not act on it yet.
    pub fn removed_default_patient_field_ids(&self) -> Vec<String> {
        let active: HashSet<&str> = self
            .patients
            .items()
            .iter()
            .map(|field| field.id.as_str())
            .filter(|id| !id.is_empty())
            .collect();
        catalog::default_patient_field_ids()
            .into_iter()
            .filter(|id| !active.contains(id.as_str()))
            .collect()
    }

    /// Capture the full editable state
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            version: SNAPSHOT_VERSION.to_string(),
            template: self.template.clone(),
            title: self.title.trim().to_string(),
            patient_fields: self.patients.collect(),
            removed_default_patient_field_ids: self.removed_default_patient_field_ids(),
            medico: self.medico.clone(),
            especialidad: self.especialidad.clone(),
            sections: self.sections.collect(),
        }
    }

    /// Restore state from a sanitized snapshot
    ///
    /// Members the patch leaves as `None` keep their current value. On the
    /// evolution template an empty or auto-generated title is regenerated, and the
    /// age is always recomputed rather than taken from the input.
    pub fn apply(&mut self, patch: SnapshotPatch) {
        if let Some(template) = patch.template {
            self.template = template;
        }

        if let Some(fields) = patch.patient_fields {
            self.patients.render(fields);
        }

        if let Some(sections) = patch.sections {
            self.sections.render(sections);
        }

        let auto_title = patch.title.is_blank()
            || patch
                .title
                .as_text()
                .is_some_and(|title| auto_title_pattern().is_match(title));
        if let ImportedTitle::Text(title) = patch.title {
            self.title = title;
        }

        self.medico = patch.medico;
        self.especialidad = patch.especialidad;

        if self.template.is_evolution() && auto_title {
            self.update_title();
        }

        self.update_age();

        tracing::debug!(
            template = %self.template,
            fields = self.patients.len(),
            sections = self.sections.len(),
            "Snapshot applied"
        );
    }
}
