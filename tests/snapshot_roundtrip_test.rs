//! Integration tests for the document snapshot contract: export, import and
//! the guarantees around malformed input

use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use informe::core::document::DocumentEditor;
use informe::core::export::{
    export_document, export_file_name, import_document, FileSink, FileSource, SaveOutcome,
};
use informe::domain::{InformeError, SnapshotPatch, TemplateId};
use tempfile::TempDir;

fn filled_editor(template: &str) -> DocumentEditor {
    let mut editor = DocumentEditor::new();
    editor.change_template(TemplateId::new(template).unwrap());

    let name: String = Name().fake();
    editor.set_field_value("nombre", name).unwrap();
    editor.set_field_value("fecnac", "1985-02-20").unwrap();
    editor.set_field_value("finf", "2024-06-15").unwrap();

    for i in 0..editor.sections().len() {
        let text: String = Paragraph(1..3).fake();
        editor.set_section_content(i, text).unwrap();
    }
    editor.add_section();
    let last = editor.sections().len() - 1;
    let extra: String = Sentence(2..5).fake();
    editor.set_section_content(last, extra).unwrap();

    editor.set_medico(Name().fake::<String>());
    editor.set_especialidad("Medicina interna");
    editor
}

#[tokio::test]
async fn test_export_import_round_trip_through_files() {
    let dir = TempDir::new().unwrap();

    for template in ["1", "2", "3", "4", "5", "6"] {
        let editor = filled_editor(template);
        let outcome = export_document(&editor, &FileSink::in_directory(dir.path()))
            .await
            .unwrap();
        let SaveOutcome::Saved(path) = outcome else {
            panic!("export for template {template} was not saved");
        };
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            export_file_name(&editor.snapshot())
        );

        let mut restored = DocumentEditor::new();
        assert!(import_document(&mut restored, &FileSource::new(&path))
            .await
            .unwrap());
        assert_eq!(restored.snapshot(), editor.snapshot(), "template {template}");
    }
}

#[test]
fn test_snapshot_apply_round_trip_in_memory() {
    let editor = filled_editor("2");
    let json = editor.snapshot().to_json_pretty().unwrap();

    let mut restored = DocumentEditor::new();
    restored.apply(SnapshotPatch::parse(&json).unwrap());
    assert_eq!(restored.snapshot(), editor.snapshot());
    assert_eq!(restored.patient_fields().iter().find(|f| f.id == "edad").unwrap().value, "39");
}

#[tokio::test]
async fn test_malformed_import_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let mut editor = filled_editor("6");
    let before = editor.snapshot();

    for (name, body) in [("broken.json", "{not json"), ("array.json", "[1, 2, 3]")] {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();

        let err = import_document(&mut editor, &FileSource::new(&path))
            .await
            .unwrap_err();
        assert!(matches!(err, InformeError::Format(_)), "{name}: {err}");
        assert_eq!(editor.snapshot(), before);
    }
}

#[tokio::test]
async fn test_cancelled_pick_is_a_no_op() {
    let mut editor = filled_editor("3");
    let before = editor.snapshot();
    assert!(!import_document(&mut editor, &FileSource::none()).await.unwrap());
    assert_eq!(editor.snapshot(), before);
}

#[tokio::test]
async fn test_partial_import_keeps_unusable_members() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(
        &path,
        r#"{"title": 7, "sections": "oops", "patientFields": null, "medico": "Dra. Hey"}"#,
    )
    .unwrap();

    let mut editor = filled_editor("2");
    let before = editor.snapshot();
    import_document(&mut editor, &FileSource::new(&path))
        .await
        .unwrap();

    let after = editor.snapshot();
    assert_eq!(after.sections, before.sections);
    assert_eq!(after.patient_fields, before.patient_fields);
    assert_eq!(after.title, before.title);
    assert_eq!(after.medico, "Dra. Hey");
    assert_eq!(after.especialidad, "");
}

#[tokio::test]
async fn test_import_with_odd_shapes_is_sanitized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("odd.json");
    std::fs::write(
        &path,
        r#"{
            "template": 6,
            "title": "Informe médico - Hospital Hanga Roa",
            "patientFields": [{"label": "Nombre", "id": "nombre", "type": "weird", "value": 42}, "junk"],
            "sections": [{"title": "A", "content": "uno"}, 5, {"content": true}]
        }"#,
    )
    .unwrap();

    let mut editor = DocumentEditor::new();
    assert!(import_document(&mut editor, &FileSource::new(&path))
        .await
        .unwrap());

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.template.as_str(), "6");
    assert_eq!(snapshot.patient_fields.len(), 2);
    assert_eq!(snapshot.patient_fields[0].value, "42");
    assert_eq!(snapshot.patient_fields[0].field_type.as_str(), "text");
    assert_eq!(snapshot.patient_fields[1].id, "");
    assert_eq!(snapshot.sections.len(), 3);
    assert_eq!(snapshot.sections[1].content, "");
    assert_eq!(snapshot.sections[2].content, "true");
}

#[tokio::test]
async fn test_existing_export_is_not_clobbered() {
    let dir = TempDir::new().unwrap();
    let editor = filled_editor("4");
    let sink = FileSink::in_directory(dir.path());

    assert!(export_document(&editor, &sink).await.unwrap().is_saved());
    assert_eq!(
        export_document(&editor, &sink).await.unwrap(),
        SaveOutcome::Cancelled
    );
    assert!(export_document(&editor, &sink.clone().with_overwrite(true))
        .await
        .unwrap()
        .is_saved());
}
