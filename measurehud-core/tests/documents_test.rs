use measurehud_core::{
    component_measure_unique_key, CoreError, MeasuresDocument, Qualifier, SettingsDocument,
    AUTHENTICATION_CATEGORY,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_measures_document_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("components.json");
    fs::write(
        &path,
        r#"{
            "metrics": [
                {"key": "ncloc", "name": "Lines of Code", "type": "INT"},
                {"key": "alert_status", "name": "Quality Gate Status", "type": "LEVEL"}
            ],
            "components": [
                {"key": "app:core", "refKey": "core", "name": "core", "qualifier": "TRK", "branch": "release-9",
                 "measures": [{"metric": "alert_status", "value": "OK"}, {"metric": "ncloc", "value": "5300"}]},
                {"key": "", "name": "orphan", "qualifier": "??", "measures": []}
            ]
        }"#,
    )
    .unwrap();

    let document = MeasuresDocument::load(&path).unwrap();
    let entities = document.into_entities().unwrap();

    assert_eq!(entities[0].qualifier, Qualifier::Project);
    assert_eq!(entities[0].display_name(), "core / release-9");
    assert_eq!(
        component_measure_unique_key(&entities[0]).as_deref(),
        Some("core@release-9")
    );
    assert_eq!(entities[0].other_measure("alert_status").map(|m| m.metric.key.as_str()), Some("ncloc"));

    assert_eq!(entities[1].qualifier, Qualifier::Unknown);
    assert_eq!(component_measure_unique_key(&entities[1]), None);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = MeasuresDocument::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn test_malformed_json_is_json_error() {
    let err = SettingsDocument::from_json_str("{\"definitions\": 3}").unwrap_err();
    assert!(matches!(err, CoreError::Json(_)));
}

#[test]
fn test_authentication_definitions_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("definitions.json");
    fs::write(
        &path,
        r#"[
            {"key": "sonar.auth.saml.enabled", "category": "Authentication", "subCategory": "saml", "type": "BOOLEAN", "defaultValue": "false"},
            {"key": "sonar.auth.gitlab.enabled", "category": "authentication", "subCategory": "gitlab"}
        ]"#,
    )
    .unwrap();

    let document = SettingsDocument::load(&path).unwrap();
    let saml: Vec<_> = document
        .definitions
        .iter()
        .filter(|d| d.belongs_to(AUTHENTICATION_CATEGORY, "saml"))
        .collect();
    assert_eq!(saml.len(), 1);
    assert_eq!(saml[0].setting_type.as_deref(), Some("BOOLEAN"));
    assert_eq!(saml[0].default_value.as_deref(), Some("false"));
}
