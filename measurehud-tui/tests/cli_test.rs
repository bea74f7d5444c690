use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const COMPONENTS: &str = r#"{
    "metrics": [
        {"key": "coverage", "name": "Coverage", "type": "PERCENT", "higherValuesAreBetter": true},
        {"key": "ncloc", "name": "Lines of Code", "type": "INT"}
    ],
    "components": [
        {"key": "proj:src", "name": "src", "qualifier": "DIR",
         "measures": [{"metric": "coverage", "value": "72.4"}, {"metric": "ncloc", "value": "1400"}]},
        {"key": "proj:empty", "name": "empty", "qualifier": "DIR",
         "measures": [{"metric": "coverage", "value": "10"}, {"metric": "ncloc", "value": "0"}]},
        {"key": "proj:docs", "name": "docs", "qualifier": "DIR",
         "measures": [{"metric": "ncloc", "value": "30"}]}
    ]
}"#;

const DEFINITIONS: &str = r#"[
    {"key": "sonar.auth.github.enabled", "name": "Enabled", "category": "authentication", "subCategory": "github"},
    {"key": "sonar.auth.saml.enabled", "name": "Enabled", "category": "authentication", "subCategory": "saml"}
]"#;

fn json_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn measurehud() -> Command {
    Command::cargo_bin("measurehud").unwrap()
}

#[test]
fn test_treemap_preview() {
    let components = json_file(COMPONENTS);
    measurehud()
        .args(["treemap", "--metric", "coverage", "--preview"])
        .arg(components.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Color: Coverage   Size: Lines of Code"))
        .stdout(predicate::str::contains("Coverage: 72.4%"))
        .stdout(predicate::str::contains("Coverage: —"))
        .stdout(predicate::str::contains("empty").not());
}

#[test]
fn test_treemap_unknown_metric_fails() {
    let components = json_file(COMPONENTS);
    measurehud()
        .args(["treemap", "--metric", "bugs", "--preview"])
        .arg(components.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown color metric 'bugs'"));
}

#[test]
fn test_auth_select_prints_rewritten_query() {
    let definitions = json_file(DEFINITIONS);
    measurehud()
        .args(["auth", "--query", "category=authentication&tab=saml", "--select", "github"])
        .arg(definitions.path())
        .assert()
        .success()
        .stdout("category=authentication&tab=github\n");
}

#[test]
fn test_auth_preview_lists_selected_tab() {
    let definitions = json_file(DEFINITIONS);
    measurehud()
        .args(["auth", "--query", "tab=github", "--preview"])
        .arg(definitions.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SAML  [GitHub]  Bitbucket  GitLab"))
        .stdout(predicate::str::contains("sonar.auth.github.enabled"))
        .stdout(predicate::str::contains("sonar.auth.saml.enabled").not());
}

#[test]
fn test_auth_rejects_unknown_tab() {
    let definitions = json_file(DEFINITIONS);
    measurehud()
        .args(["auth", "--select", "ldap"])
        .arg(definitions.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tab 'ldap'"));
}
