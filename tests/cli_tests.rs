mod common;

use common::{fixture, strata_cmd, write_tree};
use predicates::prelude::*;

const BROKEN: &str = "openapi: 3.0.0\ninfo:\n  title: Broken\n  version: '1'\npaths:\n  /a:\n    $ref: '#/nowhere'\n";

#[test]
fn test_inspect_petstore_text() {
    strata_cmd()
        .arg("inspect")
        .arg(fixture("petstore.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("OpenAPI 3.0.3  Swagger Petstore"))
        .stdout(predicate::str::contains(
            "2 paths, 3 operations, 4 schemas, 6 references",
        ))
        .stdout(predicate::str::contains("Circular references:"));
}

#[test]
fn test_inspect_json_output() {
    let output = strata_cmd()
        .args(["inspect", "--format", "json"])
        .arg(fixture("petstore.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["version"], "3.0.3");
    assert_eq!(report["operations"], 3);
    assert_eq!(report["circular_references"].as_array().unwrap().len(), 1);
    assert!(report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_inspect_reports_errors_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("broken.yaml", BROKEN)]);

    strata_cmd()
        .arg("inspect")
        .arg(dir.path().join("broken.yaml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Errors:"))
        .stdout(predicate::str::contains(
            "7:11  Reference: reference cannot be found: '#/nowhere'",
        ));
}

#[test]
fn test_inspect_follows_files_only_when_allowed() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            (
                "api.yaml",
                "openapi: 3.0.0\ncomponents:\n  schemas:\n    Pet:\n      $ref: 'pet.yaml#/Pet'\n",
            ),
            ("pet.yaml", "Pet:\n  type: object\n"),
        ],
    );
    let document = dir.path().join("api.yaml");

    strata_cmd()
        .arg("inspect")
        .arg(&document)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("file references are disabled"));

    strata_cmd()
        .args(["inspect", "--allow-files"])
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 references"));
}

#[test]
fn test_inspect_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("strata.toml", "max_depth = 0\n")]);

    strata_cmd()
        .arg("inspect")
        .arg(fixture("petstore.yaml"))
        .arg("--config")
        .arg(dir.path().join("strata.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Configuration: Invalid configuration: max_depth must be greater than 0",
        ));
}

#[test]
fn test_inspect_resolve_schemas_with_depth_limit() {
    strata_cmd()
        .args(["inspect", "--resolve-schemas", "--max-depth", "1"])
        .arg(fixture("petstore.yaml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Schema errors:"))
        .stdout(predicate::str::contains("Depth: schema is too nested to build"));

    strata_cmd()
        .args(["inspect", "--resolve-schemas", "--max-depth", "1", "--truncate"])
        .arg(fixture("petstore.yaml"))
        .assert()
        .success();
}

#[test]
fn test_locate_prints_position() {
    strata_cmd()
        .arg("locate")
        .arg(fixture("petstore.yaml"))
        .arg("#/paths/~1pets/get/operationId")
        .assert()
        .success()
        .stdout("17:20\n");
}

#[test]
fn test_locate_unknown_pointer_fails() {
    strata_cmd()
        .arg("locate")
        .arg(fixture("petstore.yaml"))
        .arg("/components/schemas/Dragon")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Document: no node at '/components/schemas/Dragon'",
        ));
}

#[test]
fn test_refs_lists_targets() {
    strata_cmd()
        .arg("refs")
        .arg(fixture("petstore.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "38:23  #/components/schemas/Pets -> 110:7",
        ));
}

#[test]
fn test_refs_with_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("broken.yaml", BROKEN)]);

    let output = strata_cmd()
        .args(["refs", "--json-errors"])
        .arg(dir.path().join("broken.yaml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("#/nowhere -> (not found)"));

    let errors: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    let first = &errors[0];
    assert_eq!(first["error_type"], "ReferenceNotFound");
    assert_eq!(first["line"], 7);
    assert_eq!(first["column"], 11);
}

#[test]
fn test_missing_file_with_json_errors() {
    let output = strata_cmd()
        .args(["inspect", "--json-errors", "does-not-exist.yaml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error_type"], "FileSystem");
}

#[test]
fn test_invalid_yaml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("bad.yaml", "openapi: [3.0.0\n")]);

    strata_cmd()
        .arg("inspect")
        .arg(dir.path().join("bad.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("YAML Syntax Error"));
}

#[test]
fn test_logs_go_to_the_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("strata.log");

    strata_cmd()
        .args(["-v", "inspect"])
        .arg(fixture("petstore.yaml"))
        .env("STRATA_LOG_FILE", &log)
        .env("STRATA_LOG_FORMAT", "json")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let content = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(lines
        .iter()
        .any(|line| line["target"] == "strata::index" && line["level"] == "DEBUG"));
}
