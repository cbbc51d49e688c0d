//! Payload loading and mutation workflows
//!
//! These tests load fixtures from disk, resolve placeholders in mutation
//! tables, and apply the resulting edits.

use fixture_params::config::{load_config, reset_config};
use fixture_params::payload::{
    apply_rows, load_payload, load_with, FsLoader, LoadError, Payload, PayloadKind,
    ResourceLoader,
};
use fixture_params::{Registry, Resolver};
use serde_json::{json, Value};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

const FORM: &str = "username=username&password=password";
const DOCUMENT: &str = r#"{"key1":"value1","key2":{"key3":"value3"}}"#;

fn create_fixtures() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("form.conf"), FORM).unwrap();
    fs::write(dir.path().join("document.json"), DOCUMENT).unwrap();
    fs::write(
        dir.path().join("relaxed.json"),
        "# written by hand\n{key1: value1, key2: {key3: value3}}\n",
    )
    .unwrap();
    dir
}

fn rows(table: &[[&str; 3]]) -> Vec<Vec<String>> {
    table
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn mutate(dir: &TempDir, name: &str, kind: PayloadKind, table: &[[&str; 3]]) -> String {
    let loader = FsLoader::new(dir.path());
    let payload = load_with(&loader, name, kind).unwrap();
    apply_rows(&payload, rows(table)).unwrap().render()
}

#[test]
fn test_string_fixture_mutations() {
    let dir = create_fixtures();

    assert_eq!(
        mutate(&dir, "form.conf", PayloadKind::String, &[["username=username&", "DELETE", "N/A"]]),
        "password=password"
    );
    assert_eq!(
        mutate(&dir, "form.conf", PayloadKind::String, &[["N/A", "ADD", "&config=config"]]),
        "username=username&password=password&config=config"
    );
    assert_eq!(
        mutate(
            &dir,
            "form.conf",
            PayloadKind::String,
            &[["username=username", "UPDATE", "username=NEWusername"]]
        ),
        "username=NEWusername&password=password"
    );
}

#[test]
fn test_json_fixture_mutations() {
    let dir = create_fixtures();

    assert_eq!(
        mutate(&dir, "document.json", PayloadKind::Json, &[["key1", "DELETE", "N/A"]]),
        r#"{"key2":{"key3":"value3"}}"#
    );

    let appended = mutate(&dir, "document.json", PayloadKind::Json, &[["key2.key3", "APPEND", "Append"]]);
    let value: Value = serde_json::from_str(&appended).unwrap();
    assert_eq!(value, json!({"key1": "value1", "key2": {"key3": "value3Append"}}));

    let replaced = mutate(
        &dir,
        "document.json",
        PayloadKind::Json,
        &[["key2.key3", "REPLACE", "lu->REPLACE"]],
    );
    let value: Value = serde_json::from_str(&replaced).unwrap();
    assert_eq!(value["key2"]["key3"], "vaREPLACEe3");
}

#[test]
fn test_json_fixture_add_under_root_path() {
    let dir = create_fixtures();
    let added = mutate(&dir, "document.json", PayloadKind::Json, &[["$.key2.key4", "ADD", "value4"]]);
    let value: Value = serde_json::from_str(&added).unwrap();
    assert_eq!(
        value,
        json!({"key1": "value1", "key2": {"key3": "value3", "key4": "value4"}})
    );
}

#[test]
fn test_relaxed_fixture_behaves_like_strict() {
    let dir = create_fixtures();
    let table = [["key1", "DELETE", "N/A"], ["key2.key3", "PREPEND", ">"]];

    assert_eq!(
        mutate(&dir, "relaxed.json", PayloadKind::Json, &table),
        mutate(&dir, "document.json", PayloadKind::Json, &table)
    );
}

#[test]
fn test_unknown_operation_for_both_kinds() {
    let dir = create_fixtures();
    let loader = FsLoader::new(dir.path());

    for (name, kind) in [("form.conf", PayloadKind::String), ("document.json", PayloadKind::Json)] {
        let payload = load_with(&loader, name, kind).unwrap();
        let failure = apply_rows(&payload, rows(&[["key1", "REMOVE", "N/A"]])).unwrap_err();
        assert_eq!(failure.to_string(), "Modification type does not exist: REMOVE");
        assert_eq!(failure.partial, payload);
    }
}

#[test]
fn test_delete_twice_is_idempotent() {
    let dir = create_fixtures();
    let once = mutate(&dir, "document.json", PayloadKind::Json, &[["key1", "DELETE", "N/A"]]);
    let twice = mutate(
        &dir,
        "document.json",
        PayloadKind::Json,
        &[["key1", "DELETE", "N/A"], ["key1", "DELETE", "N/A"]],
    );
    assert_eq!(once, twice);
}

#[test]
fn test_missing_resource() {
    let dir = create_fixtures();
    let loader = FsLoader::new(dir.path());

    let err = loader.load("absent.json", PayloadKind::Json).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert_eq!(err.to_string(), "File does not exist: absent.json");
}

#[test]
fn test_mutation_table_with_placeholders() {
    let dir = create_fixtures();
    let registry = Registry::new();
    registry.set("suffix", "Append");
    let resolver = Resolver::new().with_registry(registry);

    let table = rows(&[["key2.key3", "APPEND", "!{suffix}"], ["key1", "UPDATE", "!{suffix}"]]);
    let resolved: Vec<Vec<String>> = table
        .iter()
        .map(|row| row.iter().map(|cell| resolver.resolve(cell).unwrap()).collect())
        .collect();

    let payload = load_with(&FsLoader::new(dir.path()), "document.json", PayloadKind::Json).unwrap();
    let result = apply_rows(&payload, resolved).unwrap();

    assert_eq!(
        result,
        Payload::Json(json!({"key1": "Append", "key2": {"key3": "value3Append"}}))
    );
}

#[test]
fn test_captured_value_feeds_later_mutation() {
    let registry = Registry::new();
    let response = r#"{"session": {"id": "s-77", "ttl": 300}}"#;
    registry.capture(response, "$.session.id", "sessionId").unwrap();
    registry.capture(response, "session.ttl", "ttl").unwrap();

    let resolver = Resolver::new().with_registry(registry);
    let argument = resolver.resolve("sid=!{sessionId}&ttl=!{ttl}").unwrap();

    let extra = format!("&{}", argument);
    let result = apply_rows(&Payload::from("a=1"), [["", "ADD", extra.as_str()]]).unwrap();
    assert_eq!(result.render(), "a=1&sid=s-77&ttl=300");
}

#[test]
#[serial]
fn test_load_payload_uses_configured_directory() {
    let dir = create_fixtures();
    load_config(Some(json!({
        "fixture-params": { "resourceDir": dir.path().to_string_lossy() }
    })))
    .unwrap();

    let payload = load_payload("form.conf", PayloadKind::String).unwrap();
    assert_eq!(payload, Payload::Raw(FORM.to_string()));

    reset_config();
}
