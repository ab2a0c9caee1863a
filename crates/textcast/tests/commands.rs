//! End-to-end tests for CLI commands writing to output files

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use textcast::cli::output::OutputFormat;
use textcast::cli::{convert, inspect, name};

const MODEL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<modelInfo name="Billing" version="2.1.0">
    <typeInfo name="Status" namespace="Acme" kind="enum">
        <member name="Open" value="1"/>
        <member name="Closed" value="2"/>
    </typeInfo>
    <typeInfo name="IAuditable" namespace="Acme" kind="interface"/>
    <typeInfo name="Invoice" namespace="Acme">
        <interface name="Acme.IAuditable"/>
        <element name="Number" type="String" serializedName="invoice_no"/>
        <element name="Default" type="Acme.Status" static="true" value="open"/>
        <element name="Watched" type="list&lt;Acme.Status&gt;" static="true" value="Open, closed"/>
    </typeInfo>
</modelInfo>"#;

fn write_model(dir: &Path) -> PathBuf {
    let path = dir.join("billing.xml");
    std::fs::write(&path, MODEL_XML).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[rstest]
#[case("Acme.Status", "CLOSED", json!({"type": "Enum", "value": {"type_name": "Acme.Status", "member": "Closed", "value": 2}}))]
#[case("Int32?", "", Value::Null)]
#[case("Boolean", "True", json!({"type": "Boolean", "value": true}))]
fn test_convert_writes_json(#[case] type_name: &str, #[case] text: &str, #[case] expected: Value) {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");

    convert::convert(convert::ConvertConfig {
        type_name: type_name.to_string(),
        text: text.to_string(),
        model: Some(write_model(dir.path())),
        single_token: false,
        format: OutputFormat::Json,
        output_file: Some(out.clone()),
    })
    .unwrap();

    assert_eq!(read_json(&out)["value"], expected);
}

#[test]
fn test_name_reads_annotations() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("names.json");

    name::name(name::NameConfig {
        type_name: "Invoice".to_string(),
        fields: vec!["Number".to_string(), "Total".to_string()],
        model: Some(write_model(dir.path())),
        format: OutputFormat::Json,
        output_file: Some(out.clone()),
    })
    .unwrap();

    assert_eq!(
        read_json(&out)["fields"],
        json!([
            {"field": "Number", "serializedName": "invoice_no"},
            {"field": "Total", "serializedName": "Total"},
        ])
    );
}

#[test]
fn test_inspect_reports_interfaces_and_statics() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("inspect.json");

    inspect::inspect(inspect::InspectConfig {
        type_name: "Acme.Invoice".to_string(),
        element: Some("Acme.Status".to_string()),
        model: Some(write_model(dir.path())),
        format: OutputFormat::Json,
        output_file: Some(out.clone()),
    })
    .unwrap();

    let report = read_json(&out);
    assert_eq!(report["type"], json!("Acme.Invoice"));
    assert_eq!(report["numeric"], json!(false));
    assert_eq!(report["interfaces"], json!(["Acme.IAuditable"]));
    assert_eq!(report["staticFields"][0]["name"], json!("Default"));
    assert_eq!(report["staticFields"][0]["value"]["value"]["member"], json!("Open"));
}

#[test]
fn test_missing_model_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = name::name(name::NameConfig {
        type_name: "Invoice".to_string(),
        fields: vec!["Number".to_string()],
        model: Some(dir.path().join("missing.json")),
        format: OutputFormat::Text,
        output_file: None,
    });
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to load model"), "{}", message);
}
