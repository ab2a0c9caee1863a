//! ModelInfo parser for XML and JSON formats
//!
//! XML layout:
//!
//! ```xml
//! <modelInfo name="Billing" version="1.0.0">
//!     <typeInfo name="Invoice" namespace="Acme" kind="class" baseType="Acme.Document">
//!         <interface name="Acme.IPayable"/>
//!         <element name="Total" type="Decimal" serializedName="total_amount"/>
//!         <element name="Empty" type="Acme.Invoice" static="true"/>
//!     </typeInfo>
//!     <typeInfo name="Status" namespace="Acme" kind="enum">
//!         <member name="Open" value="1"/>
//!     </typeInfo>
//! </modelInfo>
//! ```
//!
//! JSON mirrors it with `typeInfo`, `interface`, `element` and `member` arrays.

use super::types::{ElementInfo, ModelInfo, TypeInfo, TypeKind};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value as JsonValue;
use std::path::Path;
use textcast_types::EnumMember;

/// Error type for ModelInfo parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    AttrError(#[from] quick_xml::events::attributes::AttrError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid ModelInfo structure: {0}")]
    InvalidStructure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Parse ModelInfo from XML format
pub fn parse_xml(xml_content: &str) -> Result<ModelInfo, ParseError> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut model_info = ModelInfo::new("", "");
    let mut current_type: Option<TypeInfo> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "modelInfo" => read_model_attributes(&e, &mut model_info)?,
                    "typeInfo" | "classInfo" => current_type = Some(type_from_attributes(&e)?),
                    _ => read_child(&tag_name, &e, current_type.as_mut())?,
                }
            }
            Ok(Event::Empty(e)) => {
                // Self-closing tags like <element name="id" type="String"/>
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "modelInfo" => read_model_attributes(&e, &mut model_info)?,
                    "typeInfo" | "classInfo" => model_info.insert(type_from_attributes(&e)?),
                    _ => read_child(&tag_name, &e, current_type.as_mut())?,
                }
            }
            Ok(Event::End(e)) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if matches!(tag_name.as_str(), "typeInfo" | "classInfo") {
                    if let Some(type_info) = current_type.take() {
                        model_info.insert(type_info);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(model_info)
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::InvalidStructure(e.to_string()))?
            .into_owned();
        attrs.push((String::from_utf8_lossy(attr.key.as_ref()).into_owned(), value));
    }
    Ok(attrs)
}

fn read_model_attributes(e: &BytesStart<'_>, model_info: &mut ModelInfo) -> Result<(), ParseError> {
    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => model_info.name = value,
            "version" => model_info.version = value,
            "url" => model_info.url = value,
            _ => {}
        }
    }
    Ok(())
}

fn type_from_attributes(e: &BytesStart<'_>) -> Result<TypeInfo, ParseError> {
    let mut type_info = TypeInfo::new("");

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => type_info.name = value,
            "namespace" => type_info.namespace = Some(value),
            "baseType" => type_info.base_type = Some(value),
            "kind" => type_info.kind = parse_kind(&value)?,
            _ => {}
        }
    }

    if type_info.name.is_empty() {
        return Err(ParseError::InvalidStructure("Missing type name".to_string()));
    }
    Ok(type_info)
}

fn read_child(
    tag_name: &str,
    e: &BytesStart<'_>,
    current_type: Option<&mut TypeInfo>,
) -> Result<(), ParseError> {
    let Some(type_info) = current_type else {
        return Ok(());
    };

    match tag_name {
        "element" => {
            let mut element = ElementInfo::new("", "");
            for (key, value) in attributes(e)? {
                match key.as_str() {
                    "name" => element.name = value,
                    "type" | "elementType" => element.element_type = value,
                    "static" => element.is_static = value == "true",
                    "value" => element.value = Some(value),
                    "serializedName" => element.serialized_name = Some(value),
                    _ => {}
                }
            }
            if element.name.is_empty() || element.element_type.is_empty() {
                return Err(ParseError::InvalidStructure(format!(
                    "Element of {} needs name and type",
                    type_info.name
                )));
            }
            type_info.elements.push(element);
        }
        "interface" => {
            let name = attributes(e)?
                .into_iter()
                .find(|(key, _)| key == "name")
                .map(|(_, value)| value)
                .ok_or_else(|| ParseError::InvalidStructure("Missing interface name".to_string()))?;
            type_info.interfaces.push(name);
        }
        "member" => {
            let mut name = None;
            let mut value = None;
            for (key, raw) in attributes(e)? {
                match key.as_str() {
                    "name" => name = Some(raw),
                    "value" => value = Some(parse_member_value(&raw)?),
                    _ => {}
                }
            }
            let name = name
                .ok_or_else(|| ParseError::InvalidStructure("Missing member name".to_string()))?;
            let value = value.unwrap_or_else(|| next_member_value(&type_info.members));
            type_info.members.push(EnumMember::new(name, value));
        }
        _ => {}
    }
    Ok(())
}

/// Implicit member value: one past the previous member, or 0 for the first
fn next_member_value(members: &[EnumMember]) -> i64 {
    members.last().map_or(0, |last| last.value.saturating_add(1))
}

fn parse_kind(value: &str) -> Result<TypeKind, ParseError> {
    TypeKind::from_name(value)
        .ok_or_else(|| ParseError::InvalidStructure(format!("Unknown type kind: {}", value)))
}

fn parse_member_value(raw: &str) -> Result<i64, ParseError> {
    raw.trim()
        .parse()
        .map_err(|_| ParseError::InvalidStructure(format!("Invalid enum member value: {}", raw)))
}

/// Read and parse an XML ModelInfo file
pub fn parse_xml_file(path: impl AsRef<Path>) -> Result<ModelInfo, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_xml(&xml)
}

/// Read and parse a JSON ModelInfo file
pub fn parse_json_file(path: impl AsRef<Path>) -> Result<ModelInfo, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_json(&json)
}

/// Parse ModelInfo from JSON format
pub fn parse_json(json_content: &str) -> Result<ModelInfo, ParseError> {
    let json: JsonValue = serde_json::from_str(json_content)?;

    let mut model_info = ModelInfo::new(
        json["name"].as_str().unwrap_or(""),
        json["version"].as_str().unwrap_or(""),
    );
    model_info.url = json["url"].as_str().unwrap_or("").to_string();

    if let Some(type_infos) = json["typeInfo"].as_array() {
        for type_json in type_infos {
            model_info.insert(parse_type_info_json(type_json)?);
        }
    }

    Ok(model_info)
}

fn parse_type_info_json(json: &JsonValue) -> Result<TypeInfo, ParseError> {
    let mut type_info = TypeInfo::new(
        json["name"]
            .as_str()
            .ok_or_else(|| ParseError::InvalidStructure("Missing type name".to_string()))?,
    );

    type_info.namespace = json["namespace"].as_str().map(String::from);
    type_info.base_type = json["baseType"].as_str().map(String::from);
    if let Some(kind) = json["kind"].as_str() {
        type_info.kind = parse_kind(kind)?;
    }

    if let Some(interfaces) = json["interface"].as_array() {
        for interface in interfaces {
            let name = interface
                .as_str()
                .or_else(|| interface["name"].as_str())
                .ok_or_else(|| ParseError::InvalidStructure("Missing interface name".to_string()))?;
            type_info.interfaces.push(name.to_string());
        }
    }

    if let Some(elements) = json["element"].as_array() {
        for elem_json in elements {
            type_info.elements.push(parse_element_json(elem_json)?);
        }
    }

    if let Some(members) = json["member"].as_array() {
        for member_json in members {
            let name = member_json
                .as_str()
                .or_else(|| member_json["name"].as_str())
                .ok_or_else(|| ParseError::InvalidStructure("Missing member name".to_string()))?;
            let value = member_json["value"]
                .as_i64()
                .unwrap_or_else(|| next_member_value(&type_info.members));
            type_info.members.push(EnumMember::new(name, value));
        }
    }

    Ok(type_info)
}

fn parse_element_json(json: &JsonValue) -> Result<ElementInfo, ParseError> {
    let name = json["name"]
        .as_str()
        .ok_or_else(|| ParseError::InvalidStructure("Missing element name".to_string()))?;

    let element_type = json["type"]
        .as_str()
        .or_else(|| json["elementType"].as_str())
        .ok_or_else(|| ParseError::InvalidStructure("Missing element type".to_string()))?;

    let mut element = ElementInfo::new(name, element_type);
    element.is_static = json["static"].as_bool().unwrap_or(false);
    element.value = json["value"].as_str().map(String::from);
    element.serialized_name = json["serializedName"].as_str().map(String::from);

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <modelInfo name="Billing" version="1.0.0" url="http://test.org">
            <typeInfo name="IPayable" namespace="Acme" kind="interface"/>
            <typeInfo name="Invoice" namespace="Acme" kind="class">
                <interface name="Acme.IPayable"/>
                <element name="Total" type="Decimal" serializedName="total_amount"/>
                <element name="Lines" type="list&lt;String&gt;"/>
                <element name="MaxLines" type="Int32" static="true" value="50"/>
            </typeInfo>
            <typeInfo name="Status" namespace="Acme" kind="enum">
                <member name="Open" value="1"/>
                <member name="Closed"/>
            </typeInfo>
        </modelInfo>"#;

        let model = parse_xml(xml).unwrap();
        assert_eq!(model.name, "Billing");
        assert_eq!(model.version, "1.0.0");
        assert_eq!(model.type_infos.len(), 3);

        let interface = model.get_type("Acme.IPayable").unwrap();
        assert!(interface.is_interface());

        let invoice = model.get_type("Acme.Invoice").unwrap();
        assert_eq!(invoice.interfaces, vec!["Acme.IPayable".to_string()]);
        assert_eq!(invoice.elements.len(), 3);
        assert_eq!(
            invoice.get_element("Total").unwrap().serialized_name.as_deref(),
            Some("total_amount")
        );
        let max_lines = invoice.get_element("MaxLines").unwrap();
        assert!(max_lines.is_static);
        assert_eq!(max_lines.value.as_deref(), Some("50"));

        let status = model.get_type("Status").unwrap();
        assert_eq!(status.kind, TypeKind::Enum);
        assert_eq!(status.members[0], EnumMember::new("Open", 1));
        assert_eq!(status.members[1], EnumMember::new("Closed", 2));
    }

    #[test]
    fn test_parse_simple_json() {
        let json = r#"{
            "name": "Billing",
            "version": "1.0.0",
            "url": "http://test.org",
            "typeInfo": [{
                "name": "Invoice",
                "kind": "class",
                "interface": ["IPayable"],
                "element": [
                    {"name": "id", "type": "Guid", "serializedName": "invoice_id"},
                    {"name": "Retries", "type": "Int32", "static": true, "value": "3"}
                ]
            }, {
                "name": "Color",
                "kind": "enum",
                "member": ["Red", {"name": "Green", "value": 10}, "Blue"]
            }]
        }"#;

        let model = parse_json(json).unwrap();
        assert_eq!(model.name, "Billing");
        let invoice = model.get_type("Invoice").unwrap();
        assert_eq!(invoice.static_elements().count(), 1);
        assert_eq!(invoice.interfaces, vec!["IPayable".to_string()]);

        let color = model.get_type("Color").unwrap();
        assert_eq!(color.members[0], EnumMember::new("Red", 0));
        assert_eq!(color.members[1], EnumMember::new("Green", 10));
        assert_eq!(color.members[2], EnumMember::new("Blue", 11));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            parse_xml_file(dir.path().join("absent.xml")),
            Err(ParseError::IoError(_))
        ));
        assert!(matches!(
            parse_json_file(dir.path().join("absent.json")),
            Err(ParseError::IoError(_))
        ));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"typeInfo": [{"name": "X", "kind": "union"}]}"#;
        assert!(matches!(parse_json(json), Err(ParseError::InvalidStructure(_))));
    }
}
