//! Descriptor syntax and value serialization tests
//!
//! Covers:
//! - Primitive names and aliases
//! - Nullable, array and list composition
//! - Error positions for malformed descriptors
//! - JSON shape of values

use pretty_assertions::assert_eq;
use rstest::rstest;
use textcast_types::*;

fn parse(input: &str) -> TypeDescriptor {
    input
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse '{}': {:?}", input, e))
}

#[rstest]
#[case("Int32", PrimitiveKind::Int32)]
#[case("System.Int64", PrimitiveKind::Int64)]
#[case("u8", PrimitiveKind::UInt8)]
#[case("string", PrimitiveKind::String)]
#[case("Guid", PrimitiveKind::Guid)]
#[case("  TimeSpan  ", PrimitiveKind::TimeSpan)]
fn test_primitive_names(#[case] input: &str, #[case] expected: PrimitiveKind) {
    assert_eq!(parse(input), TypeDescriptor::Primitive(expected));
}

#[test]
fn test_nullable_suffix() {
    assert_eq!(
        parse("Int32?"),
        TypeDescriptor::nullable(PrimitiveKind::Int32.into())
    );
    assert_eq!(
        parse("Nullable<Boolean>"),
        TypeDescriptor::nullable(PrimitiveKind::Boolean.into())
    );
}

#[test]
fn test_array_suffix() {
    assert_eq!(
        parse("Int32[]"),
        TypeDescriptor::array(PrimitiveKind::Int32.into())
    );
    assert_eq!(
        parse("Int32?[]"),
        TypeDescriptor::array(TypeDescriptor::nullable(PrimitiveKind::Int32.into()))
    );
    assert_eq!(
        parse("Array<Char>"),
        TypeDescriptor::array(PrimitiveKind::Char.into())
    );
}

#[test]
fn test_list_forms() {
    let expected = TypeDescriptor::list(PrimitiveKind::String.into());
    assert_eq!(parse("List<String>"), expected);
    assert_eq!(parse("list<String>"), expected);
    assert_eq!(parse("List < String >"), expected);
}

#[test]
fn test_named_types() {
    assert_eq!(parse("Invoice"), TypeDescriptor::named("Invoice"));
    assert_eq!(
        parse("Acme.Billing.Invoice"),
        TypeDescriptor::Named {
            namespace: Some("Acme.Billing".to_string()),
            name: "Invoice".to_string(),
        }
    );
    assert_eq!(
        parse("Map<String>"),
        TypeDescriptor::Unsupported("Map<String>".to_string())
    );
}

#[test]
fn test_display_round_trips() {
    for input in ["Int32", "Int32?", "Int32[]", "List<Int32?>", "List<String>[]", "Acme.Invoice"] {
        assert_eq!(parse(input).to_string(), input);
    }
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<TypeDescriptor>(), Err(DescriptorParseError::Empty));
    assert_eq!(
        "List<Int32".parse::<TypeDescriptor>(),
        Err(DescriptorParseError::UnexpectedEnd { expected: "'>'" })
    );
    assert_eq!(
        "Int32]".parse::<TypeDescriptor>(),
        Err(DescriptorParseError::Unexpected {
            position: 5,
            found: ']'
        })
    );
    assert!("Int32[".parse::<TypeDescriptor>().is_err());
}

#[test]
fn test_is_numeric_over_descriptors() {
    assert!(parse("Int8").is_numeric());
    assert!(parse("UInt64").is_numeric());
    assert!(parse("Decimal").is_numeric());
    assert!(parse("Float32").is_numeric());
    assert!(!parse("String").is_numeric());
    assert!(!parse("Boolean").is_numeric());
    assert!(!parse("Invoice").is_numeric());
    assert!(!parse("Int32[]").is_numeric());
}

#[test]
fn test_enum_member_lookup() {
    let color = EnumType::with_members(
        "Color",
        vec![EnumMember::new("Red", 1), EnumMember::new("Green", 2)],
    );
    assert_eq!(color.member_ignore_case("rEd").map(|m| m.value), Some(1));
    assert_eq!(color.member("red"), None);

    let weather = EnumType::new("Weather", ["Été", "Ωmega"]);
    assert_eq!(weather.member_ignore_case("été").map(|m| m.value), Some(0));
    assert_eq!(weather.member_ignore_case("ωMEGA").map(|m| m.value), Some(1));
}

#[test]
fn test_value_json_shape() {
    let value = Value::Int32(5);
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json, serde_json::json!({"type": "Int32", "value": 5}));

    let span = Value::TimeSpan(TimeSpan::parse("01:00:00").unwrap());
    let json = serde_json::to_value(&span).unwrap();
    assert_eq!(json, serde_json::json!({"type": "TimeSpan", "value": "01:00:00"}));
}
