//! Primitive parser table
//!
//! Maps each [`PrimitiveKind`] to a pure `fn(&str) -> Option<Value>`. The
//! table is built once on first use and never mutated afterwards, so
//! lookups need no synchronization.
//!
//! Malformed input is an expected outcome and yields `None`.

use rust_decimal::Decimal;
use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use textcast_types::{
    parse_date_only, parse_time_only, DateTimeValue, PrimitiveKind, TimeSpan, UriValue, Value,
};
use uuid::Uuid;

/// Parser for a single primitive kind
pub type ParserFn = fn(&str) -> Option<Value>;

static PARSERS: LazyLock<ParserTable> = LazyLock::new(ParserTable::new);

/// Immutable mapping from primitive kind to parser
#[derive(Debug)]
pub struct ParserTable {
    parsers: HashMap<PrimitiveKind, ParserFn>,
}

impl ParserTable {
    fn new() -> Self {
        let entries: [(PrimitiveKind, ParserFn); 20] = [
            (PrimitiveKind::String, parse_string),
            (PrimitiveKind::Int8, parse_i8),
            (PrimitiveKind::Int16, parse_i16),
            (PrimitiveKind::Int32, parse_i32),
            (PrimitiveKind::Int64, parse_i64),
            (PrimitiveKind::UInt8, parse_u8),
            (PrimitiveKind::UInt16, parse_u16),
            (PrimitiveKind::UInt32, parse_u32),
            (PrimitiveKind::UInt64, parse_u64),
            (PrimitiveKind::Float32, parse_f32),
            (PrimitiveKind::Float64, parse_f64),
            (PrimitiveKind::Decimal, parse_decimal),
            (PrimitiveKind::Boolean, parse_bool),
            (PrimitiveKind::DateTime, parse_datetime),
            (PrimitiveKind::DateOnly, parse_date),
            (PrimitiveKind::TimeOnly, parse_time),
            (PrimitiveKind::TimeSpan, parse_time_span),
            (PrimitiveKind::Guid, parse_guid),
            (PrimitiveKind::Uri, parse_uri),
            (PrimitiveKind::Char, parse_char),
        ];

        log::trace!("building primitive parser table ({} kinds)", entries.len());
        Self {
            parsers: entries.into_iter().collect(),
        }
    }

    /// The process-wide table
    pub fn global() -> &'static ParserTable {
        &PARSERS
    }

    /// Get the parser for a kind
    pub fn get(&self, kind: PrimitiveKind) -> Option<ParserFn> {
        self.parsers.get(&kind).copied()
    }

    /// Parse `text` as `kind`
    pub fn parse(&self, kind: PrimitiveKind, text: &str) -> Option<Value> {
        self.get(kind).and_then(|parser| parser(text))
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Parse `text` as `kind` using the process-wide table
pub fn parse_primitive(kind: PrimitiveKind, text: &str) -> Option<Value> {
    ParserTable::global().parse(kind, text)
}

fn parse_string(text: &str) -> Option<Value> {
    Some(Value::String(text.to_string()))
}

macro_rules! integer_parser {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(text: &str) -> Option<Value> {
            text.parse::<$ty>().ok().map(Value::$variant)
        }
    };
}

integer_parser!(parse_i8, i8, Int8);
integer_parser!(parse_i16, i16, Int16);
integer_parser!(parse_i32, i32, Int32);
integer_parser!(parse_i64, i64, Int64);
integer_parser!(parse_u8, u8, UInt8);
integer_parser!(parse_u16, u16, UInt16);
integer_parser!(parse_u32, u32, UInt32);
integer_parser!(parse_u64, u64, UInt64);

/// Remove `,` group separators from the integral part.
///
/// Each separator must sit between two digits and before any `.` or
/// exponent; anything else rejects the whole input.
fn strip_group_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains(',') {
        return Some(Cow::Borrowed(text));
    }

    let integral_end = text
        .find(|c: char| matches!(c, '.' | 'e' | 'E'))
        .unwrap_or(text.len());
    if text[integral_end..].contains(',') {
        return None;
    }

    let bytes = text.as_bytes();
    for (i, b) in bytes[..integral_end].iter().enumerate() {
        if *b == b',' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            if !before.is_some_and(|c| c.is_ascii_digit()) || !after.is_some_and(|c| c.is_ascii_digit()) {
                return None;
            }
        }
    }

    Some(Cow::Owned(text.replace(',', "")))
}

fn parse_f32(text: &str) -> Option<Value> {
    strip_group_separators(text)?
        .parse::<f32>()
        .ok()
        .map(Value::Float32)
}

fn parse_f64(text: &str) -> Option<Value> {
    strip_group_separators(text)?
        .parse::<f64>()
        .ok()
        .map(Value::Float64)
}

fn parse_decimal(text: &str) -> Option<Value> {
    let text = strip_group_separators(text)?;
    // rust_decimal skips '_' digit separators and reads exponents; invariant decimal text has neither
    if text.contains(['_', 'e', 'E']) {
        return None;
    }
    Decimal::from_str(&text).ok().map(Value::Decimal)
}

fn parse_bool(text: &str) -> Option<Value> {
    if text.eq_ignore_ascii_case("true") {
        Some(Value::Boolean(true))
    } else if text.eq_ignore_ascii_case("false") {
        Some(Value::Boolean(false))
    } else {
        None
    }
}

fn parse_datetime(text: &str) -> Option<Value> {
    DateTimeValue::parse(text).map(Value::DateTime)
}

fn parse_date(text: &str) -> Option<Value> {
    parse_date_only(text).map(Value::DateOnly)
}

fn parse_time(text: &str) -> Option<Value> {
    parse_time_only(text).map(Value::TimeOnly)
}

fn parse_time_span(text: &str) -> Option<Value> {
    TimeSpan::parse(text).map(Value::TimeSpan)
}

fn parse_guid(text: &str) -> Option<Value> {
    Uuid::try_parse(text).ok().map(Value::Guid)
}

fn parse_uri(text: &str) -> Option<Value> {
    UriValue::parse(text).map(Value::Uri)
}

fn parse_char(text: &str) -> Option<Value> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Value::Char(c)),
        _ => None,
    }
}
