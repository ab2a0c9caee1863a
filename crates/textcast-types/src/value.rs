//! Runtime values produced by coercion
//!
//! This module defines the `Value` enum and the supporting temporal, URI and
//! collection types. Absence of a value is modelled with `Option<Value>`
//! everywhere; there is no null variant.

use crate::descriptor::TypeDescriptor;
use crate::primitive::PrimitiveKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// A typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    // === Scalars ===
    String(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Boolean(bool),
    Char(char),

    // === Temporal ===
    DateTime(DateTimeValue),
    DateOnly(NaiveDate),
    TimeOnly(NaiveTime),
    TimeSpan(TimeSpan),

    // === Identifiers ===
    Guid(Uuid),
    Uri(UriValue),

    // === Enums and collections ===
    Enum(EnumValue),
    /// Fixed-length array; failed element coercions stay in place as `None`
    Array(Vec<Option<Value>>),
    /// Growable list
    List(ValueList),
}

impl Value {
    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Primitive kind of a scalar value
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Self::String(_) => PrimitiveKind::String,
            Self::Int8(_) => PrimitiveKind::Int8,
            Self::Int16(_) => PrimitiveKind::Int16,
            Self::Int32(_) => PrimitiveKind::Int32,
            Self::Int64(_) => PrimitiveKind::Int64,
            Self::UInt8(_) => PrimitiveKind::UInt8,
            Self::UInt16(_) => PrimitiveKind::UInt16,
            Self::UInt32(_) => PrimitiveKind::UInt32,
            Self::UInt64(_) => PrimitiveKind::UInt64,
            Self::Float32(_) => PrimitiveKind::Float32,
            Self::Float64(_) => PrimitiveKind::Float64,
            Self::Decimal(_) => PrimitiveKind::Decimal,
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Char(_) => PrimitiveKind::Char,
            Self::DateTime(_) => PrimitiveKind::DateTime,
            Self::DateOnly(_) => PrimitiveKind::DateOnly,
            Self::TimeOnly(_) => PrimitiveKind::TimeOnly,
            Self::TimeSpan(_) => PrimitiveKind::TimeSpan,
            Self::Guid(_) => PrimitiveKind::Guid,
            Self::Uri(_) => PrimitiveKind::Uri,
            Self::Enum(_) | Self::Array(_) | Self::List(_) => return None,
        };
        Some(kind)
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as Boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get any integer as i64 (unsigned 64-bit values above `i64::MAX` excluded)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int8(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            Self::UInt8(v) => Some(i64::from(*v)),
            Self::UInt16(v) => Some(i64::from(*v)),
            Self::UInt32(v) => Some(i64::from(*v)),
            Self::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get as enum value
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Try to get as array elements
    pub fn as_array(&self) -> Option<&[Option<Value>]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Int8(v) => write!(f, "{}", v),
            Self::Int16(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::UInt8(v) => write!(f, "{}", v),
            Self::UInt16(v) => write!(f, "{}", v),
            Self::UInt32(v) => write!(f, "{}", v),
            Self::UInt64(v) => write!(f, "{}", v),
            Self::Float32(v) => write!(f, "{}", v),
            Self::Float64(v) => write!(f, "{}", v),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Char(c) => write!(f, "{:?}", c),
            Self::DateTime(dt) => write!(f, "{}", dt),
            Self::DateOnly(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::TimeOnly(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Self::TimeSpan(ts) => write!(f, "{}", ts),
            Self::Guid(g) => write!(f, "{}", g.hyphenated()),
            Self::Uri(u) => write!(f, "{}", u),
            Self::Enum(e) => write!(f, "{}", e),
            Self::Array(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Self::List(list) => write!(f, "{}", list),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Option<Value>]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match item {
            Some(v) => write!(f, "{}", v)?,
            None => write!(f, "null")?,
        }
    }
    Ok(())
}

// ============================================================================
// Temporal Types
// ============================================================================

/// Date and time of day with an optional UTC offset
///
/// Round-trip formatted strings carry an offset (`Z`, `+02:00`); strings
/// without one are kept as unspecified local time rather than assumed UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeValue {
    /// Wall-clock date and time
    pub local: NaiveDateTime,
    /// Offset from UTC in minutes
    pub timezone_offset: Option<i16>,
}

impl DateTimeValue {
    const LOCAL_FORMATS: [&'static str; 3] =
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    /// Create a datetime without offset
    pub fn local(local: NaiveDateTime) -> Self {
        Self {
            local,
            timezone_offset: None,
        }
    }

    /// Parse an ISO 8601 round-trip string
    ///
    /// Accepts RFC 3339 with offset, local date-times with `T` or space
    /// separator, and bare dates (midnight).
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            let offset_minutes = dt.offset().local_minus_utc() / 60;
            return Some(Self {
                local: dt.naive_local(),
                timezone_offset: i16::try_from(offset_minutes).ok(),
            });
        }

        for format in Self::LOCAL_FORMATS {
            if let Ok(local) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Self::local(local));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|date| Self::local(date.and_time(NaiveTime::MIN)))
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        if let Some(offset) = self.timezone_offset {
            if offset == 0 {
                write!(f, "Z")?;
            } else {
                let hours = offset.abs() / 60;
                let mins = offset.abs() % 60;
                let sign = if offset >= 0 { '+' } else { '-' };
                write!(f, "{}{:02}:{:02}", sign, hours, mins)?;
            }
        }
        Ok(())
    }
}

/// Parse a calendar date (`YYYY-MM-DD`)
pub fn parse_date_only(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a time of day (`HH:MM[:SS[.fffffff]]`)
pub fn parse_time_only(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Signed time interval
///
/// Text form is `[-][d.]hh:mm:ss[.fffffff]`, with a resolution of 100ns
/// ticks when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSpan(pub TimeDelta);

impl TimeSpan {
    const NANOS_PER_TICK: i64 = 100;

    /// Parse `[-][d.]hh:mm[:ss[.fffffff]]` or a bare `[-]d` day count
    pub fn parse(s: &str) -> Option<Self> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if body.is_empty() {
            return None;
        }

        let delta = if body.bytes().all(|b| b.is_ascii_digit()) {
            TimeDelta::try_days(body.parse().ok()?)?
        } else {
            parse_clock_span(body)?
        };

        Some(Self(if negative { -delta } else { delta }))
    }

    /// Underlying duration
    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }
}

fn parse_clock_span(body: &str) -> Option<TimeDelta> {
    let mut parts = body.split(':');
    let head = parts.next()?;
    let minutes = parts.next()?;
    let seconds = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let (days, hours) = match head.split_once('.') {
        Some((d, h)) => (digits(d)?, digits(h)?),
        None => (0, digits(head)?),
    };
    let minutes = digits(minutes)?;

    let (seconds, nanos) = match seconds {
        None => (0, 0),
        Some(sec) => match sec.split_once('.') {
            Some((s, frac)) => (digits(s)?, fraction_nanos(frac)?),
            None => (digits(sec)?, 0),
        },
    };

    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    TimeDelta::try_days(days)?
        .checked_add(&TimeDelta::try_hours(hours)?)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&TimeDelta::try_seconds(seconds)?)?
        .checked_add(&TimeDelta::nanoseconds(nanos))
}

fn digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Up to seven fractional digits, i.e. 100ns ticks
fn fraction_nanos(frac: &str) -> Option<i64> {
    if frac.is_empty() || frac.len() > 7 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let ticks: i64 = format!("{:0<7}", frac).parse().ok()?;
    Some(ticks * TimeSpan::NANOS_PER_TICK)
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < TimeDelta::zero();
        let abs = self.0.abs();
        let total_seconds = abs.num_seconds();
        let ticks = i64::from(abs.subsec_nanos()) / Self::NANOS_PER_TICK;

        let days = total_seconds / 86_400;
        let hours = (total_seconds % 86_400) / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;

        if negative {
            write!(f, "-")?;
        }
        if days > 0 {
            write!(f, "{}.", days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
        if ticks > 0 {
            write!(f, ".{:07}", ticks)?;
        }
        Ok(())
    }
}

impl Serialize for TimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time span: {}", text)))
    }
}

// ============================================================================
// URI
// ============================================================================

/// Absolute URL or relative reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UriValue {
    /// Absolute URL with scheme
    Absolute(Url),
    /// Relative reference, kept verbatim
    Relative(String),
}

impl UriValue {
    /// Parse an absolute or relative URI reference
    ///
    /// Relative references are validated by resolving them against a fixed
    /// base; anything that cannot be resolved is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match Url::parse(s) {
            Ok(url) => Some(Self::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse("http://localhost/").ok()?;
                base.join(s).ok().map(|_| Self::Relative(s.to_string()))
            }
            Err(_) => None,
        }
    }

    /// Check if this is an absolute URL
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }
}

impl fmt::Display for UriValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(url) => write!(f, "{}", url),
            Self::Relative(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// Enum and collection types
// ============================================================================

/// Enum member selected by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Enum type name
    pub type_name: String,
    /// Canonical member name as declared
    pub member: String,
    /// Underlying numeric value
    pub value: i64,
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.member)
    }
}

/// Growable homogeneous list
///
/// Remembers its element descriptor so an empty list is still typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueList {
    /// Element type
    pub element_type: TypeDescriptor,
    /// List elements; failed coercions are `None`
    pub items: Vec<Option<Value>>,
}

impl ValueList {
    /// Create a new empty list with the specified element type
    pub fn new(element_type: TypeDescriptor) -> Self {
        Self {
            element_type,
            items: Vec::new(),
        }
    }

    /// Create a new empty list with room for `capacity` elements
    pub fn with_capacity(element_type: TypeDescriptor, capacity: usize) -> Self {
        Self {
            element_type,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append an element
    pub fn push(&mut self, item: Option<Value>) {
        self.items.push(item);
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Get the allocated capacity
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Get an element by index (0-based)
    pub fn get(&self, index: usize) -> Option<&Option<Value>> {
        self.items.get(index)
    }

    /// Iterate over elements
    pub fn iter(&self) -> impl Iterator<Item = &Option<Value>> {
        self.items.iter()
    }
}

impl PartialEq for ValueList {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type && self.items == other.items
    }
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        write_items(f, &self.items)?;
        write!(f, "}}")
    }
}
