//! Scalar cell values.
//!
//! Every row in a [`Table`](crate::Table) is a `Vec<CellValue>`. The variant
//! set is closed so that the flattener, the setter and the sheet backends can
//! all dispatch exhaustively.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scalar cell.
///
/// `Null` is the explicit "absent" marker produced for `None` fields and empty
/// collections. It is distinct from any zero value: importing a `Null` cell
/// leaves the destination field untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Missing value.
    #[default]
    Null,
    /// Text value.
    Text(String),
    /// Signed integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Instant in UTC.
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Whether this is the absent marker.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Borrow the text payload, if this is a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Text(_) => "text",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "bool",
            CellValue::Timestamp(_) => "timestamp",
        }
    }
}

/// Render the value as display text.
///
/// This is the text handed to registry parsers and numeric/boolean parsers
/// during import. `Null` renders as the empty string, timestamps as RFC 3339
/// with a `Z` suffix.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Timestamp(ts) => f.write_str(&format_timestamp(ts)),
        }
    }
}

/// Format an instant the way the built-in date/time converter does.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an RFC 3339 timestamp and normalize it to UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

macro_rules! widening_int {
    ($($ty:ty),+) => {$(
        impl From<$ty> for CellValue {
            fn from(value: $ty) -> Self {
                CellValue::Int(i64::from(value))
            }
        }
    )+};
}

widening_int!(i8, i16, i32, u8, u16, u32);

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Float(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// Recover a typed scalar from raw cell text.
///
/// Tries, in order: integer, float (digits required), boolean (`true`/`false`).
/// Anything else is kept as text. Empty input is treated as an absent cell.
///
/// ```
/// use sheetmap::{sniff_cell, CellValue};
/// assert_eq!(sniff_cell("30"), CellValue::Int(30));
/// assert_eq!(sniff_cell("165.5"), CellValue::Float(165.5));
/// assert_eq!(sniff_cell("true"), CellValue::Bool(true));
/// assert_eq!(sniff_cell("Alice"), CellValue::Text("Alice".into()));
/// assert_eq!(sniff_cell(""), CellValue::Null);
/// ```
pub fn sniff_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return CellValue::Int(i);
    }
    // `f64::from_str` also accepts words such as "inf" and "NaN".
    if raw.bytes().any(|b| b.is_ascii_digit())
        && let Ok(x) = raw.parse::<f64>()
    {
        return CellValue::Float(x);
    }
    if let Ok(b) = raw.parse::<bool>() {
        return CellValue::Bool(b);
    }
    CellValue::Text(raw.to_string())
}
