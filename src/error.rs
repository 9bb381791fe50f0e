//! Error types for export, import and table construction.
//!
//! Export failures ([`ExportError`]) abort the whole call. Field coercion
//! failures ([`FieldError`]) are collected per cell by the importer and
//! reported as [`ImportError`](crate::ImportError)s.

use crate::type_token::TypeTag;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// Boxed error returned by user-supplied converters and parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure to append a row to a [`Table`](crate::Table).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row length ({actual}) does not match headers length ({expected})")]
    RowLength { actual: usize, expected: usize },
}

/// A failure while turning records into rows.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("input slice is empty")]
    EmptyInput,

    #[error("error getting values for item {index}")]
    Item {
        index: usize,
        #[source]
        source: Box<ExportError>,
    },

    #[error("mismatch between headers ({headers}) and values ({values}) for item {index}")]
    LengthMismatch {
        index: usize,
        headers: usize,
        values: usize,
    },

    #[error("error converting custom type {target} in column '{column}'")]
    Convert {
        column: String,
        target: TypeTag,
        #[source]
        source: BoxError,
    },

    #[error("no converter registered for {target} in column '{column}'")]
    Unregistered { column: String, target: TypeTag },

    #[error("value of {target} in column '{column}' does not fit a 64-bit integer cell")]
    OutOfRange { column: String, target: TypeTag },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// A failure to write one raw cell value into a record field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no such field: {0}")]
    NoSuchField(String),

    #[error("not a struct: {target} has no field '{segment}'")]
    NotARecord { segment: String, target: TypeTag },

    #[error("value is not a string (got {0})")]
    NotText(&'static str),

    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),

    #[error(transparent)]
    ParseBool(#[from] ParseBoolError),

    #[error(transparent)]
    ParseTimestamp(#[from] chrono::ParseError),

    #[error("error parsing custom type {target}: {source}")]
    Custom {
        target: TypeTag,
        #[source]
        source: BoxError,
    },

    #[error("parser registered for {0} produced a value of another type")]
    ParserMismatch(TypeTag),

    #[error("unsupported struct type: {0}")]
    UnsupportedRecord(TypeTag),

    #[error("unsupported type: {0}")]
    Unsupported(TypeTag),
}
