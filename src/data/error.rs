use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with a single `#KEY=VALUE,...` header line, independent of any file.
#[derive(Debug, Error, PartialEq)]
pub enum HeaderError {
    #[error("header line is empty")]
    Empty,

    #[error("could not parse '{0}' (expected KEY=VALUE)")]
    MalformedToken(String),

    #[error("value '{value}' of {key} is not a number")]
    InvalidValue {
        key: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Failures while reading a parameter header or a data table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter header in '{}'", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },

    #[error("malformed CSV in '{}'", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {row} of '{}' has {found} fields, expected {expected}", .path.display())]
    FieldCount {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} of '{}': {column}='{value}' is not a number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("required parameter '{key}' missing from '{}'", .path.display())]
    MissingParameter { path: PathBuf, key: String },

    #[error("no row with {column} == {value}")]
    NoMatchingRow { column: String, value: f64 },

    #[error("{count} rows have {column} == {value}")]
    AmbiguousRow {
        column: String,
        value: f64,
        count: usize,
    },
}
