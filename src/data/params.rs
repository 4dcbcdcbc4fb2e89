use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use super::error::{DataError, HeaderError};

// ---------------------------------------------------------------------------
// ParameterSet – the `#KEY=VALUE,...` header of a data file
// ---------------------------------------------------------------------------

/// Simulation parameters taken from the first line of an output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Like [`get`](Self::get) but reports which file lacked the key.
    pub fn require(&self, key: &str, path: &Path) -> Result<f64, DataError> {
        self.get(key).ok_or_else(|| DataError::MissingParameter {
            path: path.to_path_buf(),
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read only the first line of `path` and parse it as a parameter header.
///
/// The file is closed as soon as that line has been read.
pub fn parse_params(path: &Path) -> Result<ParameterSet, DataError> {
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    let line = {
        let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
        let mut line = String::new();
        reader.read_line(&mut line).map_err(io_err)?;
        line
    };

    parse_header_line(&line).map_err(|source| DataError::Header {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a header line such as `#W0_VAL=183.2, PULSE_TIME=4.286`.
///
/// All whitespace is removed first, then the leading comment marker. Every
/// remaining comma-separated token must be exactly one `KEY=VALUE` pair.
pub fn parse_header_line(line: &str) -> Result<ParameterSet, HeaderError> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();

    let mut chars = compact.chars();
    chars.next();
    let body = chars.as_str();
    if body.is_empty() {
        return Err(HeaderError::Empty);
    }

    body.split(',')
        .map(|token| {
            let parts: Vec<&str> = token.split('=').collect();
            let [key, value] = parts[..] else {
                return Err(HeaderError::MalformedToken(token.to_string()));
            };
            let parsed = value
                .parse::<f64>()
                .map_err(|source| HeaderError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    source,
                })?;
            Ok((key.to_string(), parsed))
        })
        .collect()
}
