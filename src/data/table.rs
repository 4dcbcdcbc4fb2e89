use std::fs::File;
use std::path::Path;

use super::error::DataError;

// ---------------------------------------------------------------------------
// DataTable – numeric columns read from a simulation output file
// ---------------------------------------------------------------------------

/// Column-oriented numeric table.  Column names come from the caller, the
/// files themselves only carry `#`-prefixed comment lines above the data.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DataTable {
    /// Read every non-comment row of `path` into the named columns.
    ///
    /// Lines starting with `#` (the parameter header and any column-name
    /// line) are skipped, as are blank lines.
    pub fn read(path: &Path, names: &[&str]) -> Result<Self, DataError> {
        let csv_err = |source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

        for result in reader.records() {
            let record = result.map_err(csv_err)?;
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            let row = record.position().map_or(0, |p| p.line() as usize);

            if record.len() != names.len() {
                return Err(DataError::FieldCount {
                    path: path.to_path_buf(),
                    row,
                    expected: names.len(),
                    found: record.len(),
                });
            }

            for ((field, name), column) in record.iter().zip(names).zip(columns.iter_mut()) {
                let value = field.parse::<f64>().map_err(|_| DataError::InvalidNumber {
                    path: path.to_path_buf(),
                    row,
                    column: name.to_string(),
                    value: field.to_string(),
                })?;
                column.push(value);
            }
        }

        log::debug!(
            "Read {} rows of {:?} from {}",
            columns.first().map_or(0, Vec::len),
            names,
            path.display()
        );

        Ok(Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            columns,
        })
    }

    /// Build a table from in-memory columns of equal length.
    #[cfg(test)]
    pub fn from_columns(columns: Vec<(&str, Vec<f64>)>) -> Self {
        let (names, columns) = columns
            .into_iter()
            .map(|(name, values)| (name.to_string(), values))
            .unzip();
        Self { names, columns }
    }

    pub fn column(&self, name: &str) -> Result<&[f64], DataError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest and largest value of a column, `None` for an empty table.
    pub fn range(&self, name: &str) -> Result<Option<(f64, f64)>, DataError> {
        let values = self.column(name)?;
        Ok(values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }))
    }

    pub fn value(&self, name: &str, row: usize) -> Result<f64, DataError> {
        let values = self.column(name)?;
        values
            .get(row)
            .copied()
            .ok_or_else(|| DataError::UnknownColumn(format!("{name}[{row}]")))
    }

    /// Index of the single row whose `column` equals `value`.
    ///
    /// Auxiliary files are written with the same formatting as the primary
    /// table, so the comparison is exact.
    pub fn find_row(&self, column: &str, value: f64) -> Result<usize, DataError> {
        let matches: Vec<usize> = self
            .column(column)?
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == value)
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [row] => Ok(*row),
            [] => Err(DataError::NoMatchingRow {
                column: column.to_string(),
                value,
            }),
            many => Err(DataError::AmbiguousRow {
                column: column.to_string(),
                value,
                count: many.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn sweep() -> DataTable {
        DataTable::from_columns(vec![
            ("phi", vec![0.0, 1.57]),
            ("grid", vec![1.0, 2.0]),
            ("poly", vec![1.1, 2.1]),
        ])
    }

    #[test]
    fn reads_rows_below_comment_lines() {
        let file = write_file("#W0_VAL=183.247172,INT_ID=0\n#pulseWidth,gridMin,polyMin\n1,183.1,183.2\n1.05, 183.3 ,183.4\n");
        let table = DataTable::read(file.path(), &["pulseWidth", "gridSearchMin", "polyFitMin"]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("pulseWidth").unwrap(), &[1.0, 1.05]);
        assert_eq!(table.column("gridSearchMin").unwrap(), &[183.1, 183.3]);
        assert_eq!(table.column("polyFitMin").unwrap(), &[183.2, 183.4]);
    }

    #[test]
    fn header_only_file_yields_empty_table() {
        let file = write_file("#W0_VAL=10.0\n");
        let table = DataTable::read(file.path(), &["w", "zProb"]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column("w").unwrap(), &[] as &[f64]);
        assert_eq!(table.range("w").unwrap(), None);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let file = write_file("#phi=0.5\n1,0.5\n\n2,0.25\n");
        let table = DataTable::read(file.path(), &["w", "zProb"]).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn row_of_empty_fields_is_not_skipped() {
        let file = write_file("#A=1\n1,0.5\n,\n2,0.25\n");
        let err = DataTable::read(file.path(), &["w", "zProb"]).unwrap_err();
        match err {
            DataError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, "w");
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_is_reported() {
        let file = write_file("#A=1\n1,2\n3\n");
        let err = DataTable::read(file.path(), &["w", "zProb"]).unwrap_err();
        assert!(matches!(
            err,
            DataError::FieldCount { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn non_numeric_field_is_reported() {
        let file = write_file("#A=1\n1,abc\n");
        let err = DataTable::read(file.path(), &["w", "zProb"]).unwrap_err();
        match err {
            DataError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, "zProb");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataTable::read(&dir.path().join("nope.txt"), &["w"]).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = sweep().column("pulseWdith").unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn(ref c) if c == "pulseWdith"));
    }

    #[test]
    fn range_spans_column() {
        assert_eq!(sweep().range("grid").unwrap(), Some((1.0, 2.0)));
    }

    #[test]
    fn find_row_returns_unique_match() {
        let table = sweep();
        let row = table.find_row("phi", 1.57).unwrap();
        assert_eq!(row, 1);
        assert_eq!(table.value("grid", row).unwrap(), 2.0);
        assert_eq!(table.value("poly", row).unwrap(), 2.1);
    }

    #[test]
    fn find_row_fails_without_match() {
        let err = sweep().find_row("phi", 3.14).unwrap_err();
        assert!(matches!(err, DataError::NoMatchingRow { .. }));
    }

    #[test]
    fn find_row_rejects_duplicates() {
        let table = DataTable::from_columns(vec![("phi", vec![0.5, 0.5, 1.0])]);
        let err = table.find_row("phi", 0.5).unwrap_err();
        assert!(matches!(err, DataError::AmbiguousRow { count: 2, .. }));
    }
}
