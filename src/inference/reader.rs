//! Typed reader adapter
//!
//! The [`TypedReader`] trait is the seam between layout detection and the
//! engine that performs the typed read. The pipeline calls it exactly once per
//! run, after format and separator detection, and trusts the reported column
//! names and order verbatim.
//!
//! [`NativeReader`] is the bundled single-process engine.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::types::InferredType;
use crate::models::{AttributeType, Format};

/// Errors reported by a typed reader
#[derive(Error, Debug)]
pub enum ReadError {
    /// The file could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid UTF-8
    #[error("Invalid UTF-8 in {} at byte {offset}", path.display())]
    Encoding { path: PathBuf, offset: usize },

    /// The content does not match the requested container format
    #[error("Malformed {format} content in {} at line {line}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        format: Format,
        line: usize,
        message: String,
    },

    /// The engine cannot split fields on this separator
    #[error("Unsupported separator {separator:?}: only ASCII separators are supported")]
    UnsupportedSeparator { separator: char },

    /// No column could be derived from the file
    #[error("No columns found in {}", path.display())]
    NoColumns { path: PathBuf },
}

/// Options for one typed read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest<'a> {
    /// File to read
    pub path: &'a Path,
    /// Detected container format
    pub format: Format,
    /// Field delimiter (DSV only); `None` reads each line as one column
    pub separator: Option<char>,
    /// Whether the first DSV row holds column names
    pub header: bool,
}

/// One column reported by a typed reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: AttributeType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Engine able to read a file under given options and report its columns
pub trait TypedReader {
    /// Read `request.path` and return its columns in order
    fn read_schema(&self, request: &ReadRequest<'_>) -> Result<Vec<ColumnSchema>, ReadError>;
}

impl<R: TypedReader + ?Sized> TypedReader for &R {
    fn read_schema(&self, request: &ReadRequest<'_>) -> Result<Vec<ColumnSchema>, ReadError> {
        (**self).read_schema(request)
    }
}

/// In-process typed reader for JSON, array JSON and delimited files
#[derive(Debug, Clone, Default)]
pub struct NativeReader {
    /// Maximum number of rows inspected (0 = all)
    max_rows: usize,
}

impl NativeReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of rows inspected for typing (0 = all)
    pub fn with_max_rows(max_rows: usize) -> Self {
        Self { max_rows }
    }

    fn row_limit(&self) -> usize {
        if self.max_rows == 0 {
            usize::MAX
        } else {
            self.max_rows
        }
    }

    fn read_json_lines(&self, path: &Path, content: &str) -> Result<Vec<ColumnSchema>, ReadError> {
        let mut columns = BTreeMap::new();

        for (index, line) in content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .take(self.row_limit())
        {
            let value: Value = serde_json::from_str(line).map_err(|e| ReadError::Malformed {
                path: path.to_path_buf(),
                format: Format::Json,
                line: index + 1,
                message: e.to_string(),
            })?;
            merge_object(path, Format::Json, index + 1, &value, &mut columns)?;
        }

        finish_json(path, columns)
    }

    fn read_json_array(&self, path: &Path, content: &str) -> Result<Vec<ColumnSchema>, ReadError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ReadError::Malformed {
            path: path.to_path_buf(),
            format: Format::ArrayJson,
            line: e.line(),
            message: e.to_string(),
        })?;

        let Value::Array(records) = value else {
            return Err(ReadError::Malformed {
                path: path.to_path_buf(),
                format: Format::ArrayJson,
                line: 1,
                message: "document is not an array".to_string(),
            });
        };

        let mut columns = BTreeMap::new();
        for (index, record) in records.iter().take(self.row_limit()).enumerate() {
            merge_object(path, Format::ArrayJson, index + 1, record, &mut columns)?;
        }

        finish_json(path, columns)
    }

    fn read_dsv(
        &self,
        path: &Path,
        content: &str,
        separator: Option<char>,
        header: bool,
    ) -> Result<Vec<ColumnSchema>, ReadError> {
        let Some(separator) = separator else {
            return self.read_single_column(path, content, header);
        };
        if !separator.is_ascii() {
            return Err(ReadError::UnsupportedSeparator { separator });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(separator as u8)
            .has_headers(header)
            .flexible(true)
            .from_reader(content.as_bytes());

        let header_names: Vec<String> = if header {
            reader
                .headers()
                .map_err(|e| csv_error(path, e))?
                .iter()
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        let mut types: Vec<InferredType> = vec![InferredType::Null; header_names.len()];
        let mut rows = 0usize;
        for record in reader.records().take(self.row_limit()) {
            let record = record.map_err(|e| csv_error(path, e))?;
            if types.len() < record.len() {
                types.resize(record.len(), InferredType::Null);
            }
            for (slot, cell) in types.iter_mut().zip(record.iter()) {
                *slot = slot.merge_with(InferredType::of_text(cell));
            }
            rows += 1;
        }
        debug!(path = %path.display(), rows, columns = types.len(), "Scanned delimited rows");

        if types.is_empty() {
            return Err(ReadError::NoColumns {
                path: path.to_path_buf(),
            });
        }

        let names = column_names(&header_names, types.len());
        Ok(names
            .into_iter()
            .zip(types)
            .map(|(name, t)| ColumnSchema::new(name, t.to_attribute_type()))
            .collect())
    }

    /// Undelimited text: every line is one value of a single column
    fn read_single_column(
        &self,
        path: &Path,
        content: &str,
        header: bool,
    ) -> Result<Vec<ColumnSchema>, ReadError> {
        let mut lines = content.lines();
        let name = if header {
            match lines.next() {
                Some(line) => line.to_string(),
                None => {
                    return Err(ReadError::NoColumns {
                        path: path.to_path_buf(),
                    });
                }
            }
        } else {
            String::new()
        };

        let data_type = lines
            .take(self.row_limit())
            .map(InferredType::of_text)
            .fold(InferredType::Null, InferredType::merge_with);

        let names = column_names(&[name], 1);
        Ok(vec![ColumnSchema::new(
            names[0].clone(),
            data_type.to_attribute_type(),
        )])
    }
}

impl TypedReader for NativeReader {
    fn read_schema(&self, request: &ReadRequest<'_>) -> Result<Vec<ColumnSchema>, ReadError> {
        let bytes = std::fs::read(request.path).map_err(|e| ReadError::Io {
            path: request.path.to_path_buf(),
            source: e,
        })?;
        let content = std::str::from_utf8(&bytes).map_err(|e| ReadError::Encoding {
            path: request.path.to_path_buf(),
            offset: e.valid_up_to(),
        })?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        match request.format {
            Format::Json => self.read_json_lines(request.path, content),
            Format::ArrayJson => self.read_json_array(request.path, content),
            Format::Dsv => self.read_dsv(request.path, content, request.separator, request.header),
        }
    }
}

/// Merge the top-level fields of one JSON record into the column map
fn merge_object(
    path: &Path,
    format: Format,
    line: usize,
    value: &Value,
    columns: &mut BTreeMap<String, InferredType>,
) -> Result<(), ReadError> {
    let Value::Object(fields) = value else {
        return Err(ReadError::Malformed {
            path: path.to_path_buf(),
            format,
            line,
            message: "record is not an object".to_string(),
        });
    };

    for (name, field) in fields {
        let observed = InferredType::of_json(field);
        columns
            .entry(name.clone())
            .and_modify(|t| *t = t.merge_with(observed))
            .or_insert(observed);
    }
    Ok(())
}

fn finish_json(
    path: &Path,
    columns: BTreeMap<String, InferredType>,
) -> Result<Vec<ColumnSchema>, ReadError> {
    if columns.is_empty() {
        return Err(ReadError::NoColumns {
            path: path.to_path_buf(),
        });
    }
    Ok(columns
        .into_iter()
        .map(|(name, t)| ColumnSchema::new(name, t.to_attribute_type()))
        .collect())
}

/// Column names for a delimited file
///
/// Missing or blank header names become `_c<index>`; names used more than
/// once get their column index appended. A generated name that collides with
/// a name already taken gets a further `_<n>` suffix until it is free.
fn column_names(header: &[String], width: usize) -> Vec<String> {
    let raw: Vec<String> = (0..width)
        .map(|i| match header.get(i) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("_c{}", i),
        })
        .collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for name in &raw {
        *occurrences.entry(name.as_str()).or_insert(0) += 1;
    }

    // Names that occur once keep their spelling, so reserve them first.
    let mut taken: HashSet<String> = raw
        .iter()
        .filter(|name| occurrences[name.as_str()] == 1)
        .cloned()
        .collect();

    raw.iter()
        .enumerate()
        .map(|(i, name)| {
            if occurrences[name.as_str()] == 1 {
                return name.clone();
            }
            let base = format!("{}{}", name, i);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn csv_error(path: &Path, error: csv::Error) -> ReadError {
    let line = error
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or_default();
    ReadError::Malformed {
        path: path.to_path_buf(),
        format: Format::Dsv,
        line,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    fn read(
        path: &Path,
        format: Format,
        separator: Option<char>,
        header: bool,
    ) -> Result<Vec<ColumnSchema>, ReadError> {
        NativeReader::new().read_schema(&ReadRequest {
            path,
            format,
            separator,
            header,
        })
    }

    #[test]
    fn test_dsv_with_header() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "orders.csv",
            b"id;amount;placed_on;paid\n1;12.5;2024-01-15;true\n2;3;2024-01-16;false\n",
        );

        let columns = read(&path, Format::Dsv, Some(';'), true).unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnSchema::new("id", AttributeType::Long),
                ColumnSchema::new("amount", AttributeType::Double),
                ColumnSchema::new("placed_on", AttributeType::Date),
                ColumnSchema::new("paid", AttributeType::Boolean),
            ]
        );
    }

    #[test]
    fn test_dsv_without_header() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"1,alice\n2,bob,extra\n");

        let columns = read(&path, Format::Dsv, Some(','), false).unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["_c0", "_c1", "_c2"]);
        assert_eq!(columns[0].data_type, AttributeType::Long);
        assert_eq!(columns[1].data_type, AttributeType::String);
    }

    #[test]
    fn test_dsv_quoted_separator() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"name,city\n\"Doe, John\",Paris\n");

        let columns = read(&path, Format::Dsv, Some(','), true).unwrap();
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn test_dsv_header_names_are_made_unique() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"a,a,,b\n1,2,3,4\n");

        let columns = read(&path, Format::Dsv, Some(','), true).unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a0", "a1", "_c2", "b"]);
    }

    #[test]
    fn test_dsv_generated_names_avoid_existing_header_names() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"a,a,a1\n1,2,3\n");

        let columns = read(&path, Format::Dsv, Some(','), true).unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a0", "a1_2", "a1"]);
    }

    #[test]
    fn test_column_names_are_unique() {
        let header: Vec<String> = ["a", "a", "a1", "a1_2", "", "_c4"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let names = column_names(&header, 6);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names[2], "a1");
        assert_eq!(names[3], "a1_2");
    }

    #[test]
    fn test_dsv_blank_column_is_string() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"a,b\n1,\n2,\n");

        let columns = read(&path, Format::Dsv, Some(','), true).unwrap();
        assert_eq!(columns[0].data_type, AttributeType::Long);
        assert_eq!(columns[1].data_type, AttributeType::String);
    }

    #[test]
    fn test_dsv_without_separator_is_single_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "words.txt", b"word\nhello\nworld\n");

        let columns = read(&path, Format::Dsv, None, true).unwrap();
        assert_eq!(columns, vec![ColumnSchema::new("word", AttributeType::String)]);

        let columns = read(&path, Format::Dsv, None, false).unwrap();
        assert_eq!(columns, vec![ColumnSchema::new("_c0", AttributeType::String)]);
    }

    #[test]
    fn test_dsv_non_ascii_separator() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.txt", "a§b\n1§2\n".as_bytes());

        let result = read(&path, Format::Dsv, Some('§'), true);
        assert!(matches!(
            result,
            Err(ReadError::UnsupportedSeparator { separator: '§' })
        ));
    }

    #[test]
    fn test_json_lines_sorted_union() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "events.jsonl",
            b"{\"name\": \"a\", \"count\": 1}\n\n{\"name\": \"b\", \"count\": 1.5, \"tags\": [\"x\"]}\n",
        );

        let columns = read(&path, Format::Json, None, false).unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnSchema::new("count", AttributeType::Double),
                ColumnSchema::new("name", AttributeType::String),
                ColumnSchema::new("tags", AttributeType::Array),
            ]
        );
    }

    #[test]
    fn test_json_lines_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "events.jsonl", b"{\"a\": 1}\n{\"a\": \n");

        let result = read(&path, Format::Json, None, false);
        assert!(matches!(
            result,
            Err(ReadError::Malformed {
                format: Format::Json,
                line: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "people.json",
            b"[\n  {\"id\": 1, \"address\": {\"city\": \"Paris\"}},\n  {\"id\": 2, \"address\": null}\n]",
        );

        let columns = read(&path, Format::ArrayJson, None, false).unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnSchema::new("address", AttributeType::Struct),
                ColumnSchema::new("id", AttributeType::Long),
            ]
        );
    }

    #[test]
    fn test_json_array_of_scalars_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "numbers.json", b"[1, 2, 3]");

        let result = read(&path, Format::ArrayJson, None, false);
        assert!(matches!(result, Err(ReadError::Malformed { .. })));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"a,b\n\xFF,1\n");

        let result = read(&path, Format::Dsv, Some(','), true);
        assert!(matches!(
            result,
            Err(ReadError::Encoding { offset: 4, .. })
        ));
    }

    #[test]
    fn test_max_rows_limits_typing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"v\n1\n2\nthree\n");

        let reader = NativeReader::with_max_rows(2);
        let columns = reader
            .read_schema(&ReadRequest {
                path: &path,
                format: Format::Dsv,
                separator: Some(','),
                header: true,
            })
            .unwrap();
        assert_eq!(columns[0].data_type, AttributeType::Long);

        let columns = read(&path, Format::Dsv, Some(','), true).unwrap();
        assert_eq!(columns[0].data_type, AttributeType::String);
    }
}
