//! Dataset loading: raw bytes to a typed [`Table`].
//!
//! Decoding tries strict UTF-8 first and falls back to Latin-1, which accepts
//! every byte sequence, so decoding itself practically never fails; only a
//! malformed tabular structure (ragged records) is surfaced as an error.
//! Column types are inferred here, once, and recorded on the table so the
//! profiler never has to re-derive them.

use std::borrow::Cow;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{CsvSightError, Result};
use crate::models::{CellValue, Column, DataType, Table};

/// Field values decoded as missing cells, matching the conventional NA
/// spellings of the usual CSV producers.
const NA_TOKENS: [&str; 8] = ["NA", "N/A", "#N/A", "NaN", "nan", "NULL", "null", "None"];

/// Delimiters considered during auto-detection.
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of lines sampled for delimiter detection.
const DETECTION_SAMPLE_LINES: usize = 10;

/// Loader settings.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter; `None` enables auto-detection
    pub delimiter: Option<u8>,
    /// Trim whitespace around fields
    pub trim: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim: true,
        }
    }
}

impl LoaderConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set an explicit delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Builder method to enable or disable field trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Loads a delimited text file from disk.
pub fn load_path(path: &Path, config: &LoaderConfig) -> Result<Table> {
    let bytes = std::fs::read(path)
        .map_err(|e| CsvSightError::io(format!("Failed to read {}", path.display()), e))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    load_bytes(&name, &bytes, config)
}

/// Loads a delimited text dataset from an in-memory byte stream.
pub fn load_bytes(name: &str, bytes: &[u8], config: &LoaderConfig) -> Result<Table> {
    let text = decode_text(bytes);
    let delimiter = config
        .delimiter
        .unwrap_or_else(|| detect_delimiter(&text));

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(if config.trim { Trim::All } else { Trim::None })
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CsvSightError::parse_failed("Failed to read header record", e))?
        .clone();

    // An empty input has no columns at all; a lone empty header is the same
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        tracing::debug!(source = name, "input has no columns");
        return Table::new(name, vec![]);
    }

    let names = dedupe_headers(&headers);
    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            CsvSightError::parse_failed(format!("Failed to parse record {}", index + 1), e)
        })?;
        for (column, field) in record.iter().enumerate() {
            raw_columns[column].push(decode_field(field));
        }
    }

    let columns = names
        .into_iter()
        .zip(raw_columns)
        .map(|(column_name, raw)| {
            let data_type = infer_column_type(&raw);
            let cells = materialize_cells(data_type, raw);
            Column::new(column_name, data_type, cells)
        })
        .collect();

    let table = Table::new(name, columns)?;
    tracing::info!(
        source = name,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded dataset"
    );
    Ok(table)
}

/// Decodes input bytes with the primary encoding, retrying with the fallback.
///
/// UTF-8 is attempted first; invalid UTF-8 is re-decoded as Latin-1, which
/// maps every byte to a character and therefore cannot fail.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::debug!("input is not valid UTF-8, retrying with Latin-1");
            encoding_rs::mem::decode_latin1(bytes)
        }
    }
}

/// Picks the delimiter whose per-line counts are most consistent across a
/// sample of the input.
fn detect_delimiter(content: &str) -> u8 {
    let sample_lines: Vec<&str> = content.lines().take(DETECTION_SAMPLE_LINES).collect();
    if sample_lines.is_empty() {
        return b',';
    }

    let mut best_delimiter = b',';
    let mut best_score = 0.0f64;

    for &delimiter in &DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delimiter).count())
            .collect();

        // Score by frequency discounted by inconsistency across lines
        let avg = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - avg).powi(2))
            .sum::<f64>()
            / counts.len() as f64;
        let score = avg / (1.0 + variance.sqrt());

        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

/// Makes header names unique the way the original tooling does: the second
/// occurrence of `a` becomes `a.1`, the third `a.2`.
fn dedupe_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let base = header.to_string();
        let mut candidate = base.clone();
        let mut suffix = 0usize;
        while names.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", base, suffix);
        }
        names.push(candidate);
    }
    names
}

/// Maps a raw field to `None` for missing cells, `Some` otherwise.
fn decode_field(field: &str) -> Option<String> {
    if field.is_empty() || NA_TOKENS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

/// Value classes recognized during type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueClass {
    Numeric,
    Boolean,
    Temporal,
    Text,
}

fn classify(value: &str) -> ValueClass {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return ValueClass::Boolean;
    }
    if let Ok(number) = value.parse::<f64>() {
        if number.is_finite() {
            return ValueClass::Numeric;
        }
    }
    if parse_temporal(value).is_some() {
        return ValueClass::Temporal;
    }
    ValueClass::Text
}

/// Parses the timestamp and date layouts the loader recognizes.
fn parse_temporal(value: &str) -> Option<chrono::NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime);
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Infers the column type from its non-missing raw values.
///
/// A column whose values all share one class gets that class as its type; a
/// mixture is `Mixed`. An entirely-missing column is `Numeric`, matching the
/// original tooling's treatment of all-NA columns.
fn infer_column_type(raw: &[Option<String>]) -> DataType {
    let mut class: Option<ValueClass> = None;
    for value in raw.iter().flatten() {
        let value_class = classify(value);
        match class {
            None => class = Some(value_class),
            Some(existing) if existing == value_class => {}
            Some(_) => return DataType::Mixed,
        }
    }

    match class {
        None | Some(ValueClass::Numeric) => DataType::Numeric,
        Some(ValueClass::Boolean) => DataType::Boolean,
        Some(ValueClass::Temporal) => DataType::Temporal,
        Some(ValueClass::Text) => DataType::Text,
    }
}

/// Materializes typed cells for a column of the given inferred type.
fn materialize_cells(data_type: DataType, raw: Vec<Option<String>>) -> Vec<CellValue> {
    raw.into_iter()
        .map(|value| match value {
            None => CellValue::Missing,
            Some(text) => match data_type {
                DataType::Numeric => text
                    .parse::<f64>()
                    .map_or_else(|_| CellValue::Text(text), CellValue::Number),
                DataType::Boolean => CellValue::Boolean(text.eq_ignore_ascii_case("true")),
                DataType::Temporal => parse_temporal(&text)
                    .map_or_else(|| CellValue::Text(text), CellValue::Temporal),
                DataType::Text | DataType::Mixed => CellValue::Text(text),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Table {
        load_bytes("test.csv", content.as_bytes(), &LoaderConfig::default()).unwrap()
    }

    #[test]
    fn test_load_simple_csv() {
        let table = load("name,age\nAlice,30\nBob,25\n");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns()[0].data_type, DataType::Text);
        assert_eq!(table.columns()[1].data_type, DataType::Numeric);
        assert_eq!(table.columns()[1].cells[0], CellValue::Number(30.0));
    }

    #[test]
    fn test_load_latin1_fallback() {
        // "José" encoded as Latin-1 is invalid UTF-8
        let bytes = b"name,city\nJos\xe9,NY\n";
        let table = load_bytes("latin1.csv", bytes, &LoaderConfig::default()).unwrap();
        assert_eq!(table.columns()[0].cells[0], CellValue::Text("José".to_string()));
    }

    #[test]
    fn test_ragged_record_is_parse_error() {
        let result = load_bytes(
            "ragged.csv",
            b"a,b\n1,2\n3\n",
            &LoaderConfig::default(),
        );
        assert!(matches!(result, Err(CsvSightError::Parse { .. })));
    }

    #[test]
    fn test_na_tokens_become_missing() {
        let table = load("value\n1\nNA\nnull\n2\n");
        let column = &table.columns()[0];
        assert_eq!(column.data_type, DataType::Numeric);
        assert_eq!(column.missing_count(), 2);
        assert_eq!(column.non_missing_count(), 2);
    }

    #[test]
    fn test_empty_field_becomes_missing() {
        let table = load("a,b\n1,\n2,x\n");
        assert_eq!(table.columns()[1].missing_count(), 1);
    }

    #[test]
    fn test_boolean_inference() {
        let table = load("flag\ntrue\nFalse\nTRUE\n");
        let column = &table.columns()[0];
        assert_eq!(column.data_type, DataType::Boolean);
        assert_eq!(column.cells[1], CellValue::Boolean(false));
    }

    #[test]
    fn test_temporal_inference() {
        let table = load("when\n2024-01-02\n2024-03-04\n");
        assert_eq!(table.columns()[0].data_type, DataType::Temporal);
    }

    #[test]
    fn test_mixed_inference() {
        let table = load("value\n1\nhello\n2\n");
        let column = &table.columns()[0];
        assert_eq!(column.data_type, DataType::Mixed);
        // Mixed columns keep the raw text of every value
        assert_eq!(column.cells[0], CellValue::Text("1".to_string()));
    }

    #[test]
    fn test_all_missing_column_is_numeric() {
        let table = load("a,b\n1,\n2,NA\n");
        assert_eq!(table.columns()[1].data_type, DataType::Numeric);
        assert_eq!(table.columns()[1].missing_count(), 2);
    }

    #[test]
    fn test_delimiter_auto_detection() {
        let table = load("a;b;c\n1;2;3\n4;5;6\n");
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_explicit_delimiter() {
        let config = LoaderConfig::new().with_delimiter(b'|');
        let table = load_bytes("pipes.csv", b"a|b\n1|2\n", &config).unwrap();
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_duplicate_headers_are_mangled() {
        let table = load("a,a,a\n1,2,3\n");
        assert_eq!(table.column_names(), vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        let table = load("");
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_headers_only_input() {
        let table = load("a,b\n");
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_trimming_enabled_by_default() {
        let table = load("name , age\n Alice , 30\n");
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(
            table.columns()[0].cells[0],
            CellValue::Text("Alice".to_string())
        );
    }

    #[test]
    fn test_detect_delimiter_prefers_consistency() {
        assert_eq!(detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(detect_delimiter("a\tb\nc\td"), b'\t');
    }

    #[test]
    fn test_classify_values() {
        assert_eq!(classify("3.5"), ValueClass::Numeric);
        assert_eq!(classify("-7"), ValueClass::Numeric);
        assert_eq!(classify("true"), ValueClass::Boolean);
        assert_eq!(classify("2024-01-01"), ValueClass::Temporal);
        assert_eq!(classify("hello"), ValueClass::Text);
        // Non-finite numerics would poison statistics and stay text
        assert_eq!(classify("inf"), ValueClass::Text);
    }

    #[test]
    fn test_parse_temporal_formats() {
        assert!(parse_temporal("2024-01-02").is_some());
        assert!(parse_temporal("2024-01-02T10:30:00").is_some());
        assert!(parse_temporal("2024-01-02 10:30:00").is_some());
        assert!(parse_temporal("01/15/2024").is_some());
        assert!(parse_temporal("not a date").is_none());
    }
}
