//! Calendar export import.
//!
//! The export is a CSV file written by a desktop calendar, usually with a few
//! lines of preamble before the real header row. Column names are fixed.

use crate::class::{ClassRecord, SubjectIndex};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const SUBJECT_COLUMN: &str = "Betreff";
pub const START_DATE_COLUMN: &str = "Beginnt am";
pub const START_TIME_COLUMN: &str = "Beginnt um";
pub const LOCATION_COLUMN: &str = "Ort";
pub const DESCRIPTION_COLUMN: &str = "Beschreibung";

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "could not find CSV header (a line containing '{}' and '{}')",
        SUBJECT_COLUMN,
        START_DATE_COLUMN
    )]
    HeaderNotFound,
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Text encodings tried in order when reading an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    pub const CANDIDATES: [TextEncoding; 2] = [TextEncoding::Utf8, TextEncoding::Latin1];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Returns `None` when `bytes` are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .ok()
                .map(|text| text.strip_prefix('\u{feff}').unwrap_or(text).to_string()),
            TextEncoding::Latin1 => Some(decode_latin1(bytes)),
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decodes with the first candidate encoding that accepts the whole input.
pub fn decode_text(bytes: &[u8]) -> (TextEncoding, String) {
    for encoding in TextEncoding::CANDIDATES {
        if let Some(text) = encoding.decode(bytes) {
            return (encoding, text);
        }
    }
    (TextEncoding::Latin1, decode_latin1(bytes))
}

/// Byte offset of the first line that carries both key column names.
pub fn find_header_offset(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.contains(SUBJECT_COLUMN) && line.contains(START_DATE_COLUMN) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

#[derive(Debug, Deserialize)]
struct CalendarRow {
    #[serde(rename = "Betreff", default)]
    subject: Option<String>,
    #[serde(rename = "Beginnt am", default)]
    start_date: Option<String>,
    #[serde(rename = "Beginnt um", default)]
    start_time: Option<String>,
    #[serde(rename = "Ort", default)]
    location: Option<String>,
    #[serde(rename = "Beschreibung", default)]
    description: Option<String>,
}

#[derive(Debug, Error)]
enum RowError {
    #[error("invalid start date '{value}': {source}")]
    Date {
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid start time '{value}': {source}")]
    Time {
        value: String,
        source: chrono::ParseError,
    },
    #[error("missing start time")]
    MissingTime,
}

impl CalendarRow {
    /// `Ok(None)` for rows without subject or start date; those are not errors.
    fn into_record(self) -> Result<Option<ClassRecord>, RowError> {
        let subject = match non_blank(self.subject) {
            Some(s) => s,
            None => return Ok(None),
        };
        let date_raw = match non_blank(self.start_date) {
            Some(s) => s,
            None => return Ok(None),
        };
        let start_date = NaiveDate::parse_from_str(date_raw.trim(), DATE_FORMAT).map_err(|source| {
            RowError::Date {
                value: date_raw.clone(),
                source,
            }
        })?;
        let time_raw = non_blank(self.start_time).ok_or(RowError::MissingTime)?;
        let start_time = NaiveTime::parse_from_str(time_raw.trim(), TIME_FORMAT).map_err(|source| {
            RowError::Time {
                value: time_raw.clone(),
                source,
            }
        })?;

        Ok(Some(ClassRecord {
            subject,
            start_date,
            start_time,
            location: non_blank(self.location),
            description: non_blank(self.description),
        }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Result of reading one calendar export.
#[derive(Debug, Clone)]
pub struct ClassImport {
    pub classes: Vec<ClassRecord>,
    pub subjects: SubjectIndex,
    pub encoding: TextEncoding,
    pub skipped_rows: usize,
}

pub fn import_classes<P: AsRef<Path>>(path: P) -> ImportResult<ClassImport> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (encoding, text) = decode_text(&bytes);
    debug!(path = %path.display(), encoding = encoding.as_str(), "decoded calendar export");

    let mut import = parse_classes(&text)?;
    import.encoding = encoding;
    info!(
        path = %path.display(),
        classes = import.classes.len(),
        subjects = import.subjects.len(),
        skipped = import.skipped_rows,
        "imported calendar export"
    );
    Ok(import)
}

/// Parses already-decoded export text. Bad rows are logged and skipped.
pub fn parse_classes(text: &str) -> ImportResult<ClassImport> {
    let offset = find_header_offset(text).ok_or(ImportError::HeaderNotFound)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text[offset..].as_bytes());

    let mut classes = Vec::new();
    let mut skipped_rows = 0;
    for (row_idx, row) in reader.deserialize::<CalendarRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(row = row_idx + 1, error = %err, "skipping unreadable row");
                skipped_rows += 1;
                continue;
            }
        };
        match row.into_record() {
            Ok(Some(record)) => classes.push(record),
            Ok(None) => {}
            Err(err) => {
                warn!(row = row_idx + 1, error = %err, "skipping row due to parsing error");
                skipped_rows += 1;
            }
        }
    }

    let subjects = SubjectIndex::from_records(&classes);
    Ok(ClassImport {
        classes,
        subjects,
        encoding: TextEncoding::Utf8,
        skipped_rows,
    })
}
