use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::model::Record;

/// Column holding the measurement date.
pub const DATE_COLUMN: &str = "date";
/// Column holding the measured mass.
pub const MASS_COLUMN: &str = "mass";
/// Conventional identifier column of combined files.
pub const DEFAULT_ID_COLUMN: &str = "gecko";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("line {line}: cannot parse date '{value}'")]
    Date { line: u64, value: String },

    #[error("line {line}: cannot parse mass '{value}'")]
    Mass { line: u64, value: String },

    #[error("file contains no records")]
    Empty,

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Layout – where a record's identifier comes from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Layout {
    /// Identifier read from the named column; one file may hold many series.
    Column(String),
    /// Identifier taken from the file name; one file per series.
    #[default]
    FileName,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Series name for a file: its base name without the final extension.
pub fn series_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Load every record of a delimited file.  Dispatch the delimiter by
/// extension.
///
/// Supported formats:
/// * `.tsv` / `.tab` – tab separated
/// * anything else  – comma separated
///
/// Header names and cell values are trimmed. Rows with a blank date or mass
/// are skipped; the whole file fails on the first unparseable one.
pub fn load_file(path: &Path, layout: &Layout) -> Result<Vec<Record>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(LoadError::NotAFile(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    };

    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let records = read_records(reader, path, layout)?;
    if records.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

fn read_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
    layout: &Layout,
) -> Result<Vec<Record>, LoadError> {
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };

    let date_idx = column(DATE_COLUMN)?;
    let mass_idx = column(MASS_COLUMN)?;
    let id_idx = match layout {
        Layout::Column(name) => Some(column(name)?),
        Layout::FileName => None,
    };
    let file_id = series_name(path);

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw_date = row.get(date_idx).unwrap_or("");
        let raw_mass = row.get(mass_idx).unwrap_or("");
        if raw_date.is_empty() || raw_mass.is_empty() {
            log::debug!("{}:{line}: skipping row with a blank date or mass", path.display());
            continue;
        }

        let date = parse_date(raw_date).ok_or_else(|| LoadError::Date {
            line,
            value: raw_date.to_string(),
        })?;

        let mass = raw_mass.parse::<f64>().map_err(|_| LoadError::Mass {
            line,
            value: raw_mass.to_string(),
        })?;

        let identifier = match id_idx {
            Some(idx) => row.get(idx).unwrap_or("").trim().to_string(),
            None => file_id.clone(),
        };

        records.push(Record {
            identifier,
            date,
            mass,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date, dropping any time of day.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
