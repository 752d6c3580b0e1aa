//! CSV manifest used to resume partially processed daybreak batches.
//!
//! Each row records where a file lives and how far it got through the
//! pipeline:
//!
//! ```text
//! file,staged,archived
//! /data/staging/20140915.page_file.txt,2014-09-16T06:30:00,false
//! ```

use super::file::{DaybreakError, DaybreakFile};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::{Read, Write};
use std::path::PathBuf;

const STAGED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid manifest CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid staged timestamp '{value}' on line {line}")]
    Staged {
        value: String,
        line: u64,
        #[source]
        source: chrono::ParseError,
    },
    #[error("failed to write manifest: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file: PathBuf,
    pub staged: Option<NaiveDateTime>,
    pub archived: bool,
}

impl ManifestEntry {
    pub fn from_record(record: &DaybreakFile) -> Self {
        Self {
            file: record.file().to_path_buf(),
            staged: record.staged(),
            archived: record.is_archived(),
        }
    }

    pub fn rehydrate(&self) -> Result<DaybreakFile, DaybreakError> {
        DaybreakFile::with_state(&self.file, self.staged, self.archived)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ManifestRow {
    file: PathBuf,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    staged: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_false")]
    archived: bool,
}

impl From<&ManifestEntry> for ManifestRow {
    fn from(entry: &ManifestEntry) -> Self {
        Self {
            file: entry.file.clone(),
            staged: entry
                .staged
                .map(|staged| staged.format(STAGED_FORMAT).to_string()),
            archived: entry.archived,
        }
    }
}

/// Parses a manifest. Errors carry the physical line number, so blank lines
/// skipped by the reader still count.
pub fn read_manifest<R: Read>(reader: R) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut entries = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: ManifestRow = record.deserialize(Some(&headers))?;

        let staged = match row.staged {
            Some(value) => {
                let parsed = NaiveDateTime::parse_from_str(&value, STAGED_FORMAT)
                    .map_err(|source| ManifestError::Staged {
                        value,
                        line,
                        source,
                    })?;
                Some(parsed)
            }
            None => None,
        };

        entries.push(ManifestEntry {
            file: row.file,
            staged,
            archived: row.archived,
        });
    }

    Ok(entries)
}

pub fn write_manifest<'a, W, I>(writer: W, records: I) -> Result<(), ManifestError>
where
    W: Write,
    I: IntoIterator<Item = &'a DaybreakFile>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        let entry = ManifestEntry::from_record(record);
        csv_writer.serialize(ManifestRow::from(&entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_string_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(false),
        Some(value) => value
            .trim()
            .parse::<bool>()
            .map_err(|_| serde::de::Error::custom(format!("invalid archived flag '{value}'"))),
    }
}
