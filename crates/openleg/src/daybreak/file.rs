use super::doc_type::DaybreakDocType;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

const REPORT_DATE_FORMAT: &str = "%Y%m%d";
const REPORT_DATE_DIGITS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum DaybreakError {
    #[error("daybreak file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("file {} does not match a daybreak file type", .path.display())]
    UnrecognizedDocType { path: PathBuf },
    #[error("failed to read text from daybreak file: {record}")]
    Read {
        record: String,
        #[source]
        source: std::io::Error,
    },
}

/// A local daybreak file along with the metadata derived from its name and
/// its position in the staging/archival lifecycle.
///
/// Construction checks that the file exists and that its name resolves to a
/// [`DaybreakDocType`]. A name whose date portion does not parse still yields
/// a record, just without a report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaybreakFile {
    file: PathBuf,
    doc_type: DaybreakDocType,
    report_date: Option<NaiveDate>,
    staged: Option<NaiveDateTime>,
    archived: bool,
}

impl DaybreakFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DaybreakError> {
        let path = path.as_ref();
        if !path.exists() {
            let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            return Err(DaybreakError::FileNotFound { path });
        }

        let file_name = base_name(path);
        let doc_type = DaybreakDocType::resolve(&file_name).ok_or_else(|| {
            DaybreakError::UnrecognizedDocType {
                path: path.to_path_buf(),
            }
        })?;
        let report_date = report_date_from_file_name(&file_name, doc_type);

        Ok(Self {
            file: path.to_path_buf(),
            doc_type,
            report_date,
            staged: None,
            archived: false,
        })
    }

    /// Rebuilds a record whose lifecycle state was persisted earlier.
    pub fn with_state<P: AsRef<Path>>(
        path: P,
        staged: Option<NaiveDateTime>,
        archived: bool,
    ) -> Result<Self, DaybreakError> {
        let mut record = Self::open(path)?;
        record.staged = staged;
        record.archived = archived;
        Ok(record)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn file_name(&self) -> String {
        base_name(&self.file)
    }

    pub fn doc_type(&self) -> DaybreakDocType {
        self.doc_type
    }

    pub fn report_date(&self) -> Option<NaiveDate> {
        self.report_date
    }

    /// The report date at midnight, if the file name carried one.
    pub fn report_date_time(&self) -> Option<NaiveDateTime> {
        self.report_date.and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    pub fn staged(&self) -> Option<NaiveDateTime> {
        self.staged
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Reads the whole file. The file existed when the record was built, so a
    /// failure here points at the environment and carries the record along.
    pub fn text(&self) -> Result<String, DaybreakError> {
        std::fs::read_to_string(&self.file).map_err(|source| DaybreakError::Read {
            record: self.to_string(),
            source,
        })
    }

    pub fn set_file(&mut self, file: PathBuf) {
        self.file = file;
    }

    pub fn set_staged(&mut self, staged: Option<NaiveDateTime>) {
        self.staged = staged;
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
    }

    /// Corrects a misclassified record. Type and date always move together so
    /// they cannot disagree.
    pub fn reclassify(&mut self, doc_type: DaybreakDocType, report_date: Option<NaiveDate>) {
        self.doc_type = doc_type;
        self.report_date = report_date;
    }
}

impl fmt::Display for DaybreakFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DaybreakFile {{ report_date: ")?;
        match self.report_date {
            Some(date) => write!(f, "{date}")?,
            None => write!(f, "none")?,
        }
        write!(
            f,
            ", doc_type: {}, file: {}, staged: ",
            self.doc_type,
            self.file.display()
        )?;
        match self.staged {
            Some(staged) => write!(f, "{staged}")?,
            None => write!(f, "none")?,
        }
        write!(f, ", archived: {} }}", self.archived)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Applies the `<yyyyMMdd><suffix>` pattern to a file name. Out-of-range
/// fields are rejected rather than rolled over.
pub(crate) fn report_date_from_file_name(
    file_name: &str,
    doc_type: DaybreakDocType,
) -> Option<NaiveDate> {
    let digits = file_name.strip_suffix(doc_type.local_file_ext())?;

    if digits.len() != REPORT_DATE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        warn!(
            file_name,
            doc_type = doc_type.label(),
            "daybreak file name does not carry a yyyyMMdd report date"
        );
        return None;
    }

    match NaiveDate::parse_from_str(digits, REPORT_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(
                file_name,
                doc_type = doc_type.label(),
                error = %err,
                "invalid report date in daybreak file name"
            );
            None
        }
    }
}
