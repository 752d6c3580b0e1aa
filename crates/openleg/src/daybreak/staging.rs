use super::file::{DaybreakError, DaybreakFile};
use chrono::{Datelike, NaiveDateTime};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const UNDATED_ARCHIVE_DIR: &str = "undated";

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error(transparent)]
    Daybreak(#[from] DaybreakError),
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("destination {} already exists", .path.display())]
    Conflict { path: PathBuf },
    #[error("daybreak file {} is already archived", .path.display())]
    AlreadyArchived { path: PathBuf },
}

impl StagingError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Moves daybreak files through the staging and archive directories. The
/// records themselves never touch the filesystem; this is the one place that
/// does.
#[derive(Debug, Clone)]
pub struct DaybreakStaging {
    staging_dir: PathBuf,
    archive_dir: PathBuf,
}

impl DaybreakStaging {
    pub fn new(staging_dir: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            archive_dir: archive_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Lists the daybreak files waiting in the staging directory, ordered by
    /// report date and then file name. Undated files sort first.
    pub fn collect(&self) -> Result<Vec<DaybreakFile>, StagingError> {
        let entries = match fs::read_dir(&self.staging_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.staging_dir.display(), "staging directory missing");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StagingError::io(&self.staging_dir, err)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StagingError::io(&self.staging_dir, err))?;
            let path = entry.path();
            // follows symlinks; a vanished or dangling entry is skipped
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    warn!(path = %path.display(), "skipping vanished file in staging");
                    continue;
                }
                Err(err) => return Err(StagingError::io(&path, err)),
            };
            if !metadata.is_file() {
                continue;
            }

            match DaybreakFile::open(&path) {
                Ok(record) => records.push(record),
                Err(DaybreakError::UnrecognizedDocType { path }) => {
                    warn!(path = %path.display(), "skipping unrecognized file in staging");
                }
                Err(DaybreakError::FileNotFound { path }) => {
                    warn!(path = %path.display(), "skipping vanished file in staging");
                }
                Err(err) => return Err(err.into()),
            }
        }

        records.sort_by(|a, b| {
            a.report_date()
                .cmp(&b.report_date())
                .then_with(|| a.file_name().cmp(&b.file_name()))
        });
        Ok(records)
    }

    /// Moves an incoming file into staging. The file is classified before it
    /// is moved so an unrecognized file stays where it was. A file already in
    /// the staging directory is only stamped.
    pub fn stage<P: AsRef<Path>>(
        &self,
        source: P,
        staged_at: NaiveDateTime,
    ) -> Result<DaybreakFile, StagingError> {
        let mut record = DaybreakFile::open(source)?;
        let destination = self.staging_dir.join(record.file_name());
        if !is_same_file(record.file(), &destination) {
            fs::create_dir_all(&self.staging_dir)
                .map_err(|err| StagingError::io(&self.staging_dir, err))?;
            move_file(record.file(), &destination)?;
        }

        record.set_file(destination);
        record.set_staged(Some(staged_at));
        info!(record = %record, "staged daybreak file");
        Ok(record)
    }

    /// Moves a record's file under `<archive>/<report year>/` and marks it
    /// archived. Undated records go to `<archive>/undated/`.
    pub fn archive(&self, record: &mut DaybreakFile) -> Result<(), StagingError> {
        if record.is_archived() {
            return Err(StagingError::AlreadyArchived {
                path: record.file().to_path_buf(),
            });
        }

        let bucket = record
            .report_date()
            .map(|date| date.year().to_string())
            .unwrap_or_else(|| UNDATED_ARCHIVE_DIR.to_string());
        let target_dir = self.archive_dir.join(bucket);
        fs::create_dir_all(&target_dir).map_err(|err| StagingError::io(&target_dir, err))?;

        let destination = target_dir.join(record.file_name());
        move_file(record.file(), &destination)?;

        record.set_file(destination);
        record.set_archived(true);
        info!(record = %record, "archived daybreak file");
        Ok(())
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), StagingError> {
    if to.exists() {
        return Err(StagingError::Conflict {
            path: to.to_path_buf(),
        });
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => copy_across_devices(from, to),
        Err(err) => Err(StagingError::io(from, err)),
    }
}

/// Copies then removes the source. When the source cannot be removed the copy
/// is deleted again so a retry does not hit a conflict.
fn copy_across_devices(from: &Path, to: &Path) -> Result<(), StagingError> {
    fs::copy(from, to).map_err(|err| StagingError::io(to, err))?;

    if let Err(err) = fs::remove_file(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            warn!(
                path = %to.display(),
                error = %cleanup,
                "failed to remove copy after an incomplete move"
            );
        }
        return Err(StagingError::io(from, err));
    }
    Ok(())
}
