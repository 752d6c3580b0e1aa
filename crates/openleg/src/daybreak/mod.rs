mod doc_type;
mod file;
pub mod manifest;
mod staging;

pub use doc_type::DaybreakDocType;
pub use file::{DaybreakError, DaybreakFile};
pub use manifest::{read_manifest, write_manifest, ManifestEntry, ManifestError};
pub use staging::{DaybreakStaging, StagingError};
