use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of daybreak documents delivered by LBDC. Each kind is recognized by
/// the suffix that follows the report date in the local file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaybreakDocType {
    PageFile,
    SenateLow,
    SenateHigh,
    AssemblyLow,
    AssemblyHigh,
}

impl DaybreakDocType {
    /// Resolution order used by [`DaybreakDocType::resolve`].
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PageFile,
            Self::SenateLow,
            Self::SenateHigh,
            Self::AssemblyLow,
            Self::AssemblyHigh,
        ]
    }

    pub const fn local_file_ext(self) -> &'static str {
        match self {
            Self::PageFile => ".page_file.txt",
            Self::SenateLow => ".senate.low.html",
            Self::SenateHigh => ".senate.high.html",
            Self::AssemblyLow => ".assembly.low.html",
            Self::AssemblyHigh => ".assembly.high.html",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PageFile => "page_file",
            Self::SenateLow => "senate_low",
            Self::SenateHigh => "senate_high",
            Self::AssemblyLow => "assembly_low",
            Self::AssemblyHigh => "assembly_high",
        }
    }

    /// Returns the first document type whose suffix ends the given file name.
    pub fn resolve(file_name: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|doc_type| file_name.ends_with(doc_type.local_file_ext()))
    }
}

impl fmt::Display for DaybreakDocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
