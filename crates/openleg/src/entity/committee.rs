use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Chamber {
    Senate,
    Assembly,
}

impl Chamber {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Senate => "SENATE",
            Self::Assembly => "ASSEMBLY",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitteeIdError {
    #[error("committee name cannot be empty")]
    EmptyName,
}

/// Identifies a committee by chamber and its official LBDC name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitteeId {
    chamber: Chamber,
    name: String,
}

impl CommitteeId {
    pub fn new(chamber: Chamber, name: impl Into<String>) -> Result<Self, CommitteeIdError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommitteeIdError::EmptyName);
        }
        Ok(Self { chamber, name })
    }

    pub fn chamber(&self) -> Chamber {
        self.chamber
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CommitteeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.chamber, self.name)
    }
}

// Chambers order by their name text, so ASSEMBLY sorts before SENATE.
impl Ord for CommitteeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chamber
            .name()
            .cmp(other.chamber.name())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for CommitteeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
