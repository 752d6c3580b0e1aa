mod committee;

pub use committee::{Chamber, CommitteeId, CommitteeIdError};
