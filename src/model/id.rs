use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a remote resource
///
/// IDs are unique within their kind. System and stargate ID ranges do not
/// overlap in practice, but nothing here depends on that: the two kinds
/// are kept in separate stores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The two kinds of resources the engine fetches
///
/// Systems are listed by the index endpoint and fetched directly;
/// stargates are discovered from the `stargates` field of system records
/// and fetched individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    System,
    Stargate,
}

impl ResourceKind {
    /// Returns the API path segment for this resource kind
    ///
    /// Record requests append `/<id>` to this segment; the index request
    /// for systems uses it as-is.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::System => "universe/systems",
            ResourceKind::Stargate => "universe/stargates",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::System => write!(f, "system"),
            ResourceKind::Stargate => write!(f, "stargate"),
        }
    }
}
