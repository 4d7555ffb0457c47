use crate::model::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A fetched resource document
///
/// The engine stores records verbatim and interprets only two fields:
/// the human-readable `name` (used for progress logging) and the optional
/// `stargates` array of referenced stargate IDs. Everything else passes
/// through to the snapshot untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(Map<String, Value>);

impl ResourceRecord {
    /// Returns the record's display label, if present
    ///
    /// Records without a `name` field are still valid; callers fall back
    /// to the resource ID for logging.
    pub fn label(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Returns the stargate IDs referenced by this record
    ///
    /// A missing or non-array `stargates` field means zero references.
    /// Non-integer entries in the array are ignored.
    pub fn stargate_refs(&self) -> Vec<ResourceId> {
        self.0
            .get("stargates")
            .and_then(Value::as_array)
            .map(|refs| {
                refs.iter()
                    .filter_map(Value::as_u64)
                    .map(ResourceId)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns a raw field value by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Map<String, Value>> for ResourceRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
