//! Content snapshots: what an existing document holds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bodies that count as "no content" when deciding whether a document may be overwritten.
const EMPTY_BODIES: [&str; 3] = ["", "\n", "\\\\"];

/// The content of an existing document.
///
/// Objects keep their removal gaps as `None` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub body: String,
    pub objects: Vec<Option<Value>>,
}

impl ContentSnapshot {
    /// Whether a new document may be created over this one.
    ///
    /// Only the exact literal bodies in `EMPTY_BODIES` qualify, and only when
    /// every attached object slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        EMPTY_BODIES.contains(&self.body.as_str()) && self.objects.iter().all(Option::is_none)
    }
}
