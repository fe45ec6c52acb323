//! Creation plan: where the new node goes and what shape it takes.

use serde::Serialize;

use super::SpaceRef;

/// The resolver's working result.
///
/// `parent_space = None` means "top level": a container created directly
/// under the wiki, or a terminal document with no space to live in yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationPlan {
    pub parent_space: Option<SpaceRef>,
    pub leaf_name: String,
    pub is_container: bool,
}
