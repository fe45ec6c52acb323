//! Conflict detection: refuse to create over a document that has content.

use tracing::{debug, warn};

use crate::model::DocRef;
use crate::registry::ContentStore;

/// Check `target` against existing content.
///
/// Returns the existing reference when the target holds content. A missing
/// document, an empty one, or a failed lookup is not a conflict.
#[must_use]
pub fn check(target: &DocRef, store: &dyn ContentStore) -> Option<DocRef> {
    let snapshot = match store.lookup_content(target) {
        Ok(snapshot) => snapshot?,
        Err(e) => {
            warn!(target = %target, error = %e, "could not look up existing content");
            return None;
        }
    };

    if snapshot.is_empty() {
        debug!(target = %target, "existing document is empty, overwriting");
        return None;
    }

    Some(target.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{ContentSnapshot, SpaceRef, WikiRef};
    use crate::testing::MemoryWiki;

    fn target() -> DocRef {
        DocRef::homepage(SpaceRef::top_level(WikiRef::new("xwiki"), "Main"))
    }

    #[test]
    fn missing_document_is_not_a_conflict() {
        let wiki = MemoryWiki::default();
        assert_eq!(check(&target(), &wiki), None);
    }

    #[test]
    fn document_with_content_conflicts() {
        let wiki = MemoryWiki::default().with_document(target(), "Some non-empty content");
        assert_eq!(check(&target(), &wiki), Some(target()));
    }

    #[test]
    fn empty_document_may_be_overwritten() {
        let wiki = MemoryWiki::default().with_document(target(), "\n");
        assert_eq!(check(&target(), &wiki), None);
    }

    #[test]
    fn objects_make_an_empty_body_conflict() {
        let snapshot = ContentSnapshot {
            body: String::new(),
            objects: vec![None, Some(serde_json::json!({"tag": "x"}))],
        };
        let wiki = MemoryWiki::default().with_snapshot(target(), snapshot);
        assert_eq!(check(&target(), &wiki), Some(target()));
    }

    #[test]
    fn failed_lookup_is_not_a_conflict() {
        let wiki = MemoryWiki::failing();
        assert_eq!(check(&target(), &wiki), None);
    }

    #[test]
    fn repeated_checks_agree() {
        let wiki = MemoryWiki::default().with_document(target(), "content");
        let first = check(&target(), &wiki);
        let second = check(&target(), &wiki);
        assert_eq!(first, second);
    }
}
