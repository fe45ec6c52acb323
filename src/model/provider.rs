//! Template providers: templates paired with the scopes they may be used in.

use serde::{Deserialize, Serialize};

use super::DocRef;

/// A template provider record, read from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProvider {
    /// The document holding the provider record.
    pub reference: DocRef,

    /// The template document new content is seeded from.
    pub template: Option<DocRef>,

    /// Serialized space references where the template may be used.
    /// Empty means unrestricted.
    pub allowed_scopes: Vec<String>,
}

impl TemplateProvider {
    /// Whether the provider may be used in the given serialized scope.
    #[must_use]
    pub fn allows(&self, scope: &str) -> bool {
        self.allowed_scopes.is_empty() || self.allowed_scopes.iter().any(|s| s == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{SpaceRef, WikiRef};

    fn provider(scopes: &[&str]) -> TemplateProvider {
        let space = SpaceRef::top_level(WikiRef::new("xwiki"), "XWiki");
        TemplateProvider {
            reference: DocRef::new(space, "MyTemplateProvider").unwrap(),
            template: None,
            allowed_scopes: scopes.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn empty_allow_list_is_unrestricted() {
        assert!(provider(&[]).allows("anything"));
    }

    #[test]
    fn allow_list_matches_exact_scope() {
        let p = provider(&["X"]);
        assert!(p.allows("X"));
        assert!(!p.allows("X.Y"));
        assert!(!p.allows("x"));
    }
}
