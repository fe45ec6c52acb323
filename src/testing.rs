//! In-memory collaborators for engine tests.

use std::collections::HashMap;

use crate::model::{ContentSnapshot, DocRef, TemplateProvider};
use crate::registry::{ContentStore, LookupError, TemplateRegistry};

/// A wiki held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryWiki {
    documents: HashMap<DocRef, ContentSnapshot>,
    providers: Vec<TemplateProvider>,
    failing: bool,
}

impl MemoryWiki {
    /// A wiki whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_document(self, reference: DocRef, body: &str) -> Self {
        self.with_snapshot(
            reference,
            ContentSnapshot {
                body: body.to_string(),
                objects: Vec::new(),
            },
        )
    }

    pub fn with_snapshot(mut self, reference: DocRef, snapshot: ContentSnapshot) -> Self {
        self.documents.insert(reference, snapshot);
        self
    }

    pub fn with_provider(mut self, provider: TemplateProvider) -> Self {
        self.providers.push(provider);
        self
    }

    fn check(&self) -> Result<(), LookupError> {
        if self.failing {
            return Err(LookupError::Unavailable("backend down".into()));
        }
        Ok(())
    }
}

impl ContentStore for MemoryWiki {
    fn lookup_content(&self, reference: &DocRef) -> Result<Option<ContentSnapshot>, LookupError> {
        self.check()?;
        Ok(self.documents.get(reference).cloned())
    }
}

impl TemplateRegistry for MemoryWiki {
    fn lookup_provider(&self, reference: &DocRef) -> Result<Option<TemplateProvider>, LookupError> {
        self.check()?;
        Ok(self
            .providers
            .iter()
            .find(|p| &p.reference == reference)
            .cloned())
    }

    fn list_provider_candidates(&self) -> Result<Vec<TemplateProvider>, LookupError> {
        self.check()?;
        Ok(self.providers.clone())
    }
}
