//! Collaborator seams: the template registry and the content store.
//!
//! The engine reads through these traits only. Lookups may be backed by I/O,
//! so they return [`LookupError`]; the engine never propagates one; it logs
//! it and carries on as if the record were absent.

use crate::model::{ContentSnapshot, DocRef, TemplateProvider};
use crate::reference::ReferenceError;
use crate::storage::StorageError;

/// Why a collaborator lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid reference: {0}")]
    Reference(#[from] ReferenceError),

    #[error("lookup unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to template provider records.
pub trait TemplateRegistry {
    /// The provider record held by `reference`, if any.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be read.
    fn lookup_provider(&self, reference: &DocRef) -> Result<Option<TemplateProvider>, LookupError>;

    /// Every provider record, unfiltered. The engine filters by scope.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be read.
    fn list_provider_candidates(&self) -> Result<Vec<TemplateProvider>, LookupError>;
}

/// Read-only access to existing content.
pub trait ContentStore {
    /// The content at `reference`, or `None` if no such document exists.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be read.
    fn lookup_content(&self, reference: &DocRef) -> Result<Option<ContentSnapshot>, LookupError>;
}
