//! Outcome: the terminal state of a creation request.

use std::fmt;

use serde::Serialize;

use super::{CreationPlan, DocRef, SpaceRef, TemplateProvider};

/// How a creation request ended.
///
/// Every variant other than `Committed` carries what the caller needs to
/// render a corrective prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    /// The target is settled; go edit it.
    Committed(Commit),

    /// More input is needed: a name, a space, or a template choice.
    Incomplete {
        /// The plan so far, when one could be computed.
        plan: Option<CreationPlan>,

        /// Template providers to choose from. Empty when the missing piece is
        /// the address itself.
        candidates: Vec<TemplateProvider>,
    },

    /// The chosen template may not be used at the target location.
    ScopeViolation(ScopeViolation),

    /// The target already holds content.
    Conflict { existing: DocRef },
}

impl Outcome {
    /// The user-facing error for the outcome, if it is an error state.
    #[must_use]
    pub fn error(&self) -> Option<CreateError> {
        match self {
            Self::Committed(_) | Self::Incomplete { .. } => None,
            Self::ScopeViolation(violation) => Some(CreateError::TemplateNotAvailable {
                template: violation
                    .provider
                    .template
                    .as_ref()
                    .map(DocRef::local)
                    .unwrap_or_default(),
                space: violation.scope.clone(),
                name: violation.leaf_name.clone(),
                allowed_spaces: violation.provider.allowed_scopes.clone(),
            }),
            Self::Conflict { existing } => Some(CreateError::DocumentNotEmpty {
                existing: existing.clone(),
            }),
        }
    }

    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// A settled creation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub target: DocRef,

    /// The template to seed the new document from.
    pub template: Option<DocRef>,

    /// The provider the template came from, if one was chosen.
    pub provider: Option<DocRef>,

    /// Display title: the leaf name, never the homepage name.
    pub title: String,

    /// The `type` parameter, uninterpreted.
    pub content_type: Option<String>,
}

impl Commit {
    /// The pieces of the edit view URL for the new document.
    #[must_use]
    pub fn edit_link(&self) -> EditLink {
        EditLink {
            space: self.target.space().local(),
            page: self.target.name().to_string(),
            action: "edit",
            query: format!(
                "template={}&title={}",
                self.template.as_ref().map(DocRef::local).unwrap_or_default(),
                self.title
            ),
        }
    }
}

/// A template used outside its allowed scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeViolation {
    pub provider: TemplateProvider,
    pub scope: SpaceRef,
    pub leaf_name: String,
}

/// Where to send the user once a target is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditLink {
    pub space: String,
    pub page: String,
    pub action: &'static str,
    pub query: String,
}

impl fmt::Display for EditLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}/{}?{}",
            self.action, self.space, self.page, self.query
        )
    }
}

/// Errors surfaced to the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum CreateError {
    #[error("template {template} cannot be used in space {space} when creating page {name}")]
    #[serde(rename_all = "camelCase")]
    TemplateNotAvailable {
        template: String,
        space: SpaceRef,
        name: String,
        allowed_spaces: Vec<String>,
    },

    #[error("cannot create document {existing} because it already has content")]
    DocumentNotEmpty { existing: DocRef },
}
