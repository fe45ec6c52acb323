//! Creation requests: run the full pipeline for one request.
//!
//! ```text
//! normalize → resolve → place → gate → conflict check → Outcome
//! ```
//!
//! Strictly forward. Each stage either hands on to the next or ends the
//! request with a non-committed outcome.

use tracing::debug;

use crate::conflict;
use crate::gate::{self, GateContext, GateResult, TemplateChoice};
use crate::model::{Commit, DocRef, Outcome, RequestParams, ToCreate, param};
use crate::normalize::normalize;
use crate::reference::ReferenceResolver;
use crate::registry::{ContentStore, TemplateRegistry};
use crate::resolve::resolve;

/// Local reference of the registry scaffolding record.
pub const DEFAULT_PLACEHOLDER_PROVIDER: &str = "XWiki.TemplateProviderTemplate";

/// One creation request.
#[derive(Debug, Clone)]
pub struct CreateRequest<'a> {
    /// The document the request was made on.
    pub current: &'a DocRef,

    /// Whether `current` already exists.
    pub exists: bool,

    pub params: &'a RequestParams,
}

/// Everything the pipeline reads from outside the request.
pub struct Collaborators<'a> {
    pub references: &'a dyn ReferenceResolver,
    pub registry: &'a dyn TemplateRegistry,
    pub store: &'a dyn ContentStore,

    /// Local reference of the placeholder provider to leave out of listings.
    pub placeholder: &'a str,
}

/// Resolve a creation request to its outcome.
#[must_use]
pub fn resolve_creation(request: &CreateRequest<'_>, env: &Collaborators<'_>) -> Outcome {
    let params = request.params;
    let wiki = request.current.wiki();

    let mode = normalize(request.current, request.exists, params);
    debug!(?mode, "normalized request");

    let to_create = ToCreate::from_param(params.get(param::TOCREATE));
    let Some(plan) = resolve(&mode, to_create, wiki, env.references) else {
        return Outcome::Incomplete {
            plan: None,
            candidates: Vec::new(),
        };
    };
    debug!(?plan, "resolved plan");

    let Some(placement) = gate::place(&plan, wiki) else {
        return Outcome::Incomplete {
            plan: Some(plan),
            candidates: Vec::new(),
        };
    };

    let ctx = GateContext {
        references: env.references,
        registry: env.registry,
        placeholder: env.placeholder,
    };
    let (template, provider) =
        match gate::gate(&plan, &placement, TemplateChoice::from_params(params), &ctx) {
            GateResult::Proceed { template, provider } => (template, provider),
            GateResult::Incomplete { candidates } => {
                return Outcome::Incomplete {
                    plan: Some(plan),
                    candidates,
                };
            }
            GateResult::ScopeViolation(violation) => return Outcome::ScopeViolation(violation),
        };

    if let Some(existing) = conflict::check(&placement.document, env.store) {
        debug!(existing = %existing, "target already has content");
        return Outcome::Conflict { existing };
    }

    debug!(target = %placement.document, "committed");
    Outcome::Committed(Commit {
        target: placement.document,
        template,
        provider,
        title: plan.leaf_name,
        content_type: params.get(param::TYPE).map(String::from),
    })
}
