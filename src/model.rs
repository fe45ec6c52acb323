//! Core data model for Sprout.
//!
//! These types describe a creation request from raw input to final outcome:
//! addresses, input modes, plans, template providers, content, and outcomes.
//! All of them are built fresh per request.

mod address;
mod content;
mod input;
mod outcome;
mod plan;
mod provider;

pub use address::{DocRef, HOMEPAGE, SpaceRef, WikiRef};
pub use content::ContentSnapshot;
pub use input::{InputMode, RequestParams, ToCreate, param};
pub use outcome::{Commit, CreateError, EditLink, Outcome, ScopeViolation};
pub use plan::CreationPlan;
pub use provider::TemplateProvider;
