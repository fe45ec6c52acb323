//! Address resolution: from an input mode to a creation plan.
//!
//! Each input convention has its own branch. The branches disagree on the
//! default shape of the new node:
//!
//! - `NewNode` follows the URL: a homepage means a container, anything else a leaf.
//!   `tocreate` can flip that default, one direction per starting shape.
//! - `CanonicalUi` creates containers unless `tocreate=terminal`.
//! - `LegacyUi` creates leaves unless `tocreate=space`, and never nests spaces.

use tracing::{debug, warn};

use crate::model::{CreationPlan, DocRef, InputMode, SpaceRef, ToCreate, WikiRef};
use crate::reference::ReferenceResolver;

/// Compute the creation plan for a request.
///
/// Returns `None` when there is no leaf name to create: nothing can be
/// committed and the caller should prompt for a name.
#[must_use]
pub fn resolve(
    mode: &InputMode,
    to_create: Option<ToCreate>,
    wiki: &WikiRef,
    references: &dyn ReferenceResolver,
) -> Option<CreationPlan> {
    let plan = match mode {
        InputMode::NewNode { current } => from_new_node(current, to_create),
        InputMode::CanonicalUi {
            space_param,
            name_param,
        } => from_canonical(
            space_param.as_deref(),
            name_param.as_deref(),
            to_create,
            references,
        ),
        InputMode::LegacyUi {
            space_param,
            page_param,
        } => from_legacy(
            space_param.as_deref(),
            page_param.as_deref(),
            to_create,
            wiki,
        ),
    };

    if plan.leaf_name.is_empty() {
        debug!("no name for the new node");
        return None;
    }
    Some(plan)
}

fn from_new_node(current: &DocRef, to_create: Option<ToCreate>) -> CreationPlan {
    let space = current.space();

    let mut plan = if current.is_homepage() {
        // A homepage stands for its space: create the space itself, under its
        // parent. A top-level space is left without a parent until the gate
        // nests it under the wiki, so a new `X.WebHome` commits as space `X`
        // rather than asking for a location.
        CreationPlan {
            parent_space: space.parent(),
            leaf_name: space.name().to_string(),
            is_container: true,
        }
    } else {
        CreationPlan {
            parent_space: Some(space.clone()),
            leaf_name: current.name().to_string(),
            is_container: false,
        }
    };

    // The override only flips the default. It never supplies the parent a
    // top-level homepage lacks, so `terminal` there stays unresolvable.
    match to_create {
        Some(ToCreate::Terminal) if plan.is_container => plan.is_container = false,
        Some(ToCreate::NonTerminal) if !plan.is_container => plan.is_container = true,
        _ => {}
    }

    plan
}

fn from_canonical(
    space_param: Option<&str>,
    name_param: Option<&str>,
    to_create: Option<ToCreate>,
    references: &dyn ReferenceResolver,
) -> CreationPlan {
    // An empty space means top level.
    let parent_space = space_param
        .filter(|s| !s.is_empty())
        .and_then(|s| match references.resolve_space(s) {
            Ok(space) => Some(space),
            Err(e) => {
                warn!(space = s, error = %e, "could not resolve space reference");
                None
            }
        });

    CreationPlan {
        parent_space,
        leaf_name: name_param.unwrap_or_default().to_string(),
        is_container: to_create != Some(ToCreate::Terminal),
    }
}

fn from_legacy(
    space_param: Option<&str>,
    page_param: Option<&str>,
    to_create: Option<ToCreate>,
    wiki: &WikiRef,
) -> CreationPlan {
    // The legacy space parameter is a literal name, not a reference.
    let space_name = space_param.unwrap_or_default();

    if to_create == Some(ToCreate::Space) {
        return CreationPlan {
            parent_space: None,
            leaf_name: space_name.to_string(),
            is_container: true,
        };
    }

    CreationPlan {
        parent_space: (!space_name.is_empty())
            .then(|| SpaceRef::top_level(wiki.clone(), space_name)),
        leaf_name: page_param.unwrap_or_default().to_string(),
        is_container: false,
    }
}
