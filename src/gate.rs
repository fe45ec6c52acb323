//! Template gate: decide whether a plan has enough information to commit.
//!
//! Address completeness and template completeness are separate gates. A plan
//! can name a perfectly good location and still not commit, because the user
//! has not yet picked among the templates available there.
//!
//! The gate runs as a sequence of small steps:
//!
//! 1. [`place`]: turn the plan into a concrete document and scope.
//! 2. [`gate`]: look up the chosen provider and check its scope, then prompt
//!    for a template if none was chosen and some are available.

use tracing::{debug, warn};

use crate::model::{
    CreationPlan, DocRef, RequestParams, ScopeViolation, SpaceRef, TemplateProvider, WikiRef,
    param,
};
use crate::reference::ReferenceResolver;
use crate::registry::TemplateRegistry;

/// Where a plan lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The document to create.
    pub document: DocRef,

    /// The space the new node is placed in, used as the template scope.
    ///
    /// For a container this is its parent; a top-level container is its own scope.
    pub scope: SpaceRef,
}

/// Turn a plan into a concrete document.
///
/// Returns `None` for a terminal document with no space: there is nowhere to
/// put it without more input.
#[must_use]
pub fn place(plan: &CreationPlan, wiki: &WikiRef) -> Option<Placement> {
    if plan.is_container {
        let space = match &plan.parent_space {
            Some(parent) => parent.child(plan.leaf_name.as_str()),
            None => SpaceRef::top_level(wiki.clone(), plan.leaf_name.as_str()),
        };
        return Some(Placement {
            scope: plan.parent_space.clone().unwrap_or_else(|| space.clone()),
            document: DocRef::homepage(space),
        });
    }

    let Some(space) = plan.parent_space.clone() else {
        debug!(name = %plan.leaf_name, "terminal document without a space");
        return None;
    };
    let document = DocRef::new(space.clone(), plan.leaf_name.as_str()).ok()?;
    Some(Placement {
        document,
        scope: space,
    })
}

/// The template parameters of a request.
///
/// A parameter that is present but empty still counts as a choice: the user
/// asked for no template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateChoice<'a> {
    pub provider: Option<&'a str>,
    pub template: Option<&'a str>,
}

impl<'a> TemplateChoice<'a> {
    #[must_use]
    pub fn from_params(params: &'a RequestParams) -> Self {
        Self {
            provider: params.get(param::TEMPLATE_PROVIDER),
            template: params.get(param::TEMPLATE),
        }
    }

    /// Whether the user chose anything, even "no template".
    #[must_use]
    pub fn is_made(&self) -> bool {
        self.provider.is_some() || self.template.is_some()
    }
}

/// Result of the template gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// Go ahead, seeding from `template` if set.
    Proceed {
        template: Option<DocRef>,
        provider: Option<DocRef>,
    },

    /// No template chosen, and some are available here.
    Incomplete { candidates: Vec<TemplateProvider> },

    /// The chosen provider is not allowed here.
    ScopeViolation(ScopeViolation),
}

/// Shared inputs of the gate.
pub struct GateContext<'a> {
    pub references: &'a dyn ReferenceResolver,
    pub registry: &'a dyn TemplateRegistry,

    /// Local reference of the registry's placeholder provider, never offered.
    pub placeholder: &'a str,
}

/// Run the template gate for a placed plan.
#[must_use]
pub fn gate(
    plan: &CreationPlan,
    placement: &Placement,
    choice: TemplateChoice<'_>,
    ctx: &GateContext<'_>,
) -> GateResult {
    let scope = ctx.references.serialize_space(&placement.scope);

    let provider = choice
        .provider
        .filter(|p| !p.is_empty())
        .and_then(|p| lookup_provider(p, ctx));

    if let Some(provider) = &provider
        && !provider.allows(&scope)
    {
        debug!(provider = %provider.reference, %scope, "template provider not allowed here");
        return GateResult::ScopeViolation(ScopeViolation {
            provider: provider.clone(),
            scope: placement.scope.clone(),
            leaf_name: plan.leaf_name.clone(),
        });
    }

    if !choice.is_made() {
        let candidates = providers_in_scope(ctx.registry, &scope, ctx.placeholder);
        if !candidates.is_empty() {
            debug!(%scope, count = candidates.len(), "templates available, none chosen");
            return GateResult::Incomplete { candidates };
        }
    }

    let template = match &provider {
        Some(provider) => provider.template.clone(),
        None => choice
            .template
            .filter(|t| !t.is_empty())
            .and_then(|t| match ctx.references.resolve_document(t) {
                Ok(reference) => Some(reference),
                Err(e) => {
                    warn!(template = t, error = %e, "could not resolve template reference");
                    None
                }
            }),
    };

    GateResult::Proceed {
        template,
        provider: provider.map(|p| p.reference),
    }
}

/// Providers usable in `scope`: unrestricted ones plus those listing it.
///
/// The registry placeholder is never included. A failed listing yields none.
#[must_use]
pub fn providers_in_scope(
    registry: &dyn TemplateRegistry,
    scope: &str,
    placeholder: &str,
) -> Vec<TemplateProvider> {
    let providers = match registry.list_provider_candidates() {
        Ok(providers) => providers,
        Err(e) => {
            warn!(scope, error = %e, "could not list template providers");
            return Vec::new();
        }
    };

    providers
        .into_iter()
        .filter(|p| p.reference.local() != placeholder)
        .filter(|p| p.allows(scope))
        .collect()
}

/// Resolve and load a provider record. Failures count as "no record".
fn lookup_provider(input: &str, ctx: &GateContext<'_>) -> Option<TemplateProvider> {
    let reference = match ctx.references.resolve_document(input) {
        Ok(reference) => reference,
        Err(e) => {
            warn!(provider = input, error = %e, "could not resolve template provider reference");
            return None;
        }
    };

    match ctx.registry.lookup_provider(&reference) {
        Ok(Some(provider)) => Some(provider),
        Ok(None) => {
            debug!(provider = %reference, "no template provider record");
            None
        }
        Err(e) => {
            warn!(provider = %reference, error = %e, "could not load template provider");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::reference::ContextResolver;
    use crate::testing::MemoryWiki;

    const PLACEHOLDER: &str = "XWiki.TemplateProviderTemplate";

    fn wiki() -> WikiRef {
        WikiRef::new("xwiki")
    }

    fn space(segments: &[&str]) -> SpaceRef {
        SpaceRef::from_segments(wiki(), segments.iter().map(ToString::to_string).collect())
            .unwrap()
    }

    fn doc(segments: &[&str], name: &str) -> DocRef {
        DocRef::new(space(segments), name).unwrap()
    }

    fn provider(name: &str, scopes: &[&str]) -> TemplateProvider {
        TemplateProvider {
            reference: doc(&["XWiki"], name),
            template: Some(doc(&["XWiki"], name.trim_end_matches("Provider"))),
            allowed_scopes: scopes.iter().map(ToString::to_string).collect(),
        }
    }

    fn plan(parent: Option<&[&str]>, name: &str, is_container: bool) -> CreationPlan {
        CreationPlan {
            parent_space: parent.map(space),
            leaf_name: name.to_string(),
            is_container,
        }
    }

    fn run(plan: &CreationPlan, choice: TemplateChoice<'_>, registry: &MemoryWiki) -> GateResult {
        let references = ContextResolver::new(&doc(&["Main"], "WebHome"));
        let placement = place(plan, &wiki()).unwrap();
        let ctx = GateContext {
            references: &references,
            registry,
            placeholder: PLACEHOLDER,
        };
        gate(plan, &placement, choice, &ctx)
    }

    // ── place ──

    #[test]
    fn container_nests_under_parent() {
        let placement = place(&plan(Some(&["X"]), "Y", true), &wiki()).unwrap();
        assert_eq!(placement.document, DocRef::homepage(space(&["X", "Y"])));
        assert_eq!(placement.scope, space(&["X"]));
    }

    #[test]
    fn top_level_container_nests_under_wiki() {
        let placement = place(&plan(None, "X", true), &wiki()).unwrap();
        assert_eq!(placement.document, DocRef::homepage(space(&["X"])));
        assert_eq!(placement.scope, space(&["X"]));
    }

    #[test]
    fn terminal_lands_in_parent() {
        let placement = place(&plan(Some(&["X", "Y"]), "Z", false), &wiki()).unwrap();
        assert_eq!(placement.document, doc(&["X", "Y"], "Z"));
        assert_eq!(placement.scope, space(&["X", "Y"]));
    }

    #[test]
    fn terminal_without_space_cannot_be_placed() {
        assert!(place(&plan(None, "X", false), &wiki()).is_none());
    }

    // ── gate ──

    #[test]
    fn no_providers_proceeds_without_template() {
        let result = run(
            &plan(Some(&["X"]), "Y", true),
            TemplateChoice::default(),
            &MemoryWiki::default(),
        );
        assert_eq!(
            result,
            GateResult::Proceed {
                template: None,
                provider: None
            }
        );
    }

    #[test]
    fn unchosen_providers_block_commit() {
        let registry = MemoryWiki::default().with_provider(provider("MyTemplateProvider", &[]));
        let result = run(
            &plan(Some(&["X"]), "Y", true),
            TemplateChoice::default(),
            &registry,
        );
        assert_eq!(
            result,
            GateResult::Incomplete {
                candidates: vec![provider("MyTemplateProvider", &[])]
            }
        );
    }

    #[test]
    fn providers_for_other_scopes_do_not_block() {
        let registry = MemoryWiki::default().with_provider(provider("MyTemplateProvider", &["Z"]));
        let result = run(
            &plan(Some(&["X"]), "Y", true),
            TemplateChoice::default(),
            &registry,
        );
        assert!(matches!(result, GateResult::Proceed { .. }));
    }

    #[test]
    fn placeholder_provider_is_never_offered() {
        let registry =
            MemoryWiki::default().with_provider(provider("TemplateProviderTemplate", &[]));
        let result = run(
            &plan(Some(&["X"]), "Y", true),
            TemplateChoice::default(),
            &registry,
        );
        assert!(matches!(result, GateResult::Proceed { .. }));
    }

    #[test]
    fn empty_template_parameter_counts_as_a_choice() {
        let registry = MemoryWiki::default().with_provider(provider("MyTemplateProvider", &[]));
        let choice = TemplateChoice {
            provider: None,
            template: Some(""),
        };
        let result = run(&plan(Some(&["X"]), "Y", true), choice, &registry);
        assert_eq!(
            result,
            GateResult::Proceed {
                template: None,
                provider: None
            }
        );
    }

    #[test]
    fn chosen_provider_supplies_template() {
        let registry = MemoryWiki::default().with_provider(provider("MyTemplateProvider", &[]));
        let choice = TemplateChoice {
            provider: Some("XWiki.MyTemplateProvider"),
            template: None,
        };
        let result = run(&plan(Some(&["X"]), "Y", true), choice, &registry);
        assert_eq!(
            result,
            GateResult::Proceed {
                template: Some(doc(&["XWiki"], "MyTemplate")),
                provider: Some(doc(&["XWiki"], "MyTemplateProvider")),
            }
        );
    }

    #[test]
    fn chosen_provider_allowed_in_parent_scope() {
        let registry = MemoryWiki::default().with_provider(provider("MyTemplateProvider", &["X"]));
        let choice = TemplateChoice {
            provider: Some("XWiki.MyTemplateProvider"),
            template: None,
        };
        let result = run(&plan(Some(&["X"]), "Y", true), choice, &registry);
        assert!(matches!(result, GateResult::Proceed { .. }));
    }

    #[test]
    fn chosen_provider_outside_scope_is_a_violation() {
        let registry =
            MemoryWiki::default().with_provider(provider("MyTemplateProvider", &["AnythingButX"]));
        let choice = TemplateChoice {
            provider: Some("XWiki.MyTemplateProvider"),
            template: None,
        };
        let result = run(&plan(Some(&["X"]), "Y", true), choice, &registry);
        assert_eq!(
            result,
            GateResult::ScopeViolation(ScopeViolation {
                provider: provider("MyTemplateProvider", &["AnythingButX"]),
                scope: space(&["X"]),
                leaf_name: "Y".into(),
            })
        );
    }

    #[test]
    fn unknown_provider_falls_back_to_template_parameter() {
        let choice = TemplateChoice {
            provider: Some("XWiki.Missing"),
            template: Some("XWiki.MyTemplate"),
        };
        let result = run(
            &plan(Some(&["X"]), "Y", true),
            choice,
            &MemoryWiki::default(),
        );
        assert_eq!(
            result,
            GateResult::Proceed {
                template: Some(doc(&["XWiki"], "MyTemplate")),
                provider: None,
            }
        );
    }

    #[test]
    fn provider_template_wins_over_template_parameter() {
        let registry = MemoryWiki::default().with_provider(provider("MyTemplateProvider", &[]));
        let choice = TemplateChoice {
            provider: Some("XWiki.MyTemplateProvider"),
            template: Some("XWiki.Other"),
        };
        let result = run(&plan(Some(&["X"]), "Y", true), choice, &registry);
        let GateResult::Proceed { template, .. } = result else {
            panic!("expected to proceed");
        };
        assert_eq!(template, Some(doc(&["XWiki"], "MyTemplate")));
    }

    #[test]
    fn failed_registry_behaves_as_empty() {
        let result = run(
            &plan(Some(&["X"]), "Y", true),
            TemplateChoice::default(),
            &MemoryWiki::failing(),
        );
        assert_eq!(
            result,
            GateResult::Proceed {
                template: None,
                provider: None
            }
        );
    }

    #[test]
    fn scope_filter_uses_serialized_space() {
        let registry = MemoryWiki::default()
            .with_provider(provider("AProvider", &[r"X\.Y"]))
            .with_provider(provider("BProvider", &["X.Y"]));
        let found = providers_in_scope(&registry, r"X\.Y", PLACEHOLDER);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reference.name(), "AProvider");
    }
}
