//! Output formatting for CLI display.

use sprout::model::{Outcome, TemplateProvider};
use sprout::storage::StoredDocument;

/// One-line human summary of an outcome.
pub(super) fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Committed(commit) => {
            let template = commit
                .template
                .as_ref()
                .map_or_else(|| "no template".to_string(), |t| format!("template {t}"));
            format!("create {} from {template}", commit.target)
        }
        Outcome::Incomplete { plan: None, .. } => "incomplete: a name is required".to_string(),
        Outcome::Incomplete {
            plan: Some(plan),
            candidates,
        } if candidates.is_empty() => {
            format!("incomplete: choose a space for '{}'", plan.leaf_name)
        }
        Outcome::Incomplete { candidates, .. } => format!(
            "incomplete: choose a template ({} available): {}",
            candidates.len(),
            format_providers(candidates)
        ),
        Outcome::ScopeViolation(_) | Outcome::Conflict { .. } => outcome
            .error()
            .map(|e| e.to_string())
            .unwrap_or_default(),
    }
}

/// One `document list` line: reference, whether it holds content, last write.
pub(super) fn format_document(document: &StoredDocument) -> String {
    let state = if document.content.is_empty() {
        "empty"
    } else {
        "content"
    };
    format!("{}  [{state}]  {}", document.reference, document.updated_at)
}

pub(super) fn format_providers(providers: &[TemplateProvider]) -> String {
    providers
        .iter()
        .map(|p| p.reference.local())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Allow-list for display: `anywhere` when unrestricted.
pub(super) fn format_scopes(scopes: &[String]) -> String {
    if scopes.is_empty() {
        return "anywhere".to_string();
    }
    scopes.join(", ")
}
