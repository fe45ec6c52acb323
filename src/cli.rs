//! CLI interface for Sprout.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//!
//! - `sprout resolve` — run a creation request against the local wiki.
//! - `sprout document ...` — manage existing content.
//! - `sprout provider ...` — manage template providers.
//!
//! References may be full (`wiki:Space.Page`) or local (`Space.Page`); local
//! ones resolve in the configured default wiki, and bare page names land in
//! `Main`.

mod format;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use sprout::config::Config;
use sprout::create::{Collaborators, CreateRequest, resolve_creation};
use sprout::gate::providers_in_scope;
use sprout::model::{
    ContentSnapshot, CreateError, DocRef, Outcome, RequestParams, SpaceRef, TemplateProvider,
    WikiRef,
};
use sprout::reference::{ContextResolver, ReferenceResolver};
use sprout::storage::Storage;

use format::{format_document, format_outcome, format_providers, format_scopes};

/// Sprout — decide where a new wiki page goes.
#[derive(Debug, Parser)]
#[command(name = "sprout", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: creating a page
  1. sprout provider add XWiki.BlogPostProvider --template XWiki.BlogPostTemplate --scope Blog
  2. sprout resolve Main.WebHome -p spaceReference=Blog -p name=Launch
     → incomplete: choose a template (1 available): XWiki.BlogPostProvider
  3. sprout resolve Main.WebHome -p spaceReference=Blog -p name=Launch \
       -p templateprovider=XWiki.BlogPostProvider
     → create xwiki:Blog.Launch.WebHome from template xwiki:XWiki.BlogPostTemplate

From a URL to a page that doesn't exist yet:
  sprout resolve X.Y.WebHome -p tocreate=terminal";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a creation request.
    ///
    /// Prints the outcome as JSON to stdout (or `--out`), with a summary on stderr.
    Resolve {
        /// The document the request was made on.
        current: String,

        /// Request parameter as `name=value` (e.g. `tocreate=terminal`). Repeatable.
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,

        /// Treat the current document as not existing yet, whatever storage says.
        #[arg(long)]
        new: bool,

        /// Write the outcome JSON to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage existing documents.
    Document {
        #[command(subcommand)]
        command: DocumentCommand,
    },

    /// Manage template providers.
    Provider {
        #[command(subcommand)]
        command: ProviderCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum DocumentCommand {
    /// Store a document, replacing existing content.
    Put {
        reference: String,

        /// Document body.
        #[arg(long, default_value = "")]
        content: String,

        /// Attached object as JSON; `null` records a removal gap. Repeatable.
        #[arg(long = "object")]
        objects: Vec<String>,
    },

    /// Print a stored document as JSON.
    Show { reference: String },

    /// List stored documents.
    List,

    /// Delete a stored document.
    Delete { reference: String },
}

#[derive(Debug, Subcommand)]
pub enum ProviderCommand {
    /// Register a template provider.
    Add {
        reference: String,

        /// The template document the provider offers.
        #[arg(long)]
        template: Option<String>,

        /// Space where the template may be used. Repeatable; none means anywhere.
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },

    /// List template providers.
    List {
        /// Only providers usable in this space.
        #[arg(long)]
        scope: Option<String>,
    },

    /// Remove a template provider.
    Remove { reference: String },
}

/// Outcome plus the error the create form would display.
#[derive(Serialize)]
struct Report<'a> {
    result: &'a Outcome,
    error: Option<CreateError>,
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();
    let references = base_resolver(config);

    match cli.command {
        Command::Resolve {
            current,
            params,
            new,
            out,
        } => {
            let current = parse_document(&references, &current)?;
            cmd_resolve(config, storage, &current, &params, new, out)
        }
        Command::Document { command } => match command {
            DocumentCommand::Put {
                reference,
                content,
                objects,
            } => {
                let reference = parse_document(&references, &reference)?;
                cmd_document_put(storage, &reference, content, &objects)
            }
            DocumentCommand::Show { reference } => {
                cmd_document_show(storage, &parse_document(&references, &reference)?)
            }
            DocumentCommand::List => cmd_document_list(storage),
            DocumentCommand::Delete { reference } => {
                let reference = parse_document(&references, &reference)?;
                storage
                    .delete_document(&reference)
                    .map_err(|e| format!("failed to delete {reference}: {e}"))
            }
        },
        Command::Provider { command } => match command {
            ProviderCommand::Add {
                reference,
                template,
                scopes,
            } => {
                let provider = TemplateProvider {
                    reference: parse_document(&references, &reference)?,
                    template: template
                        .map(|t| parse_document(&references, &t))
                        .transpose()?,
                    allowed_scopes: scopes,
                };
                storage
                    .put_provider(&provider)
                    .map_err(|e| format!("failed to register provider: {e}"))
            }
            ProviderCommand::List { scope } => {
                cmd_provider_list(config, storage, &references, scope.as_deref())
            }
            ProviderCommand::Remove { reference } => {
                let reference = parse_document(&references, &reference)?;
                storage
                    .remove_provider(&reference)
                    .map_err(|e| format!("failed to remove {reference}: {e}"))
            }
        },
    }
}

fn cmd_resolve(
    config: &Config,
    storage: &Storage,
    current: &DocRef,
    raw_params: &[String],
    new: bool,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let params = parse_params(raw_params);
    let outcome = resolve_against(config, storage, current, &params, new)?;

    let report = Report {
        result: &outcome,
        error: outcome.error(),
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("failed to serialize outcome: {e}"))?;

    match out {
        Some(path) => {
            fs::write(&path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Outcome written to {}", path.display());
        }
        None => println!("{json}"),
    }

    eprintln!("{}", format_outcome(&outcome));
    if let Outcome::Committed(commit) = &outcome {
        eprintln!("Edit: {}", commit.edit_link());
    }

    Ok(())
}

fn cmd_document_put(
    storage: &Storage,
    reference: &DocRef,
    body: String,
    raw_objects: &[String],
) -> Result<(), String> {
    let objects = parse_objects(raw_objects)?;

    storage
        .put_document(reference, &ContentSnapshot { body, objects })
        .map_err(|e| format!("failed to store {reference}: {e}"))?;

    eprintln!("Stored {reference}");
    Ok(())
}

fn cmd_document_show(storage: &Storage, reference: &DocRef) -> Result<(), String> {
    let document = storage
        .load_document(reference)
        .map_err(|e| format!("failed to load {reference}: {e}"))?
        .ok_or_else(|| format!("no document at {reference}"))?;

    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| format!("failed to serialize document: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_document_list(storage: &Storage) -> Result<(), String> {
    let documents = storage
        .list_documents()
        .map_err(|e| format!("failed to list documents: {e}"))?;

    if documents.is_empty() {
        println!("No documents");
        return Ok(());
    }

    for d in &documents {
        println!("{}", format_document(d));
    }

    Ok(())
}

fn cmd_provider_list(
    config: &Config,
    storage: &Storage,
    references: &ContextResolver,
    scope: Option<&str>,
) -> Result<(), String> {
    let providers = match scope {
        Some(scope) => {
            let space = references
                .resolve_space(scope)
                .map_err(|e| format!("invalid space '{scope}': {e}"))?;
            let scope = references.serialize_space(&space);
            let found = providers_in_scope(storage, &scope, &config.placeholder_provider);
            eprintln!("Usable in {space}: {}", format_providers(&found));
            found
        }
        None => storage
            .list_providers()
            .map_err(|e| format!("failed to list providers: {e}"))?,
    };

    if providers.is_empty() {
        println!("No template providers");
        return Ok(());
    }

    for p in &providers {
        let template = p
            .template
            .as_ref()
            .map_or_else(|| "-".to_string(), DocRef::local);
        println!(
            "{}  template={template}  scopes={}",
            p.reference.local(),
            format_scopes(&p.allowed_scopes)
        );
    }

    Ok(())
}

/// Run the engine for `current` against storage.
///
/// `new` forces the current document to count as missing, whatever is stored.
fn resolve_against(
    config: &Config,
    storage: &Storage,
    current: &DocRef,
    params: &RequestParams,
    new: bool,
) -> Result<Outcome, String> {
    let exists = !new
        && storage
            .load_document(current)
            .map_err(|e| format!("failed to look up {current}: {e}"))?
            .is_some();

    let references = ContextResolver::new(current);
    let env = Collaborators {
        references: &references,
        registry: storage,
        store: storage,
        placeholder: &config.placeholder_provider,
    };
    let request = CreateRequest {
        current,
        exists,
        params,
    };
    Ok(resolve_creation(&request, &env))
}

/// Collect `name=value` arguments. A later repeat of a name wins.
fn parse_params(raw: &[String]) -> RequestParams {
    raw.iter().map(|p| RequestParams::parse_pair(p)).collect()
}

/// Parse `--object` arguments. JSON `null` is a removal gap.
fn parse_objects(raw: &[String]) -> Result<Vec<Option<Value>>, String> {
    raw.iter()
        .map(|o| {
            serde_json::from_str::<Value>(o)
                .map(|v| (!v.is_null()).then_some(v))
                .map_err(|e| format!("invalid object JSON '{o}': {e}"))
        })
        .collect()
}

/// Resolver for references typed on the command line.
fn base_resolver(config: &Config) -> ContextResolver {
    let main = SpaceRef::top_level(WikiRef::new(config.default_wiki.as_str()), "Main");
    ContextResolver::new(&DocRef::homepage(main))
}

fn parse_document(references: &ContextResolver, input: &str) -> Result<DocRef, String> {
    references
        .resolve_document(input)
        .map_err(|e| format!("invalid document reference '{input}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path().join("wiki.sqlite")).unwrap();
        (dir, storage)
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn document(references: &ContextResolver, input: &str) -> DocRef {
        parse_document(references, input).unwrap()
    }

    #[test]
    fn params_keep_empty_values() {
        let params = parse_params(&args(&["name=Y", "template=", "tocreate"]));
        assert_eq!(params.get("name"), Some("Y"));
        assert_eq!(params.get("template"), Some(""));
        assert_eq!(params.get("tocreate"), Some(""));
    }

    #[test]
    fn params_later_value_wins() {
        let params = parse_params(&args(&["name=A", "name=B"]));
        assert_eq!(params.get("name"), Some("B"));
    }

    #[test]
    fn null_object_is_a_gap() {
        let objects = parse_objects(&args(&["null", r#"{"class":"XWiki.TagClass"}"#])).unwrap();
        assert_eq!(objects, vec![None, Some(json!({"class": "XWiki.TagClass"}))]);
    }

    #[test]
    fn invalid_object_json_rejected() {
        let err = parse_objects(&args(&["{nope"])).unwrap_err();
        assert!(err.starts_with("invalid object JSON '{nope'"));
    }

    #[test]
    fn local_references_land_in_default_wiki() {
        let references = base_resolver(&Config::default());
        assert_eq!(
            document(&references, "Sandbox").to_string(),
            "xwiki:Main.Sandbox"
        );
        assert_eq!(document(&references, "X.Y").to_string(), "xwiki:X.Y");
    }

    #[test]
    fn stored_document_counts_as_existing() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let references = base_resolver(&config);
        let current = document(&references, "X.Y");
        storage
            .put_document(&current, &ContentSnapshot::default())
            .unwrap();

        // Existing current page, no name: nothing to create yet.
        let outcome =
            resolve_against(&config, &storage, &current, &RequestParams::new(), false).unwrap();
        assert_eq!(
            outcome,
            Outcome::Incomplete {
                plan: None,
                candidates: vec![]
            }
        );
    }

    #[test]
    fn new_flag_overrides_stored_existence() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let references = base_resolver(&config);
        let current = document(&references, "X.Y");
        storage
            .put_document(&current, &ContentSnapshot::default())
            .unwrap();

        let outcome =
            resolve_against(&config, &storage, &current, &RequestParams::new(), true).unwrap();
        let Outcome::Committed(commit) = outcome else {
            panic!("expected a commit");
        };
        assert_eq!(commit.target, current);
    }

    #[test]
    fn stored_providers_drive_the_prompt() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let references = base_resolver(&config);
        let provider = TemplateProvider {
            reference: document(&references, "XWiki.MyTemplateProvider"),
            template: Some(document(&references, "XWiki.MyTemplate")),
            allowed_scopes: vec![],
        };
        storage.put_provider(&provider).unwrap();

        let outcome = resolve_against(
            &config,
            &storage,
            &document(&references, "X.Y"),
            &RequestParams::new(),
            false,
        )
        .unwrap();
        assert_eq!(
            format_outcome(&outcome),
            "incomplete: choose a template (1 available): XWiki.MyTemplateProvider"
        );
    }
}
