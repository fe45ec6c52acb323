//! Reference syntax: parsing and serializing addresses.
//!
//! ```text
//! wiki:Space1.Space2.Page
//! ```
//!
//! `:` closes the wiki part, `.` separates segments, and `\` escapes
//! either separator (or itself) inside a segment. Parsing is relative: parts
//! left out of the input are filled from the document the request runs on.

use crate::model::{DocRef, SpaceRef, WikiRef};

/// Why a reference string could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference is empty")]
    Empty,

    #[error("reference contains an empty segment")]
    EmptySegment,

    #[error("document name is empty")]
    EmptyName,

    #[error("reference has no wiki")]
    MissingWiki,

    #[error("document reference has no space")]
    MissingSpace,
}

/// Parses and serializes references.
///
/// The engine only sees this trait; [`ContextResolver`] is the standard syntax.
pub trait ReferenceResolver {
    /// Parse a space reference, possibly nested (`A.B`).
    ///
    /// # Errors
    ///
    /// Fails on empty input or an empty segment.
    fn resolve_space(&self, input: &str) -> Result<SpaceRef, ReferenceError>;

    /// Parse a document reference (`A.B.Page`).
    ///
    /// # Errors
    ///
    /// Fails on empty input, an empty segment, or an empty page name.
    fn resolve_document(&self, input: &str) -> Result<DocRef, ReferenceError>;

    /// The local (wiki-less) string form of a space, used as a template scope.
    fn serialize_space(&self, space: &SpaceRef) -> String {
        space.local()
    }
}

/// Resolves references relative to the space of the current document.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    space: SpaceRef,
}

impl ContextResolver {
    /// A resolver that fills missing parts from `current`.
    #[must_use]
    pub fn new(current: &DocRef) -> Self {
        Self {
            space: current.space().clone(),
        }
    }

    fn wiki_or_current(&self, wiki: Option<String>) -> WikiRef {
        wiki.map_or_else(|| self.space.wiki().clone(), WikiRef::new)
    }
}

impl ReferenceResolver for ContextResolver {
    fn resolve_space(&self, input: &str) -> Result<SpaceRef, ReferenceError> {
        let tokens = tokenize(input)?;
        let wiki = self.wiki_or_current(tokens.wiki);
        SpaceRef::from_segments(wiki, tokens.segments)
    }

    fn resolve_document(&self, input: &str) -> Result<DocRef, ReferenceError> {
        let mut tokens = tokenize(input)?;
        let wiki = self.wiki_or_current(tokens.wiki);
        let name = tokens.segments.pop().ok_or(ReferenceError::Empty)?;
        let segments = if tokens.segments.is_empty() {
            self.space.segments().to_vec()
        } else {
            tokens.segments
        };
        DocRef::new(SpaceRef::from_segments(wiki, segments)?, name)
    }
}

/// A reference split into its raw parts, escapes removed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Tokens {
    pub wiki: Option<String>,
    pub segments: Vec<String>,
}

/// Split a reference string on unescaped separators.
///
/// Only a `:` before the first `.` closes the wiki part. Segments may come
/// back empty; callers decide whether that is acceptable.
pub(crate) fn tokenize(input: &str) -> Result<Tokens, ReferenceError> {
    if input.is_empty() {
        return Err(ReferenceError::Empty);
    }

    let mut wiki = None;
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            ':' if wiki.is_none() && segments.is_empty() => {
                if current.is_empty() {
                    return Err(ReferenceError::EmptySegment);
                }
                wiki = Some(std::mem::take(&mut current));
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    // A trailing lone backslash is kept literally.
    if escaped {
        current.push('\\');
    }
    segments.push(current);

    Ok(Tokens { wiki, segments })
}

/// Escape the separator characters of a single segment.
pub(crate) fn escape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if matches!(c, '\\' | '.' | ':') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
