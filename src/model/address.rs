//! Address types: wikis, spaces, and documents.
//!
//! A space is an ordered chain of name segments rooted at a wiki. Nesting is
//! expressed by the chain itself, so the parent of a space is always
//! computable and equality is structural.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reference::{self, ReferenceError};

/// The reserved page name of a space's homepage.
pub const HOMEPAGE: &str = "WebHome";

/// A top-level partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WikiRef(String);

impl WikiRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WikiRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&reference::escape(&self.0))
    }
}

/// A space: one or more name segments under a wiki.
///
/// Serialized as the full reference string (`wiki:A.B`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpaceRef {
    wiki: WikiRef,
    segments: Vec<String>,
}

impl SpaceRef {
    /// A space directly under the wiki.
    #[must_use]
    pub fn top_level(wiki: WikiRef, name: impl Into<String>) -> Self {
        Self {
            wiki,
            segments: vec![name.into()],
        }
    }

    /// Builds a space from its segments, outermost first.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Empty`] for no segments and
    /// [`ReferenceError::EmptySegment`] if any segment is empty.
    pub fn from_segments(wiki: WikiRef, segments: Vec<String>) -> Result<Self, ReferenceError> {
        if segments.is_empty() {
            return Err(ReferenceError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(ReferenceError::EmptySegment);
        }
        Ok(Self { wiki, segments })
    }

    /// A space nested directly under this one.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self {
            wiki: self.wiki.clone(),
            segments,
        }
    }

    #[must_use]
    pub fn wiki(&self) -> &WikiRef {
        &self.wiki
    }

    /// The innermost segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The enclosing space, or `None` when this space sits directly under the wiki.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_top_level() {
            return None;
        }
        Some(Self {
            wiki: self.wiki.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    /// The wiki-less serialized form, with each segment escaped.
    #[must_use]
    pub fn local(&self) -> String {
        self.segments
            .iter()
            .map(|s| reference::escape(s))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for SpaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.wiki, self.local())
    }
}

impl FromStr for SpaceRef {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = reference::tokenize(s)?;
        let wiki = parsed.wiki.ok_or(ReferenceError::MissingWiki)?;
        Self::from_segments(WikiRef::new(wiki), parsed.segments)
    }
}

impl TryFrom<String> for SpaceRef {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpaceRef> for String {
    fn from(value: SpaceRef) -> Self {
        value.to_string()
    }
}

/// A document: a page name inside a space. The name is never empty.
///
/// Serialized as the full reference string (`wiki:A.B.Page`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocRef {
    space: SpaceRef,
    name: String,
}

impl DocRef {
    /// A document named `name` in `space`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::EmptyName`] if `name` is empty.
    pub fn new(space: SpaceRef, name: impl Into<String>) -> Result<Self, ReferenceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ReferenceError::EmptyName);
        }
        Ok(Self { space, name })
    }

    /// The homepage of a space.
    #[must_use]
    pub fn homepage(space: SpaceRef) -> Self {
        Self {
            space,
            name: HOMEPAGE.to_string(),
        }
    }

    #[must_use]
    pub fn space(&self) -> &SpaceRef {
        &self.space
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn wiki(&self) -> &WikiRef {
        self.space.wiki()
    }

    #[must_use]
    pub fn is_homepage(&self) -> bool {
        self.name == HOMEPAGE
    }

    /// The wiki-less serialized form (`A.B.Page`).
    #[must_use]
    pub fn local(&self) -> String {
        format!("{}.{}", self.space.local(), reference::escape(&self.name))
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.wiki(), self.local())
    }
}

impl FromStr for DocRef {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parsed = reference::tokenize(s)?;
        let wiki = parsed.wiki.ok_or(ReferenceError::MissingWiki)?;
        let name = parsed.segments.pop().ok_or(ReferenceError::Empty)?;
        let space = SpaceRef::from_segments(WikiRef::new(wiki), parsed.segments)
            .map_err(|_| ReferenceError::MissingSpace)?;
        Self::new(space, name)
    }
}

impl TryFrom<String> for DocRef {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocRef> for String {
    fn from(value: DocRef) -> Self {
        value.to_string()
    }
}
