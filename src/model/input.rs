//! Request input: raw parameters and the input mode they select.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DocRef;

/// Wire names of the recognized request parameters.
pub mod param {
    /// `terminal`, `nonterminal`, or `space`.
    pub const TOCREATE: &str = "tocreate";

    /// Nested space path of the new node.
    pub const SPACE_REFERENCE: &str = "spaceReference";

    /// Name of the new node.
    pub const NAME: &str = "name";

    /// Deprecated: literal, unescaped top-level space name.
    pub const SPACE: &str = "space";

    /// Deprecated: page name.
    pub const PAGE: &str = "page";

    /// Opaque content-type tag, passed through.
    pub const TYPE: &str = "type";

    /// Raw template document reference.
    pub const TEMPLATE: &str = "template";

    /// Template provider document reference.
    pub const TEMPLATE_PROVIDER: &str = "templateprovider";
}

/// Flat request parameters, name to value.
///
/// A parameter that is present with an empty value is distinct from one
/// that is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, String>);

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The value, treating an empty string as absent.
    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Parse a `name=value` pair. A missing `=` yields an empty value.
    #[must_use]
    pub fn parse_pair(pair: &str) -> (String, String) {
        match pair.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The `tocreate` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToCreate {
    /// A leaf document.
    Terminal,

    /// A container with a homepage.
    NonTerminal,

    /// A top-level container, legacy spelling.
    Space,
}

impl ToCreate {
    /// Parse the raw parameter. Blank and unknown values are treated as absent.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        match value? {
            "terminal" => Some(Self::Terminal),
            "nonterminal" => Some(Self::NonTerminal),
            "space" => Some(Self::Space),
            _ => None,
        }
    }
}

/// Which input convention a request follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum InputMode {
    /// The current location does not exist yet: create it.
    NewNode { current: DocRef },

    /// `spaceReference` + `name`, submitted from the create form.
    #[serde(rename_all = "camelCase")]
    CanonicalUi {
        space_param: Option<String>,
        name_param: Option<String>,
    },

    /// Deprecated `space` + `page` parameters.
    #[serde(rename_all = "camelCase")]
    LegacyUi {
        space_param: Option<String>,
        page_param: Option<String>,
    },
}
