//! Parser configuration.
//!
//! [`ParserOptions`] deserializes with every field optional, so a host can
//! embed it in its own configuration file:
//!
//! ```json
//! { "unknown-elements": "reject", "namespaces": ["http://www.opengis.net/kml/2.2"] }
//! ```

use serde::{Deserialize, Serialize};

/// The KML namespaces recognized by default in namespace-aware mode.
pub const KML_NAMESPACES: &[&str] = &[
    "http://earth.google.com/kml/2.1",
    "http://earth.google.com/kml/2.2",
    "http://www.opengis.net/kml/2.2",
];

/// How tag names are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceMode {
    /// Tags are raw strings; `kml:Document` is just an unrecognized tag.
    #[default]
    Unaware,
    /// Prefixes are resolved against `xmlns` declarations in scope.
    Aware,
}

/// What to do with a tag outside the known vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownElementPolicy {
    /// Build an [`ElementKind::Unknown`](crate::ElementKind::Unknown) placeholder
    /// and keep parsing.
    #[default]
    Placeholder,
    /// Fail the parse.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserOptions {
    pub unknown_elements: UnknownElementPolicy,

    /// Namespace URIs whose elements are looked up in the KML vocabulary
    /// when parsing in [`NamespaceMode::Aware`]. Elements with no namespace
    /// are always looked up.
    pub namespaces: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            unknown_elements: UnknownElementPolicy::default(),
            namespaces: KML_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
        }
    }
}

impl ParserOptions {
    pub fn strict() -> Self {
        Self {
            unknown_elements: UnknownElementPolicy::Reject,
            ..Self::default()
        }
    }

    pub fn recognizes_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }
}
