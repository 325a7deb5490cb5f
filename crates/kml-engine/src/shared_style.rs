//! Shared style collection.
//!
//! A shared style is a `<Style>` or `<StyleMap>` that is a direct child of a
//! `<Document>`. [`SharedStyleObserver`] indexes them by id while the
//! document is parsed and aborts the parse when an id repeats.

use kml_dom::{ElementPtr, NamespaceMode, Parser, ParserObserver, Result, Verdict};
use std::collections::HashMap;

/// Shared styles keyed by id.
///
/// Owned by the caller and filled during parsing, so one map can collect the
/// styles of several documents.
pub type SharedStyleMap = HashMap<String, ElementPtr>;

/// Observer that fills a [`SharedStyleMap`].
///
/// A style selector without an id (or with an empty one) is recorded under
/// the empty key, so a second id-less shared style is a duplicate like any
/// other.
///
/// Entries added before a rejection stay in the map; only the duplicate
/// itself is left out.
#[derive(Debug)]
pub struct SharedStyleObserver<'m> {
    shared_styles: &'m mut SharedStyleMap,
}

impl<'m> SharedStyleObserver<'m> {
    pub fn new(shared_styles: &'m mut SharedStyleMap) -> Self {
        Self { shared_styles }
    }
}

impl ParserObserver for SharedStyleObserver<'_> {
    fn add_child(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        if !parent.kind().is_document() || !child.kind().is_style_selector() {
            return Verdict::Accept;
        }

        let id = child.id().unwrap_or_default();
        if self.shared_styles.contains_key(id) {
            return Verdict::reject(format!("duplicate id: {}", id));
        }

        tracing::trace!(id, kind = %child.kind(), "Shared style");
        self.shared_styles.insert(id.to_string(), ElementPtr::clone(child));
        Verdict::Accept
    }
}

/// Parse `text` and collect its shared styles into `shared_styles`.
///
/// # Example
///
/// ```rust
/// use kml_dom::NamespaceMode;
/// use kml_engine::{SharedStyleMap, parse_with_shared_styles};
///
/// let mut styles = SharedStyleMap::new();
/// let kml = r#"<Document><Style id="s1"/><Style id="s1"/></Document>"#;
///
/// let err = parse_with_shared_styles(kml, NamespaceMode::Unaware, &mut styles).unwrap_err();
/// assert!(err.to_string().contains("duplicate id: s1"));
/// assert_eq!(styles.len(), 1);
/// ```
pub fn parse_with_shared_styles(
    text: &str,
    mode: NamespaceMode,
    shared_styles: &mut SharedStyleMap,
) -> Result<ElementPtr> {
    let mut parser = Parser::new();
    parser.add_observer(SharedStyleObserver::new(shared_styles));
    parser.parse_with_mode(text, mode)
}

/// Look up the shared style a `<styleUrl>` points at.
///
/// Only same-document references (`#id`) resolve; URLs with a path part
/// name another file and return `None`.
pub fn resolve_style_url<'s>(
    shared_styles: &'s SharedStyleMap,
    style_url: &str,
) -> Option<&'s ElementPtr> {
    let id = style_url.trim().strip_prefix('#')?;
    shared_styles.get(id)
}
