//! Element tree nodes.
//!
//! Elements are shared through [`ElementPtr`] (`Rc<Element>`). The tree is
//! assembled top-down: a child is attached to its parent as soon as its
//! start tag is seen, before its own content exists. Children and character
//! data therefore sit behind interior mutability, while the identity of an
//! element (kind, tag, attributes) is fixed at construction.
//!
//! Holding an `ElementPtr` outside the tree (for example in a style table)
//! keeps that subtree alive even after the root is dropped.

use crate::ElementKind;
use std::cell::{Cell, RefCell};
use std::fmt::Write as _;
use std::rc::Rc;

/// Shared handle to an element.
pub type ElementPtr = Rc<Element>;

/// Byte range of an element in the parsed text, from `<` of the start tag
/// to the `>` of the end tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// An attribute on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local name (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g. "xmlns" in `xmlns:gx="..."`).
    pub prefix: Option<String>,

    /// The value after unescaping entities.
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }

    /// Split a raw attribute key such as `xml:lang` into prefix and local name.
    pub fn from_raw(key: &str, value: impl Into<String>) -> Self {
        let (prefix, name) = match key.split_once(':') {
            Some((prefix, name)) => (Some(prefix.to_string()), name.to_string()),
            None => (None, key.to_string()),
        };
        Self {
            name,
            prefix,
            value: value.into(),
        }
    }
}

/// A node in the parsed tree.
#[derive(Debug)]
pub struct Element {
    kind: ElementKind,

    /// The tag exactly as it appeared in the source, prefix included.
    tag: String,

    /// Namespace URI the tag resolved to. Only set by namespace-aware parsing.
    namespace: Option<String>,

    attributes: Vec<Attribute>,

    start: usize,
    end: Cell<usize>,

    children: RefCell<Vec<ElementPtr>>,
    char_data: RefCell<String>,
}

impl Element {
    /// Create a detached element.
    pub fn new(kind: ElementKind, tag: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            namespace: None,
            attributes,
            start: 0,
            end: Cell::new(0),
            children: RefCell::new(Vec::new()),
            char_data: RefCell::new(String::new()),
        }
    }

    /// Create a detached element of a known kind using its canonical tag.
    pub fn of_kind(kind: ElementKind) -> Self {
        Self::new(kind, kind.tag().unwrap_or_default(), Vec::new())
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_start(mut self, offset: usize) -> Self {
        self.start = offset;
        self.end.set(offset);
        self
    }

    /// Set the `id` attribute, replacing any existing one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attributes
            .retain(|a| !(a.name == "id" && a.prefix.is_none()));
        self.attributes.push(Attribute::new("id", id));
        self
    }

    pub fn into_ptr(self) -> ElementPtr {
        Rc::new(self)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The tag without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.tag
            .split_once(':')
            .map_or(self.tag.as_str(), |(_, local)| local)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get an unprefixed attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.prefix.is_none())
            .map(|a| a.value.as_str())
    }

    /// The `id` attribute, if present. May be empty.
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// True when the element carries a non-empty `id`.
    pub fn has_id(&self) -> bool {
        self.id().is_some_and(|id| !id.is_empty())
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end.get(),
        }
    }

    /// Snapshot of the direct children, in document order.
    pub fn children(&self) -> Vec<ElementPtr> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn child(&self, index: usize) -> Option<ElementPtr> {
        self.children.borrow().get(index).cloned()
    }

    /// Direct children of the given kind.
    pub fn get_children(&self, kind: ElementKind) -> Vec<ElementPtr> {
        self.children
            .borrow()
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }

    /// All character data seen directly inside this element, untrimmed.
    pub fn char_data(&self) -> String {
        self.char_data.borrow().clone()
    }

    /// Character data with surrounding whitespace removed.
    pub fn text(&self) -> String {
        self.char_data.borrow().trim().to_string()
    }

    /// Depth-first search of this subtree (including `self`) for an id.
    pub fn find_by_id(self: &Rc<Self>, id: &str) -> Option<ElementPtr> {
        if self.id() == Some(id) {
            return Some(Rc::clone(self));
        }
        self.children
            .borrow()
            .iter()
            .find_map(|child| child.find_by_id(id))
    }

    /// Compare two subtrees by kind, tag, attributes, trimmed text and
    /// children. Namespaces and source spans are ignored.
    pub fn same_structure(&self, other: &Element) -> bool {
        if self.kind != other.kind
            || self.tag != other.tag
            || self.attributes != other.attributes
            || self.text() != other.text()
        {
            return false;
        }
        let mine = self.children.borrow();
        let theirs = other.children.borrow();
        mine.len() == theirs.len()
            && mine
                .iter()
                .zip(theirs.iter())
                .all(|(a, b)| a.same_structure(b))
    }

    /// Indented outline of the subtree, one element per line.
    ///
    /// ```text
    /// Document
    ///   Style id="s1"
    ///   Placemark
    ///     name "Home"
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{:indent$}{}", "", self.tag, indent = depth * 2);
        for attr in &self.attributes {
            match &attr.prefix {
                Some(prefix) => {
                    let _ = write!(out, " {}:{}={:?}", prefix, attr.name, attr.value);
                }
                None => {
                    let _ = write!(out, " {}={:?}", attr.name, attr.value);
                }
            }
        }
        let text = self.text();
        if !text.is_empty() {
            let _ = write!(out, " {:?}", text);
        }
        out.push('\n');
        for child in self.children.borrow().iter() {
            child.write_outline(out, depth + 1);
        }
    }

    pub(crate) fn append_child(&self, child: ElementPtr) {
        self.children.borrow_mut().push(child);
    }

    pub(crate) fn append_char_data(&self, data: &str) {
        self.char_data.borrow_mut().push_str(data);
    }

    pub(crate) fn close(&self, end_offset: usize) {
        self.end.set(end_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_from_raw_splits_prefix() {
        let attr = Attribute::from_raw("xmlns:gx", "http://www.google.com/kml/ext/2.2");
        assert_eq!(attr.prefix.as_deref(), Some("xmlns"));
        assert_eq!(attr.name, "gx");

        let attr = Attribute::from_raw("id", "a");
        assert_eq!(attr.prefix, None);
        assert_eq!(attr.name, "id");
    }

    #[test]
    fn test_id_accessors() {
        let style = Element::of_kind(ElementKind::Style).with_id("s1");
        assert_eq!(style.id(), Some("s1"));
        assert!(style.has_id());

        let empty = Element::of_kind(ElementKind::Style).with_id("");
        assert_eq!(empty.id(), Some(""));
        assert!(!empty.has_id());

        let none = Element::of_kind(ElementKind::Style);
        assert_eq!(none.id(), None);
        assert!(!none.has_id());
    }

    #[test]
    fn test_prefixed_id_is_not_the_id() {
        let el = Element::new(
            ElementKind::Style,
            "Style",
            vec![Attribute::from_raw("xml:id", "nope")],
        );
        assert_eq!(el.id(), None);
    }

    #[test]
    fn test_children_and_text() {
        let doc = Element::of_kind(ElementKind::Document).into_ptr();
        let name = Element::of_kind(ElementKind::Name).into_ptr();
        name.append_char_data("  Home ");
        doc.append_child(Rc::clone(&name));
        doc.append_child(Element::of_kind(ElementKind::Style).with_id("s").into_ptr());

        assert_eq!(doc.child_count(), 2);
        assert_eq!(doc.get_children(ElementKind::Style).len(), 1);
        assert_eq!(name.char_data(), "  Home ");
        assert_eq!(name.text(), "Home");
        assert!(doc.find_by_id("s").is_some());
        assert!(doc.find_by_id("missing").is_none());
    }

    #[test]
    fn test_external_reference_outlives_tree() {
        let doc = Element::of_kind(ElementKind::Document).into_ptr();
        let style = Element::of_kind(ElementKind::Style).with_id("keep").into_ptr();
        doc.append_child(Rc::clone(&style));
        drop(doc);
        assert_eq!(style.id(), Some("keep"));
        assert_eq!(Rc::strong_count(&style), 1);
    }

    #[test]
    fn test_local_name() {
        let el = Element::new(ElementKind::Unknown, "gx:Tour", Vec::new());
        assert_eq!(el.local_name(), "Tour");
        assert_eq!(Element::of_kind(ElementKind::Kml).local_name(), "kml");
    }
}
