//! Incremental tree construction with observer veto.
//!
//! [`TreeBuilder`] receives start-tag, end-tag and character-data
//! notifications in document order and assembles an element tree on a
//! construction stack. Every element is offered to the [`ObserverChain`]
//! before it becomes part of the tree; a rejection stops the build.

use crate::context::{Diagnostic, ParseContext};
use crate::{
    Attribute, Element, ElementKind, ElementPtr, Error, ObserverChain, ParserOptions, Result,
    UnknownElementPolicy, Verdict,
};
use std::rc::Rc;

/// Code for the warning emitted when a placeholder replaces an unknown tag.
pub const UNKNOWN_ELEMENT_WARNING: &str = "K-2-1";

/// A start tag as reported by an event source.
#[derive(Debug, Clone)]
pub struct StartTag {
    /// Tag as written, prefix included.
    pub tag: String,

    /// Recognized kind, or `None` when the tag is outside the vocabulary.
    pub kind: Option<ElementKind>,

    /// Resolved namespace URI (namespace-aware sources only).
    pub namespace: Option<String>,

    pub attributes: Vec<Attribute>,

    /// Byte offset of the `<`.
    pub offset: usize,
}

/// Builds one tree from one event stream.
pub struct TreeBuilder<'p, 'a> {
    observers: &'p mut ObserverChain<'a>,
    options: &'p ParserOptions,
    context: &'p mut ParseContext,

    /// Open elements, innermost last.
    stack: Vec<ElementPtr>,

    root: Option<ElementPtr>,
}

impl<'p, 'a> TreeBuilder<'p, 'a> {
    pub fn new(
        observers: &'p mut ObserverChain<'a>,
        options: &'p ParserOptions,
        context: &'p mut ParseContext,
    ) -> Self {
        Self {
            observers,
            options,
            context,
            stack: Vec::new(),
            root: None,
        }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn start_element(&mut self, start: StartTag) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::MultipleRoots {
                offset: start.offset,
            });
        }

        let kind = self.resolve_kind(&start)?;
        let element = Element::new(kind, start.tag, start.attributes)
            .with_namespace(start.namespace)
            .with_start(start.offset)
            .into_ptr();

        let verdict = self.observers.offer_new_element(&element);
        self.check(verdict, &element)?;

        match self.stack.last() {
            Some(parent) => {
                let verdict = self.observers.offer_add_child(parent, &element);
                self.check(verdict, &element)?;
                parent.append_child(Rc::clone(&element));
            }
            None => self.root = Some(Rc::clone(&element)),
        }

        self.stack.push(element);
        Ok(())
    }

    /// Close the innermost open element. `end_offset` is the byte just past
    /// its end tag.
    pub fn end_element(&mut self, end_offset: usize) -> Result<()> {
        let element = self.stack.pop().ok_or_else(|| Error::XmlSyntax {
            message: "closing tag without an open element".to_string(),
            position: Some(end_offset as u64),
        })?;
        element.close(end_offset);

        if let Some(parent) = self.stack.last() {
            let verdict = self.observers.offer_end_element(parent, &element);
            self.check(verdict, &element)?;
        }
        Ok(())
    }

    /// Append text to the innermost open element.
    ///
    /// Whitespace between top-level constructs is ignored; any other text
    /// outside the root element is an error.
    pub fn char_data(&mut self, data: &str, offset: usize) -> Result<()> {
        match self.stack.last() {
            Some(element) => {
                element.append_char_data(data);
                Ok(())
            }
            None if data.trim().is_empty() => Ok(()),
            None => Err(Error::TextOutsideRoot { offset }),
        }
    }

    /// End of stream: hand back the root if the document was complete.
    pub fn finish(self) -> Result<ElementPtr> {
        if let Some(open) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", open.tag()),
            });
        }
        self.root.ok_or(Error::EmptyDocument)
    }

    fn resolve_kind(&mut self, start: &StartTag) -> Result<ElementKind> {
        if let Some(kind) = start.kind {
            return Ok(kind);
        }
        match self.options.unknown_elements {
            UnknownElementPolicy::Placeholder => {
                tracing::warn!(
                    tag = %start.tag,
                    offset = start.offset,
                    "Unknown element replaced by placeholder"
                );
                self.context.add_diagnostic(Diagnostic::warning(
                    UNKNOWN_ELEMENT_WARNING,
                    format!("Unknown element <{}> kept as placeholder", start.tag),
                    Some(start.offset),
                ));
                Ok(ElementKind::Unknown)
            }
            UnknownElementPolicy::Reject => Err(Error::UnknownElement {
                tag: start.tag.clone(),
                offset: start.offset,
            }),
        }
    }

    fn check(&self, verdict: Verdict, element: &ElementPtr) -> Result<()> {
        match verdict {
            Verdict::Accept => Ok(()),
            Verdict::Reject(reason) => {
                tracing::debug!(
                    tag = element.tag(),
                    offset = element.span().start,
                    reason = %reason,
                    "Observer rejected element"
                );
                Err(Error::Rejected {
                    reason,
                    tag: element.tag().to_string(),
                    offset: element.span().start,
                })
            }
        }
    }
}
