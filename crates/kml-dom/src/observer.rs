//! Observers consulted while the tree is being built.
//!
//! The [`ParserObserver`] trait gives pluggable components a look at every
//! element as it is created, attached and closed. Any hook may answer
//! [`Verdict::Reject`], which aborts the whole parse with the given reason.
//!
//! All hooks have accepting default implementations, so an observer only
//! implements the events it cares about.
//!
//! # Side effects on rejection
//!
//! Observers run in registration order and the chain stops at the first
//! rejection. An observer that records something and accepts keeps that
//! record even if a later observer (or a later element) rejects: nothing is
//! rolled back. Callers treat state written during an aborted parse as
//! unreliable.

use crate::ElementPtr;

/// An observer's answer to a proposed tree event.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// Abort the parse. The reason ends up in the parse error.
    Reject(String),
}

impl Verdict {
    pub fn reject(reason: impl Into<String>) -> Self {
        Verdict::Reject(reason.into())
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Hooks invoked by the tree builder.
///
/// Observers never own the elements they see; keeping an [`ElementPtr`]
/// clone is fine and does not affect the tree.
pub trait ParserObserver {
    /// Called when an element has been created from its start tag, before it
    /// is attached to a parent. The root element only ever reaches this hook.
    fn new_element(&mut self, _element: &ElementPtr) -> Verdict {
        Verdict::Accept
    }

    /// Called before `child` is appended to `parent`.
    fn add_child(&mut self, _parent: &ElementPtr, _child: &ElementPtr) -> Verdict {
        Verdict::Accept
    }

    /// Called when `child`'s end tag is seen, with all of its content built.
    fn end_element(&mut self, _parent: &ElementPtr, _child: &ElementPtr) -> Verdict {
        Verdict::Accept
    }
}

impl<T: ParserObserver + ?Sized> ParserObserver for &mut T {
    fn new_element(&mut self, element: &ElementPtr) -> Verdict {
        (**self).new_element(element)
    }

    fn add_child(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        (**self).add_child(parent, child)
    }

    fn end_element(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        (**self).end_element(parent, child)
    }
}

/// Ordered list of observers. The chain accepts only if every observer does.
#[derive(Default)]
pub struct ObserverChain<'a> {
    observers: Vec<Box<dyn ParserObserver + 'a>>,
}

impl<'a> ObserverChain<'a> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn push(&mut self, observer: impl ParserObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn offer_new_element(&mut self, element: &ElementPtr) -> Verdict {
        self.offer(|observer| observer.new_element(element))
    }

    pub fn offer_add_child(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        self.offer(|observer| observer.add_child(parent, child))
    }

    pub fn offer_end_element(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        self.offer(|observer| observer.end_element(parent, child))
    }

    fn offer(
        &mut self,
        mut hook: impl FnMut(&mut (dyn ParserObserver + 'a)) -> Verdict,
    ) -> Verdict {
        for observer in &mut self.observers {
            if let Verdict::Reject(reason) = hook(observer.as_mut()) {
                return Verdict::Reject(reason);
            }
        }
        Verdict::Accept
    }
}

impl std::fmt::Debug for ObserverChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverChain")
            .field("len", &self.observers.len())
            .finish()
    }
}

/// Observer that emits a `tracing` event for every hook and always accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl ParserObserver for TracingObserver {
    fn new_element(&mut self, element: &ElementPtr) -> Verdict {
        tracing::trace!(
            tag = element.tag(),
            offset = element.span().start,
            "New element"
        );
        Verdict::Accept
    }

    fn add_child(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        tracing::trace!(parent = parent.tag(), child = child.tag(), "Add child");
        Verdict::Accept
    }

    fn end_element(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
        tracing::trace!(parent = parent.tag(), child = child.tag(), "End element");
        Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, ElementKind};

    /// Records which hooks it saw and rejects children with a given tag.
    struct Recorder {
        seen: Vec<String>,
        reject_tag: Option<&'static str>,
    }

    impl Recorder {
        fn new(reject_tag: Option<&'static str>) -> Self {
            Self {
                seen: Vec::new(),
                reject_tag,
            }
        }
    }

    impl ParserObserver for Recorder {
        fn add_child(&mut self, parent: &ElementPtr, child: &ElementPtr) -> Verdict {
            self.seen.push(format!("{}>{}", parent.tag(), child.tag()));
            if self.reject_tag == Some(child.tag()) {
                return Verdict::reject(format!("no <{}> allowed", child.tag()));
            }
            Verdict::Accept
        }
    }

    fn pair() -> (ElementPtr, ElementPtr) {
        (
            Element::of_kind(ElementKind::Document).into_ptr(),
            Element::of_kind(ElementKind::Style).into_ptr(),
        )
    }

    #[test]
    fn test_empty_chain_accepts() {
        let (parent, child) = pair();
        let mut chain = ObserverChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.offer_add_child(&parent, &child), Verdict::Accept);
        assert_eq!(chain.offer_new_element(&child), Verdict::Accept);
        assert_eq!(chain.offer_end_element(&parent, &child), Verdict::Accept);
    }

    #[test]
    fn test_chain_stops_at_first_rejection() {
        let (parent, child) = pair();
        let mut first = Recorder::new(Some("Style"));
        let mut second = Recorder::new(None);
        {
            let mut chain = ObserverChain::new();
            chain.push(&mut first);
            chain.push(&mut second);
            assert_eq!(chain.len(), 2);

            let verdict = chain.offer_add_child(&parent, &child);
            assert_eq!(verdict, Verdict::reject("no <Style> allowed"));
        }
        assert_eq!(first.seen, vec!["Document>Style"]);
        assert!(second.seen.is_empty());
    }

    #[test]
    fn test_chain_runs_all_observers_on_accept() {
        let (parent, child) = pair();
        let mut first = Recorder::new(None);
        let mut second = Recorder::new(None);
        {
            let mut chain = ObserverChain::new();
            chain.push(&mut first);
            chain.push(&mut second);
            assert!(chain.offer_add_child(&parent, &child).is_accept());
        }
        assert_eq!(first.seen.len(), 1);
        assert_eq!(second.seen.len(), 1);
    }

    #[test]
    fn test_tracing_observer_accepts_everything() {
        let (parent, child) = pair();
        let mut observer = TracingObserver::new();
        assert!(observer.new_element(&child).is_accept());
        assert!(observer.add_child(&parent, &child).is_accept());
        assert!(observer.end_element(&parent, &child).is_accept());
    }
}
