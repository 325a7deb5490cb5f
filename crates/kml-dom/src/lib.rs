//! Observable KML parsing into a shared element tree.
//!
//! This crate parses KML text into a tree of [`Element`]s while letting
//! pluggable [`ParserObserver`]s inspect every element as it is created,
//! attached to its parent and closed. Any observer can veto the tree, which
//! aborts the parse.
//!
//! # Overview
//!
//! The main types are:
//! - [`Parser`]: reusable facade holding an [`ObserverChain`] and [`ParserOptions`]
//! - [`Element`] / [`ElementPtr`]: tree nodes, shared through `Rc`
//! - [`ElementKind`]: the closed vocabulary with capability checks
//! - [`TreeBuilder`]: consumes start/end/text notifications and builds the tree
//! - [`Error`]: why a parse produced no tree
//!
//! # Example
//!
//! ```rust
//! use kml_dom::{ElementKind, ElementPtr, Parser, ParserObserver, Verdict};
//!
//! /// Refuse any document with more than one Placemark.
//! #[derive(Default)]
//! struct OnePlacemark(usize);
//!
//! impl ParserObserver for OnePlacemark {
//!     fn add_child(&mut self, _parent: &ElementPtr, child: &ElementPtr) -> Verdict {
//!         if child.kind() == ElementKind::Placemark {
//!             self.0 += 1;
//!             if self.0 > 1 {
//!                 return Verdict::reject("more than one Placemark");
//!             }
//!         }
//!         Verdict::Accept
//!     }
//! }
//!
//! let mut parser = Parser::new();
//! parser.add_observer(OnePlacemark::default());
//!
//! assert!(parser.parse("<Document><Placemark/></Document>").is_ok());
//! ```
//!
//! # Namespaces
//!
//! [`Parser::parse`] treats tag names as raw strings. [`Parser::parse_ns`]
//! resolves prefixes, recognizes elements in the KML namespaces listed in
//! [`ParserOptions::namespaces`] and turns elements of other namespaces into
//! placeholders.

pub mod builder;
pub mod context;
pub mod element;
pub mod error;
pub mod kind;
pub mod observer;
pub mod options;
pub mod parser;

// Re-export main types
pub use builder::{StartTag, TreeBuilder};
pub use context::{Diagnostic, ParseContext, Severity};
pub use element::{Attribute, Element, ElementPtr, Span};
pub use error::{Error, Result};
pub use kind::ElementKind;
pub use observer::{ObserverChain, ParserObserver, TracingObserver, Verdict};
pub use options::{KML_NAMESPACES, NamespaceMode, ParserOptions, UnknownElementPolicy};
pub use parser::{Parser, parse, parse_kml, parse_ns};
