//! Shared style and object id indexing on top of [`kml_dom`].
//!
//! The observers in this crate plug into a [`kml_dom::Parser`] and build
//! lookup tables while the tree is parsed:
//!
//! - [`SharedStyleObserver`]: `<Style>`/`<StyleMap>` children of a
//!   `<Document>`, keyed by id, failing the parse on a repeated id
//! - [`ObjectIdObserver`]: every element with an id, failing the parse on a
//!   repeated id
//!
//! # Example
//!
//! ```rust
//! use kml_dom::Parser;
//! use kml_engine::{SharedStyleMap, SharedStyleObserver};
//!
//! let mut styles = SharedStyleMap::new();
//! {
//!     let mut parser = Parser::new();
//!     parser.add_observer(SharedStyleObserver::new(&mut styles));
//!     parser.parse(r#"<Document><Style id="a"/></Document>"#).unwrap();
//!     parser.parse(r#"<Document><Style id="b"/></Document>"#).unwrap();
//! }
//! assert_eq!(styles.len(), 2);
//! ```

pub mod object_id;
pub mod shared_style;

pub use object_id::{ObjectIdMap, ObjectIdObserver};
pub use shared_style::{
    SharedStyleMap, SharedStyleObserver, parse_with_shared_styles, resolve_style_url,
};
