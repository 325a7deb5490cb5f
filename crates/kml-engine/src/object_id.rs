//! Object id indexing.

use kml_dom::{ElementPtr, ParserObserver, Verdict};
use std::collections::HashMap;

/// Every element with a non-empty `id`, keyed by that id.
pub type ObjectIdMap = HashMap<String, ElementPtr>;

/// Observer that indexes all ids in a document and fails the parse when
/// an id is used twice, wherever the two elements sit in the tree.
///
/// Runs on element creation, so the root element is indexed too. Elements
/// without an id, or with an empty one, are skipped.
#[derive(Debug)]
pub struct ObjectIdObserver<'m> {
    object_ids: &'m mut ObjectIdMap,
}

impl<'m> ObjectIdObserver<'m> {
    pub fn new(object_ids: &'m mut ObjectIdMap) -> Self {
        Self { object_ids }
    }
}

impl ParserObserver for ObjectIdObserver<'_> {
    fn new_element(&mut self, element: &ElementPtr) -> Verdict {
        let Some(id) = element.id().filter(|id| !id.is_empty()) else {
            return Verdict::Accept;
        };
        if self.object_ids.contains_key(id) {
            return Verdict::reject(format!("duplicate object id: {}", id));
        }
        self.object_ids.insert(id.to_string(), ElementPtr::clone(element));
        Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kml_dom::Parser;

    #[test]
    fn test_indexes_ids_at_any_depth() {
        let mut ids = ObjectIdMap::new();
        {
            let mut parser = Parser::new();
            parser.add_observer(ObjectIdObserver::new(&mut ids));
            parser
                .parse(
                    r#"<kml><Document id="doc"><Folder id="f"><Placemark id="p"><Point id="pt"/></Placemark></Folder></Document></kml>"#,
                )
                .unwrap();
        }
        let mut keys: Vec<&str> = ids.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["doc", "f", "p", "pt"]);
    }

    #[test]
    fn test_root_is_indexed() {
        let mut ids = ObjectIdMap::new();
        {
            let mut parser = Parser::new();
            parser.add_observer(ObjectIdObserver::new(&mut ids));
            parser.parse(r#"<Placemark id="only"/>"#).unwrap();
        }
        assert!(ids.contains_key("only"));
    }

    #[test]
    fn test_duplicate_anywhere_fails() {
        let mut ids = ObjectIdMap::new();
        let result = {
            let mut parser = Parser::new();
            parser.add_observer(ObjectIdObserver::new(&mut ids));
            parser.parse(
                r#"<Document><Folder><Placemark id="x"/></Folder><Folder><Point id="x"/></Folder></Document>"#,
            )
        };
        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate object id: x"), "{}", err);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids["x"].tag(), "Placemark");
    }

    #[test]
    fn test_empty_ids_are_skipped() {
        let mut ids = ObjectIdMap::new();
        {
            let mut parser = Parser::new();
            parser.add_observer(ObjectIdObserver::new(&mut ids));
            parser
                .parse(r#"<Document><Style id=""/><Style id=""/><Style/></Document>"#)
                .unwrap();
        }
        assert!(ids.is_empty());
    }
}
