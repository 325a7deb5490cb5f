//! Error types for KML parsing.

use thiserror::Error;

/// Result type alias for kml-dom operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a parse produced no tree.
///
/// The `Display` text is the diagnostic handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed markup reported by the XML reader.
    #[error("XML syntax error: {message}{}", .position.map(|p| format!(" at byte {}", p)).unwrap_or_default())]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Input ended while elements were still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// A second top-level element.
    #[error("Invalid XML: multiple root elements (second root at byte {offset})")]
    MultipleRoots { offset: usize },

    /// No root element at all.
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// Non-whitespace character data before or after the root element.
    #[error("Invalid XML: text outside the root element at byte {offset}")]
    TextOutsideRoot { offset: usize },

    /// A namespace prefix with no `xmlns:` declaration in scope.
    #[error("Unbound namespace prefix '{prefix}' at byte {offset}")]
    UnboundPrefix { prefix: String, offset: usize },

    /// A tag outside the vocabulary, under the strict unknown-element policy.
    #[error("Unknown element <{tag}> at byte {offset}")]
    UnknownElement { tag: String, offset: usize },

    /// An observer refused an element.
    #[error("Parse aborted by observer: {reason} (<{tag}> at byte {offset})")]
    Rejected {
        reason: String,
        tag: String,
        offset: usize,
    },
}

impl Error {
    /// Stable code for this error, for hosts that map diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Error::XmlSyntax { .. } => "K-1-1",
            Error::UnexpectedEof { .. } => "K-1-2",
            Error::MultipleRoots { .. } => "K-1-3",
            Error::EmptyDocument => "K-1-4",
            Error::TextOutsideRoot { .. } => "K-1-5",
            Error::UnboundPrefix { .. } => "K-1-6",
            Error::UnknownElement { .. } => "K-1-7",
            Error::Rejected { .. } => "K-1-8",
        }
    }

    /// Byte offset the error points at, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::XmlSyntax { position, .. } => position.map(|p| p as usize),
            Error::UnexpectedEof { .. } | Error::EmptyDocument => None,
            Error::MultipleRoots { offset }
            | Error::TextOutsideRoot { offset }
            | Error::UnboundPrefix { offset, .. }
            | Error::UnknownElement { offset, .. }
            | Error::Rejected { offset, .. } => Some(*offset),
        }
    }

    /// True when the error came from an observer rather than the markup.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = Error::XmlSyntax {
            message: "bad".to_string(),
            position: Some(7),
        };
        assert_eq!(err.to_string(), "XML syntax error: bad at byte 7");

        let err = Error::XmlSyntax {
            message: "bad".to_string(),
            position: None,
        };
        assert_eq!(err.to_string(), "XML syntax error: bad");
    }

    #[test]
    fn test_rejection_display() {
        let err = Error::Rejected {
            reason: "duplicate id: s1".to_string(),
            tag: "Style".to_string(),
            offset: 25,
        };
        assert_eq!(
            err.to_string(),
            "Parse aborted by observer: duplicate id: s1 (<Style> at byte 25)"
        );
        assert!(err.is_rejection());
        assert_eq!(err.offset(), Some(25));
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            Error::XmlSyntax {
                message: String::new(),
                position: None,
            },
            Error::UnexpectedEof {
                expected: String::new(),
            },
            Error::MultipleRoots { offset: 0 },
            Error::EmptyDocument,
            Error::TextOutsideRoot { offset: 0 },
            Error::UnboundPrefix {
                prefix: String::new(),
                offset: 0,
            },
            Error::UnknownElement {
                tag: String::new(),
                offset: 0,
            },
            Error::Rejected {
                reason: String::new(),
                tag: String::new(),
                offset: 0,
            },
        ];
        let mut codes: Vec<&str> = errors.iter().map(Error::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
