//! Context for KML parsing with diagnostic collection.

use crate::Error;
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A message produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    /// Byte offset in the parsed text, when the message points somewhere.
    pub offset: Option<usize>,
}

impl Diagnostic {
    pub fn warning(code: &'static str, message: impl Into<String>, offset: Option<usize>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            offset,
        }
    }
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        Self {
            severity: Severity::Error,
            code: err.code(),
            message: err.to_string(),
            offset: err.offset(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}[{}]: {}", label, self.code, self.message)
    }
}

/// Collects diagnostics across one or more parses.
///
/// Warnings (such as unknown elements replaced by placeholders) are
/// recorded even when the parse succeeds; a failed parse adds its error.
///
/// # Example
///
/// ```rust
/// use kml_dom::{NamespaceMode, ParseContext, Parser};
///
/// let mut ctx = ParseContext::new();
/// let mut parser = Parser::new();
/// let root = parser
///     .parse_with_context("<kml><Extra/></kml>", NamespaceMode::Unaware, &mut ctx)
///     .unwrap();
/// assert_eq!(root.child_count(), 1);
/// assert!(ctx.has_diagnostics());
/// assert!(!ctx.has_errors());
/// ```
#[derive(Debug, Default)]
pub struct ParseContext {
    diagnostics: Vec<Diagnostic>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take all collected diagnostics, leaving the context empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Check if any errors (not warnings) have been collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
