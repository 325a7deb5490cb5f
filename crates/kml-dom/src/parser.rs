//! Parser facade: drives quick-xml into a [`TreeBuilder`].
//!
//! A [`Parser`] owns an observer chain and options and can be reused for any
//! number of sequential parses. Each call gets a fresh builder and a fresh
//! XML reader, so no tree state carries over between calls.

use crate::builder::{StartTag, TreeBuilder};
use crate::{
    Attribute, ElementKind, ElementPtr, Error, NamespaceMode, ObserverChain, ParseContext,
    ParserObserver, ParserOptions, Result,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::Config;
use quick_xml::{NsReader, Reader};

/// Parse KML without observers, ignoring namespaces.
///
/// # Example
///
/// ```rust
/// use kml_dom::{parse, ElementKind};
///
/// let root = parse(r#"<kml><Document><Style id="s1"/></Document></kml>"#).unwrap();
/// assert_eq!(root.kind(), ElementKind::Kml);
/// assert!(root.find_by_id("s1").is_some());
/// ```
pub fn parse(text: &str) -> Result<ElementPtr> {
    Parser::new().parse(text)
}

/// As [`parse`], resolving namespace prefixes.
pub fn parse_ns(text: &str) -> Result<ElementPtr> {
    Parser::new().parse_ns(text)
}

/// Parse KML, discarding the error text.
pub fn parse_kml(text: &str) -> Option<ElementPtr> {
    parse(text).ok()
}

/// Reusable parser with an observer chain.
///
/// Observers may borrow caller-owned state for `'a`; drop the parser to get
/// that state back.
///
/// ```rust
/// use kml_dom::{ElementPtr, Parser, ParserObserver, Verdict};
///
/// struct CountChildren<'a>(&'a mut usize);
///
/// impl ParserObserver for CountChildren<'_> {
///     fn add_child(&mut self, _parent: &ElementPtr, _child: &ElementPtr) -> Verdict {
///         *self.0 += 1;
///         Verdict::Accept
///     }
/// }
///
/// let mut count = 0;
/// {
///     let mut parser = Parser::new();
///     parser.add_observer(CountChildren(&mut count));
///     parser.parse("<kml><Document><Folder/></Document></kml>").unwrap();
/// }
/// assert_eq!(count, 2);
/// ```
#[derive(Debug, Default)]
pub struct Parser<'a> {
    observers: ObserverChain<'a>,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            observers: ObserverChain::new(),
            options,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Append an observer to the chain. Observers run in the order added.
    pub fn add_observer(&mut self, observer: impl ParserObserver + 'a) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Parse with tag names taken as raw strings.
    pub fn parse(&mut self, text: &str) -> Result<ElementPtr> {
        self.parse_with_mode(text, NamespaceMode::Unaware)
    }

    /// Parse with namespace prefixes resolved.
    pub fn parse_ns(&mut self, text: &str) -> Result<ElementPtr> {
        self.parse_with_mode(text, NamespaceMode::Aware)
    }

    pub fn parse_with_mode(&mut self, text: &str, mode: NamespaceMode) -> Result<ElementPtr> {
        let mut ctx = ParseContext::new();
        self.parse_with_context(text, mode, &mut ctx)
    }

    /// Parse and record warnings and the failure, if any, in `ctx`.
    pub fn parse_with_context(
        &mut self,
        text: &str,
        mode: NamespaceMode,
        ctx: &mut ParseContext,
    ) -> Result<ElementPtr> {
        tracing::debug!(
            mode = ?mode,
            bytes = text.len(),
            observers = self.observers.len(),
            "Parsing KML"
        );

        let builder = TreeBuilder::new(&mut self.observers, &self.options, ctx);
        let result = build_tree(text, mode, &self.options, builder);

        match &result {
            Ok(root) => {
                tracing::debug!(root = root.tag(), "Parsed KML");
            }
            Err(err) => {
                tracing::debug!(error = %err, "KML parse failed");
                ctx.add_diagnostic(err.into());
            }
        }
        result
    }
}

fn build_tree(
    text: &str,
    mode: NamespaceMode,
    options: &ParserOptions,
    mut builder: TreeBuilder<'_, '_>,
) -> Result<ElementPtr> {
    let mut source = EventSource::new(text, mode);

    loop {
        let event_start = source.position();
        let (namespace, event) = source.next_event()?;

        match event {
            Event::Start(e) => {
                let start = start_tag(&e, namespace, mode, options, event_start)?;
                builder.start_element(start)?;
            }
            Event::Empty(e) => {
                let start = start_tag(&e, namespace, mode, options, event_start)?;
                builder.start_element(start)?;
                builder.end_element(source.position())?;
            }
            Event::End(_) => {
                builder.end_element(source.position())?;
            }
            Event::Text(e) => {
                let data = e.unescape().map_err(|err| Error::XmlSyntax {
                    message: format!("Invalid text content: {}", err),
                    position: Some(event_start as u64),
                })?;
                builder.char_data(&data, event_start)?;
            }
            Event::CData(e) => {
                let data = String::from_utf8_lossy(&e);
                builder.char_data(&data, event_start)?;
            }
            Event::Eof => break,
            // Comments, processing instructions, declarations, DOCTYPE
            _ => {}
        }
    }

    builder.finish()
}

/// quick-xml in one of the two naming modes.
enum EventSource<'i> {
    Unaware(Reader<&'i [u8]>),
    Aware(NsReader<&'i [u8]>),
}

impl<'i> EventSource<'i> {
    fn new(text: &'i str, mode: NamespaceMode) -> Self {
        match mode {
            NamespaceMode::Unaware => {
                let mut reader = Reader::from_str(text);
                configure(reader.config_mut());
                EventSource::Unaware(reader)
            }
            NamespaceMode::Aware => {
                let mut reader = NsReader::from_str(text);
                configure(reader.config_mut());
                EventSource::Aware(reader)
            }
        }
    }

    fn position(&self) -> usize {
        match self {
            EventSource::Unaware(reader) => reader.buffer_position() as usize,
            EventSource::Aware(reader) => reader.buffer_position() as usize,
        }
    }

    fn error_position(&self) -> u64 {
        match self {
            EventSource::Unaware(reader) => reader.error_position(),
            EventSource::Aware(reader) => reader.error_position(),
        }
    }

    /// Next event plus the namespace its name resolved to (aware mode only).
    fn next_event(&mut self) -> Result<(Option<String>, Event<'i>)> {
        let offset = self.position();
        let next = match self {
            EventSource::Unaware(reader) => reader.read_event().map(|event| (None, event)),
            EventSource::Aware(reader) => match reader.read_resolved_event() {
                Ok((resolved, event)) => Ok((resolve_namespace(resolved, offset)?, event)),
                Err(err) => Err(err),
            },
        };
        next.map_err(|err| Error::XmlSyntax {
            message: err.to_string(),
            position: Some(self.error_position()),
        })
    }
}

fn configure(config: &mut Config) {
    config.trim_text_start = false;
    config.trim_text_end = false;
    config.check_end_names = true;
}

fn resolve_namespace(resolved: ResolveResult<'_>, offset: usize) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            Ok(Some(String::from_utf8_lossy(namespace.as_ref()).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(Error::UnboundPrefix {
            prefix: String::from_utf8_lossy(&prefix).into_owned(),
            offset,
        }),
    }
}

fn start_tag(
    e: &BytesStart<'_>,
    namespace: Option<String>,
    mode: NamespaceMode,
    options: &ParserOptions,
    offset: usize,
) -> Result<StartTag> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let kind = match mode {
        NamespaceMode::Unaware => ElementKind::from_tag(&tag),
        NamespaceMode::Aware => {
            let recognized = namespace
                .as_deref()
                .is_none_or(|ns| options.recognizes_namespace(ns));
            if recognized {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                ElementKind::from_tag(&local)
            } else {
                None
            }
        }
    };

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid attribute value: {}", err),
            position: Some(offset as u64),
        })?;
        attributes.push(Attribute::from_raw(&key, value.into_owned()));
    }

    Ok(StartTag {
        tag,
        kind,
        namespace,
        attributes,
        offset,
    })
}
