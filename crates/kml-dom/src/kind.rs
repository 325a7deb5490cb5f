//! The closed set of element kinds and their capabilities.
//!
//! Every tag the parser understands maps to exactly one [`ElementKind`].
//! Anything else becomes [`ElementKind::Unknown`], a placeholder that keeps
//! the tag text on the [`Element`](crate::Element) itself.
//!
//! Capabilities ("is this a document root", "is this a style selector") are
//! plain functions over the enum, so adding a kind forces every capability
//! match to be revisited.

use std::fmt;

/// The kind of a markup element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Kml,

    // Containers and features
    Document,
    Folder,
    Placemark,
    NetworkLink,
    GroundOverlay,
    ScreenOverlay,
    PhotoOverlay,

    // Style selectors and sub-styles
    Style,
    StyleMap,
    Pair,
    IconStyle,
    LabelStyle,
    LineStyle,
    PolyStyle,
    BalloonStyle,
    ListStyle,
    Icon,

    // Geometry
    Point,
    LineString,
    LinearRing,
    Polygon,
    OuterBoundaryIs,
    InnerBoundaryIs,
    MultiGeometry,

    // Simple (text-valued) fields
    Name,
    Description,
    Visibility,
    Open,
    StyleUrl,
    Key,
    Href,
    Color,
    Width,
    Scale,
    Coordinates,
    Text,

    /// Placeholder for a tag that is not part of the known vocabulary.
    Unknown,
}

/// Canonical tag for every known kind, in declaration order.
const TAGS: &[(&str, ElementKind)] = &[
    ("kml", ElementKind::Kml),
    ("Document", ElementKind::Document),
    ("Folder", ElementKind::Folder),
    ("Placemark", ElementKind::Placemark),
    ("NetworkLink", ElementKind::NetworkLink),
    ("GroundOverlay", ElementKind::GroundOverlay),
    ("ScreenOverlay", ElementKind::ScreenOverlay),
    ("PhotoOverlay", ElementKind::PhotoOverlay),
    ("Style", ElementKind::Style),
    ("StyleMap", ElementKind::StyleMap),
    ("Pair", ElementKind::Pair),
    ("IconStyle", ElementKind::IconStyle),
    ("LabelStyle", ElementKind::LabelStyle),
    ("LineStyle", ElementKind::LineStyle),
    ("PolyStyle", ElementKind::PolyStyle),
    ("BalloonStyle", ElementKind::BalloonStyle),
    ("ListStyle", ElementKind::ListStyle),
    ("Icon", ElementKind::Icon),
    ("Point", ElementKind::Point),
    ("LineString", ElementKind::LineString),
    ("LinearRing", ElementKind::LinearRing),
    ("Polygon", ElementKind::Polygon),
    ("outerBoundaryIs", ElementKind::OuterBoundaryIs),
    ("innerBoundaryIs", ElementKind::InnerBoundaryIs),
    ("MultiGeometry", ElementKind::MultiGeometry),
    ("name", ElementKind::Name),
    ("description", ElementKind::Description),
    ("visibility", ElementKind::Visibility),
    ("open", ElementKind::Open),
    ("styleUrl", ElementKind::StyleUrl),
    ("key", ElementKind::Key),
    ("href", ElementKind::Href),
    ("color", ElementKind::Color),
    ("width", ElementKind::Width),
    ("scale", ElementKind::Scale),
    ("coordinates", ElementKind::Coordinates),
    ("text", ElementKind::Text),
];

impl ElementKind {
    /// Look up the kind for a tag name. Tags are case-sensitive.
    ///
    /// Returns `None` for tags outside the vocabulary; the tree builder
    /// decides whether that becomes a placeholder or an error.
    pub fn from_tag(tag: &str) -> Option<ElementKind> {
        TAGS.iter().find(|(t, _)| *t == tag).map(|(_, kind)| *kind)
    }

    /// The canonical tag for this kind, or `None` for [`ElementKind::Unknown`].
    pub fn tag(&self) -> Option<&'static str> {
        TAGS.iter().find(|(_, k)| k == self).map(|(t, _)| *t)
    }

    /// A `<Document>`: the container whose direct style children are shared.
    pub fn is_document(&self) -> bool {
        matches!(self, ElementKind::Document)
    }

    /// `<Style>` and `<StyleMap>`.
    pub fn is_style_selector(&self) -> bool {
        matches!(self, ElementKind::Style | ElementKind::StyleMap)
    }

    /// Sub-styles that live inside a `<Style>`.
    pub fn is_sub_style(&self) -> bool {
        matches!(
            self,
            ElementKind::IconStyle
                | ElementKind::LabelStyle
                | ElementKind::LineStyle
                | ElementKind::PolyStyle
                | ElementKind::BalloonStyle
                | ElementKind::ListStyle
        )
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ElementKind::Document | ElementKind::Folder)
    }

    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            ElementKind::GroundOverlay | ElementKind::ScreenOverlay | ElementKind::PhotoOverlay
        )
    }

    pub fn is_feature(&self) -> bool {
        self.is_container()
            || self.is_overlay()
            || matches!(self, ElementKind::Placemark | ElementKind::NetworkLink)
    }

    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            ElementKind::Point
                | ElementKind::LineString
                | ElementKind::LinearRing
                | ElementKind::Polygon
                | ElementKind::MultiGeometry
        )
    }

    /// Kinds that may carry an `id` attribute.
    pub fn is_object(&self) -> bool {
        self.is_feature()
            || self.is_geometry()
            || self.is_style_selector()
            || self.is_sub_style()
            || matches!(self, ElementKind::Pair | ElementKind::Icon)
    }

    /// Text-valued fields whose meaning is entirely their character data.
    pub fn is_simple_field(&self) -> bool {
        matches!(
            self,
            ElementKind::Name
                | ElementKind::Description
                | ElementKind::Visibility
                | ElementKind::Open
                | ElementKind::StyleUrl
                | ElementKind::Key
                | ElementKind::Href
                | ElementKind::Color
                | ElementKind::Width
                | ElementKind::Scale
                | ElementKind::Coordinates
                | ElementKind::Text
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => f.write_str(tag),
            None => f.write_str("(unknown)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup_is_case_sensitive() {
        assert_eq!(ElementKind::from_tag("Document"), Some(ElementKind::Document));
        assert_eq!(ElementKind::from_tag("document"), None);
        assert_eq!(ElementKind::from_tag("name"), Some(ElementKind::Name));
        assert_eq!(ElementKind::from_tag("Name"), None);
    }

    #[test]
    fn test_every_known_tag_round_trips() {
        for (tag, kind) in TAGS {
            assert_eq!(kind.tag(), Some(*tag));
        }
        assert_eq!(ElementKind::Unknown.tag(), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(ElementKind::Document.is_document());
        assert!(!ElementKind::Folder.is_document());

        assert!(ElementKind::Style.is_style_selector());
        assert!(ElementKind::StyleMap.is_style_selector());
        assert!(!ElementKind::IconStyle.is_style_selector());

        assert!(ElementKind::Folder.is_container());
        assert!(ElementKind::GroundOverlay.is_feature());
        assert!(ElementKind::Polygon.is_geometry());
        assert!(ElementKind::LineStyle.is_object());
        assert!(!ElementKind::Name.is_object());
        assert!(ElementKind::Coordinates.is_simple_field());
        assert!(!ElementKind::Unknown.is_object());
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementKind::StyleMap.to_string(), "StyleMap");
        assert_eq!(ElementKind::Unknown.to_string(), "(unknown)");
    }
}
