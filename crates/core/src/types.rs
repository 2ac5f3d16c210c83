//! Domain types for the inventory and replacement documents.
//!
//! Both documents are keyed by `slide-<n>` and `shape-<n>` identifiers. The
//! inventory keeps presentation order when serialized; the replacement
//! document orders its keys numerically.

use crate::{Error, Result};
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::LazyLock;

/// Six hex digits, optionally prefixed with `#`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap());

/// Highest paragraph indentation level DrawingML accepts.
pub const MAX_LEVEL: u8 = 8;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            /// Zero-based position this identifier addresses.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.strip_prefix($prefix)
                    .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|n| n.parse().ok())
                    .map(Self)
                    .ok_or_else(|| Error::InvalidKey(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

identifier!(
    /// Zero-based slide identifier, written as `slide-<n>`.
    SlideKey,
    "slide-"
);

identifier!(
    /// Zero-based shape identifier within one slide, written as `shape-<n>`.
    ShapeKey,
    "shape-"
);

/// An RGB color stored as six uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RgbColor(String);

impl RgbColor {
    /// The six hex digits, without a leading `#`.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl FromStr for RgbColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HEX_COLOR_REGEX
            .captures(s.trim())
            .map(|caps| Self(caps[1].to_uppercase()))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Alignment {
    #[serde(alias = "left")]
    Left,
    #[serde(alias = "center", alias = "CENTRE")]
    Center,
    #[serde(alias = "right")]
    Right,
    #[serde(alias = "justify")]
    Justify,
}

impl Alignment {
    /// Map a DrawingML `algn` value.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "l" => Some(Self::Left),
            "ctr" => Some(Self::Center),
            "r" => Some(Self::Right),
            "just" | "justLow" | "dist" | "thaiDist" => Some(Self::Justify),
            _ => None,
        }
    }

    /// The DrawingML `algn` value.
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }
}

/// Role of a layout placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceholderType {
    Title,
    CenterTitle,
    Subtitle,
    Body,
    Object,
    Date,
    Footer,
    SlideNumber,
    Header,
    Picture,
    Chart,
    Table,
    ClipArt,
    OrgChart,
    MediaClip,
    SlideImage,
}

impl PlaceholderType {
    /// Map a PresentationML `ph/@type` value. A missing type means `obj`.
    pub fn from_ooxml(value: Option<&str>) -> Option<Self> {
        let ty = match value.unwrap_or("obj") {
            "title" => Self::Title,
            "ctrTitle" => Self::CenterTitle,
            "subTitle" => Self::Subtitle,
            "body" => Self::Body,
            "obj" => Self::Object,
            "dt" => Self::Date,
            "ftr" => Self::Footer,
            "sldNum" => Self::SlideNumber,
            "hdr" => Self::Header,
            "pic" => Self::Picture,
            "chart" => Self::Chart,
            "tbl" => Self::Table,
            "clipArt" => Self::ClipArt,
            "dgm" => Self::OrgChart,
            "media" => Self::MediaClip,
            "sldImg" => Self::SlideImage,
            _ => return None,
        };
        Some(ty)
    }

    /// The PresentationML `ph/@type` value.
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CenterTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Body => "body",
            Self::Object => "obj",
            Self::Date => "dt",
            Self::Footer => "ftr",
            Self::SlideNumber => "sldNum",
            Self::Header => "hdr",
            Self::Picture => "pic",
            Self::Chart => "chart",
            Self::Table => "tbl",
            Self::ClipArt => "clipArt",
            Self::OrgChart => "dgm",
            Self::MediaClip => "media",
            Self::SlideImage => "sldImg",
        }
    }

    /// The type a slide master uses for this role.
    ///
    /// Masters only carry title, body and the footer-area placeholders.
    pub fn master_equivalent(self) -> Self {
        match self {
            Self::CenterTitle => Self::Title,
            Self::Subtitle
            | Self::Object
            | Self::Picture
            | Self::Chart
            | Self::Table
            | Self::ClipArt
            | Self::OrgChart
            | Self::MediaClip => Self::Body,
            other => other,
        }
    }
}

/// One paragraph of a text frame, with optional formatting.
///
/// A `None` attribute means "not set here": the inventory did not find an
/// explicit value, or a replacement leaves the inherited style in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    /// Paragraph text; line breaks inside the paragraph are `\n`.
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    /// Explicit RGB color of the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,

    /// Theme color name such as `accent1` or `tx1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet: Option<bool>,

    /// Auto-numbering scheme such as `arabicPeriod` or `romanUcParenR`;
    /// set only on numbered list paragraphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<String>,

    /// Indentation level, 0 to 8.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Font size in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    /// Latin typeface name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
}

impl ParagraphRecord {
    /// Create a paragraph with the given text and no explicit formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Mark the paragraph bold.
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    /// Mark the paragraph italic.
    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    /// Set an explicit RGB color.
    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Turn the paragraph into a bullet at the given level.
    pub fn with_bullet(mut self, level: u8) -> Self {
        self.bullet = Some(true);
        self.level = Some(level);
        self
    }

    /// Turn the paragraph into a numbered list item at the given level.
    pub fn with_numbering(mut self, scheme: impl Into<String>, level: u8) -> Self {
        self.bullet = Some(true);
        self.numbering = Some(scheme.into());
        self.level = Some(level);
        self
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    /// Check that the formatting attributes are within DrawingML's ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.level {
            if level > MAX_LEVEL {
                return Err(Error::InvalidParagraph(format!(
                    "level {} exceeds the maximum of {}",
                    level, MAX_LEVEL
                )));
            }
        }
        if let Some(size) = self.font_size {
            if !size.is_finite() || size <= 0.0 || size > 4000.0 {
                return Err(Error::InvalidParagraph(format!(
                    "font size {} is outside 0-4000 points",
                    size
                )));
            }
        }
        if let Some(c) = self.text.chars().find(|&c| !is_xml_char(c)) {
            return Err(Error::InvalidParagraph(format!(
                "text contains U+{:04X}, which XML cannot carry",
                u32::from(c)
            )));
        }
        if let Some(scheme) = self.numbering.as_deref() {
            if scheme.is_empty() || !scheme.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(Error::InvalidParagraph(format!(
                    "invalid numbering scheme '{}'",
                    scheme
                )));
            }
        }
        if matches!(self.theme_color.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(Error::InvalidParagraph("empty theme color".to_string()));
        }
        if matches!(self.font_name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(Error::InvalidParagraph("empty font name".to_string()));
        }
        Ok(())
    }
}

/// Characters allowed in XML 1.0 text. A vertical tab is accepted as a
/// line break.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{0B}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

impl From<&str> for ParagraphRecord {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ParagraphRecord {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Position, placeholder role and text of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,

    /// Placeholder role; serialized as `null` for ordinary shapes.
    pub placeholder_type: Option<PlaceholderType>,

    /// Paragraphs of the text frame; empty when the shape has none.
    #[serde(default)]
    pub paragraphs: Vec<ParagraphRecord>,

    /// How far the shape extends past the right edge of the slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_overflow_right: Option<f64>,

    /// How far the shape extends past the bottom edge of the slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_overflow_bottom: Option<f64>,
}

impl ShapeRecord {
    /// All paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Shapes of one slide, in z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideInventory {
    pub shapes: Vec<ShapeRecord>,
}

impl SlideInventory {
    /// Look up a shape by its identifier.
    pub fn shape(&self, key: ShapeKey) -> Option<&ShapeRecord> {
        self.shapes.get(key.index())
    }

    /// Iterate shapes together with their identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &ShapeRecord)> {
        self.shapes.iter().enumerate().map(|(i, s)| (ShapeKey(i), s))
    }
}

impl Serialize for SlideInventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shapes.len()))?;
        for (key, shape) in self.iter() {
            map.serialize_entry(&key, shape)?;
        }
        map.end()
    }
}

/// Snapshot of a presentation's slides, shapes and paragraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub slides: Vec<SlideInventory>,
}

impl Inventory {
    /// Number of slides in the snapshot.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Total number of shapes across all slides.
    pub fn shape_count(&self) -> usize {
        self.slides.iter().map(|s| s.shapes.len()).sum()
    }

    /// Look up a slide by its identifier.
    pub fn slide(&self, key: SlideKey) -> Option<&SlideInventory> {
        self.slides.get(key.index())
    }

    /// Look up a shape by slide and shape identifier.
    pub fn shape(&self, slide: SlideKey, shape: ShapeKey) -> Option<&ShapeRecord> {
        self.slide(slide).and_then(|s| s.shape(shape))
    }

    /// Iterate slides together with their identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (SlideKey, &SlideInventory)> {
        self.slides.iter().enumerate().map(|(i, s)| (SlideKey(i), s))
    }

    /// Serialize to JSON, keeping presentation order.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slides.len()))?;
        for (key, slide) in self.iter() {
            map.serialize_entry(&key, slide)?;
        }
        map.end()
    }
}

/// New paragraph sequence for one shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeReplacement {
    pub paragraphs: Vec<ParagraphRecord>,
}

/// Text replacements keyed by slide and shape identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementDocument {
    slides: BTreeMap<SlideKey, BTreeMap<ShapeKey, ShapeReplacement>>,
}

impl ReplacementDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a replacement document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        log::debug!("Replacement document addresses {} shapes", doc.shape_count());
        Ok(doc)
    }

    /// Parse and validate a replacement document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Self = serde_json::from_reader(reader)?;
        doc.validate()?;
        log::debug!("Replacement document addresses {} shapes", doc.shape_count());
        Ok(doc)
    }

    /// Build a document that writes every text-bearing shape's current
    /// paragraphs back unchanged.
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let mut doc = Self::new();
        for (slide_key, slide) in inventory.iter() {
            for (shape_key, shape) in slide.iter() {
                if !shape.paragraphs.is_empty() {
                    doc.insert(slide_key, shape_key, shape.paragraphs.clone());
                }
            }
        }
        doc
    }

    /// Set the replacement paragraphs of one shape.
    pub fn insert(&mut self, slide: SlideKey, shape: ShapeKey, paragraphs: Vec<ParagraphRecord>) {
        self.slides
            .entry(slide)
            .or_default()
            .insert(shape, ShapeReplacement { paragraphs });
    }

    /// Look up the replacement for one shape.
    pub fn get(&self, slide: SlideKey, shape: ShapeKey) -> Option<&ShapeReplacement> {
        self.slides.get(&slide).and_then(|shapes| shapes.get(&shape))
    }

    /// Iterate slides in numeric order with their shape replacements.
    pub fn iter(&self) -> impl Iterator<Item = (SlideKey, &BTreeMap<ShapeKey, ShapeReplacement>)> {
        self.slides.iter().map(|(k, v)| (*k, v))
    }

    /// Number of shapes addressed by the document.
    pub fn shape_count(&self) -> usize {
        self.slides.values().map(BTreeMap::len).sum()
    }

    /// Whether the document addresses no shapes at all.
    pub fn is_empty(&self) -> bool {
        self.shape_count() == 0
    }

    /// Validate every paragraph record.
    pub fn validate(&self) -> Result<()> {
        for (slide, shapes) in &self.slides {
            for (shape, replacement) in shapes {
                for paragraph in &replacement.paragraphs {
                    paragraph.validate().map_err(|e| {
                        Error::InvalidParagraph(format!("{} {}: {}", slide, shape, e))
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_and_display() {
        assert_eq!("slide-0".parse::<SlideKey>().unwrap(), SlideKey(0));
        assert_eq!("shape-12".parse::<ShapeKey>().unwrap(), ShapeKey(12));
        assert_eq!(SlideKey(3).to_string(), "slide-3");
        assert_eq!(ShapeKey(7).to_string(), "shape-7");
    }

    #[test]
    fn test_keys_reject_malformed() {
        for bad in ["slide-", "slide--1", "slide-+1", "shape-0", "slide-x", "slide 1"] {
            assert!(bad.parse::<SlideKey>().is_err(), "{} should not parse", bad);
        }
        assert!("slide-0".parse::<ShapeKey>().is_err());
    }

    #[test]
    fn test_keys_order_numerically() {
        let mut keys = vec![SlideKey(10), SlideKey(2), SlideKey(1)];
        keys.sort();
        assert_eq!(keys, vec![SlideKey(1), SlideKey(2), SlideKey(10)]);
    }

    #[test]
    fn test_color_normalization() {
        assert_eq!("ff0000".parse::<RgbColor>().unwrap().as_hex(), "FF0000");
        assert_eq!("#00aa00".parse::<RgbColor>().unwrap().as_hex(), "00AA00");
        assert!("red".parse::<RgbColor>().is_err());
        assert!("FF00".parse::<RgbColor>().is_err());
        assert!("FF00001".parse::<RgbColor>().is_err());
    }

    #[test]
    fn test_alignment_mapping() {
        assert_eq!(Alignment::from_ooxml("ctr"), Some(Alignment::Center));
        assert_eq!(Alignment::Justify.as_ooxml(), "just");
        assert_eq!(Alignment::from_ooxml("bogus"), None);
    }

    #[test]
    fn test_placeholder_mapping() {
        assert_eq!(PlaceholderType::from_ooxml(None), Some(PlaceholderType::Object));
        assert_eq!(
            PlaceholderType::from_ooxml(Some("ctrTitle")),
            Some(PlaceholderType::CenterTitle)
        );
        assert_eq!(PlaceholderType::CenterTitle.master_equivalent(), PlaceholderType::Title);
        assert_eq!(PlaceholderType::Subtitle.master_equivalent(), PlaceholderType::Body);
        assert_eq!(PlaceholderType::Footer.master_equivalent(), PlaceholderType::Footer);
    }

    #[test]
    fn test_replacement_document_parses() {
        let json = r#"{
            "slide-0": {
                "shape-1": {
                    "paragraphs": [
                        {"text": "Title", "bold": true, "alignment": "CENTER"},
                        {"text": "Sub-bullet", "bullet": true, "level": 1, "color": "ff0000"}
                    ]
                }
            }
        }"#;
        let doc = ReplacementDocument::from_json_str(json).unwrap();
        assert_eq!(doc.shape_count(), 1);

        let shape = doc.get(SlideKey(0), ShapeKey(1)).unwrap();
        assert_eq!(shape.paragraphs.len(), 2);
        assert_eq!(shape.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(shape.paragraphs[1].level, Some(1));
        assert_eq!(shape.paragraphs[1].color.as_ref().unwrap().as_hex(), "FF0000");
    }

    #[test]
    fn test_replacement_document_rejects_bad_input() {
        assert!(ReplacementDocument::from_json_str("{not json").is_err());
        assert!(ReplacementDocument::from_json_str(r#"{"page-0": {}}"#).is_err());
        assert!(ReplacementDocument::from_json_str(
            r#"{"slide-0": {"shape-0": {"paragraphs": [{"text": "x", "color": "blue"}]}}}"#
        )
        .is_err());
        assert!(matches!(
            ReplacementDocument::from_json_str(
                r#"{"slide-0": {"shape-0": {"paragraphs": [{"text": "x", "level": 9}]}}}"#
            ),
            Err(Error::InvalidParagraph(_))
        ));
    }

    #[test]
    fn test_paragraph_text_must_be_xml_safe() {
        assert!(ParagraphRecord::new("tab\there\nand\u{0B}vertical").validate().is_ok());
        assert!(ParagraphRecord::new("日本語 🎉 <&>").validate().is_ok());

        let err = ParagraphRecord::new("bell\u{07}").validate().unwrap_err();
        assert!(err.to_string().contains("U+0007"));
        assert!(ParagraphRecord::new("nul\u{0}").validate().is_err());
        assert!(ParagraphRecord::new("ff\u{0C}").validate().is_err());
        assert!(ParagraphRecord::new("\u{FFFF}").validate().is_err());

        let json = r#"{"slide-0": {"shape-0": {"paragraphs": [{"text": "a\u0001b"}]}}}"#;
        assert!(matches!(
            ReplacementDocument::from_json_str(json),
            Err(Error::InvalidParagraph(_))
        ));
    }

    #[test]
    fn test_numbering_scheme_validation() {
        let numbered = ParagraphRecord::new("Step").with_numbering("arabicPeriod", 0);
        assert_eq!(numbered.bullet, Some(true));
        assert!(numbered.validate().is_ok());

        let json = r#"{"slide-0": {"shape-0": {"paragraphs": [{"text": "x", "numbering": "roman period"}]}}}"#;
        assert!(ReplacementDocument::from_json_str(json).is_err());
    }

    #[test]
    fn test_inventory_serializes_in_presentation_order() {
        let shape = ShapeRecord {
            left: 0.5,
            top: 0.5,
            width: 12.0,
            height: 1.0,
            placeholder_type: None,
            paragraphs: vec![ParagraphRecord::new("Hello")],
            slide_overflow_right: None,
            slide_overflow_bottom: None,
        };
        let inventory = Inventory {
            slides: (0..12)
                .map(|_| SlideInventory {
                    shapes: vec![shape.clone()],
                })
                .collect(),
        };

        let json = inventory.to_json(false).unwrap();
        let slide_2 = json.find("\"slide-2\"").unwrap();
        let slide_10 = json.find("\"slide-10\"").unwrap();
        assert!(slide_2 < slide_10);
        assert!(json.contains("\"placeholder_type\":null"));
        assert!(!json.contains("bold"));
        assert!(!json.contains("slide_overflow_right"));
    }

    #[test]
    fn test_empty_inventory_is_empty_object() {
        assert_eq!(Inventory::default().to_json(false).unwrap(), "{}");
    }

    #[test]
    fn test_from_inventory_skips_shapes_without_text() {
        let text_shape = ShapeRecord {
            left: 0.0,
            top: 0.0,
            width: 1.0,
            height: 1.0,
            placeholder_type: None,
            paragraphs: vec![ParagraphRecord::new("keep")],
            slide_overflow_right: None,
            slide_overflow_bottom: None,
        };
        let picture = ShapeRecord {
            paragraphs: Vec::new(),
            ..text_shape.clone()
        };
        let inventory = Inventory {
            slides: vec![SlideInventory {
                shapes: vec![picture, text_shape],
            }],
        };

        let doc = ReplacementDocument::from_inventory(&inventory);
        assert_eq!(doc.shape_count(), 1);
        assert!(doc.get(SlideKey(0), ShapeKey(1)).is_some());
        assert!(doc.get(SlideKey(0), ShapeKey(0)).is_none());
    }
}
