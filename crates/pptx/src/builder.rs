//! Builder for new presentations.
//!
//! Produces a small but complete package: one theme, one master with title
//! and body placeholders, one "Title and Content" layout and the requested
//! slides.

use crate::package::{
    rel_kind, write_atomic, Package, Relationship, Relationships, CONTENT_TYPES_PART, REL_TYPE_BASE,
};
use crate::presentation::SlideSize;
use crate::text;
use crate::xml::{Document, Element};
use deck_core::{LengthUnit, ParagraphRecord, PlaceholderType, Result};
use std::path::Path;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_MASTER: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_LAYOUT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

const MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const LAYOUT_PART: &str = "ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";

/// 16:9 widescreen, 13.333 in x 7.5 in.
const WIDESCREEN: SlideSize = SlideSize {
    cx: 12_192_000,
    cy: 6_858_000,
};

/// A 1x1 transparent PNG.
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Position and size in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// A frame given in inches.
    pub fn inches(left: f64, top: f64, width: f64, height: f64) -> Self {
        let emu = |v: f64| LengthUnit::Inches.to_emu(v);
        Self {
            x: emu(left),
            y: emu(top),
            cx: emu(width),
            cy: emu(height),
        }
    }
}

/// A text-bearing shape: a free text box, or a placeholder that takes its
/// geometry from the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    frame: Option<Frame>,
    placeholder: Option<PlaceholderType>,
    name: Option<String>,
    paragraphs: Vec<ParagraphRecord>,
}

impl TextBox {
    /// A text box at the given position, in inches.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            frame: Some(Frame::inches(left, top, width, height)),
            placeholder: None,
            name: None,
            paragraphs: Vec::new(),
        }
    }

    /// A placeholder without its own geometry.
    pub fn placeholder(kind: PlaceholderType) -> Self {
        Self {
            frame: None,
            placeholder: Some(kind),
            name: None,
            paragraphs: Vec::new(),
        }
    }

    /// Give a placeholder an explicit position, in inches.
    pub fn at(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.frame = Some(Frame::inches(left, top, width, height));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a paragraph with plain text.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_paragraph(ParagraphRecord::new(text))
    }

    pub fn with_paragraph(mut self, paragraph: ParagraphRecord) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn with_paragraphs<I: IntoIterator<Item = ParagraphRecord>>(mut self, paragraphs: I) -> Self {
        self.paragraphs.extend(paragraphs);
        self
    }
}

/// A shape on a built slide.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSpec {
    Text(TextBox),
    /// A rectangle without a text body.
    Rectangle(Frame),
    /// A picture backed by a PNG media part.
    Picture { frame: Frame, png: Vec<u8> },
}

impl ShapeSpec {
    /// A plain rectangle, in inches.
    pub fn rectangle(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::Rectangle(Frame::inches(left, top, width, height))
    }

    /// A picture showing [`PLACEHOLDER_PNG`], in inches.
    pub fn picture(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::Picture {
            frame: Frame::inches(left, top, width, height),
            png: PLACEHOLDER_PNG.to_vec(),
        }
    }
}

impl From<TextBox> for ShapeSpec {
    fn from(text_box: TextBox) -> Self {
        Self::Text(text_box)
    }
}

/// Content of one built slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSpec {
    shapes: Vec<ShapeSpec>,
    hidden: bool,
}

impl SlideSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slide with a title box and a body box, the way most test decks look.
    pub fn title_and_body(title: &str, body: &str) -> Self {
        Self::new()
            .with_shape(TextBox::new(0.5, 0.5, 12.0, 1.0).with_name("Title").with_text(title))
            .with_shape(TextBox::new(0.5, 2.0, 12.0, 4.5).with_name("Body").with_text(body))
    }

    pub fn with_shape(mut self, shape: impl Into<ShapeSpec>) -> Self {
        self.shapes.push(shape.into());
        self
    }

    /// Mark the slide hidden in slide show.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Builds a new presentation package.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    slide_size: SlideSize,
    slides: Vec<SlideSpec>,
}

impl DeckBuilder {
    /// A widescreen deck with no slides.
    pub fn new() -> Self {
        Self {
            slide_size: WIDESCREEN,
            slides: Vec::new(),
        }
    }

    /// Set the slide size in inches.
    pub fn with_slide_size(mut self, width: f64, height: f64) -> Self {
        self.slide_size = SlideSize {
            cx: LengthUnit::Inches.to_emu(width),
            cy: LengthUnit::Inches.to_emu(height),
        };
        self
    }

    pub fn add_slide(mut self, slide: SlideSpec) -> Self {
        self.slides.push(slide);
        self
    }

    pub fn add_slides<I: IntoIterator<Item = SlideSpec>>(mut self, slides: I) -> Self {
        self.slides.extend(slides);
        self
    }

    /// Assemble the package in memory.
    pub fn build(&self) -> Result<Package> {
        let mut package = Package::new();
        let mut content_types = ContentTypesBuilder::default();

        let mut package_rels = Relationships::default();
        package_rels.push(rel("rId1", rel_kind::OFFICE_DOCUMENT, "ppt/presentation.xml"));
        package.set_relationships("", &package_rels)?;
        content_types.add("ppt/presentation.xml", CT_PRESENTATION);

        let mut presentation_rels = Relationships::default();
        presentation_rels.push(rel("rId1", rel_kind::SLIDE_MASTER, "slideMasters/slideMaster1.xml"));
        presentation_rels.push(rel("rId2", rel_kind::THEME, "theme/theme1.xml"));

        let mut slide_ids = Vec::with_capacity(self.slides.len());
        let mut media_count = 0;
        for (i, spec) in self.slides.iter().enumerate() {
            let number = i + 1;
            let part = format!("ppt/slides/slide{}.xml", number);
            let rel_id = presentation_rels.next_id();
            presentation_rels.push(rel(&rel_id, rel_kind::SLIDE, &format!("slides/slide{}.xml", number)));
            slide_ids.push((256 + i as u32, rel_id));

            let mut slide_rels = Relationships::default();
            slide_rels.push(rel("rId1", rel_kind::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"));

            let mut shapes = Vec::with_capacity(spec.shapes.len());
            let mut placeholder_idx = 0;
            for (n, shape) in spec.shapes.iter().enumerate() {
                let shape_id = n as u32 + 2;
                let el = match shape {
                    ShapeSpec::Text(text_box) => {
                        let idx = match text_box.placeholder {
                            Some(PlaceholderType::Title | PlaceholderType::CenterTitle) | None => None,
                            Some(_) => {
                                placeholder_idx += 1;
                                Some(placeholder_idx)
                            }
                        };
                        text_box_element(shape_id, text_box, idx)
                    }
                    ShapeSpec::Rectangle(frame) => rectangle_element(shape_id, frame),
                    ShapeSpec::Picture { frame, png } => {
                        media_count += 1;
                        let media = format!("ppt/media/image{}.png", media_count);
                        package.set_part(media.as_str(), png.clone());
                        let embed = slide_rels.next_id();
                        slide_rels.push(rel(&embed, rel_kind::IMAGE, &format!("../media/image{}.png", media_count)));
                        picture_element(shape_id, frame, &embed)
                    }
                };
                shapes.push(el);
            }

            let mut root = slide_root("p:sld", shapes);
            if spec.hidden {
                root.set_attr("show", "0");
            }
            let root = root.with_child(
                Element::new("p:clrMapOvr").with_child(Element::new("a:masterClrMapping")),
            );

            package.set_xml_part(part.as_str(), &Document::new(root))?;
            package.set_relationships(&part, &slide_rels)?;
            content_types.add(&part, crate::package::SLIDE_CONTENT_TYPE);
        }
        package.set_xml_part("ppt/presentation.xml", &Document::new(self.presentation_element(&slide_ids)))?;
        package.set_relationships("ppt/presentation.xml", &presentation_rels)?;

        package.set_xml_part(MASTER_PART, &Document::new(self.master_element()))?;
        let mut master_rels = Relationships::default();
        master_rels.push(rel("rId1", rel_kind::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"));
        master_rels.push(rel("rId2", rel_kind::THEME, "../theme/theme1.xml"));
        package.set_relationships(MASTER_PART, &master_rels)?;
        content_types.add(MASTER_PART, CT_MASTER);

        package.set_xml_part(LAYOUT_PART, &Document::new(layout_element()))?;
        let mut layout_rels = Relationships::default();
        layout_rels.push(rel("rId1", rel_kind::SLIDE_MASTER, "../slideMasters/slideMaster1.xml"));
        package.set_relationships(LAYOUT_PART, &layout_rels)?;
        content_types.add(LAYOUT_PART, CT_LAYOUT);

        package.set_part(THEME_PART, THEME_XML.as_bytes().to_vec());
        content_types.add(THEME_PART, CT_THEME);

        package.set_part(CONTENT_TYPES_PART, content_types.to_bytes(media_count > 0)?);

        log::debug!("Built package with {} slides", self.slides.len());
        Ok(package)
    }

    /// Build and write to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.build()?.to_bytes()?;
        write_atomic(path.as_ref(), &bytes)
    }

    fn presentation_element(&self, slide_ids: &[(u32, String)]) -> Element {
        let mut root = namespaced("p:presentation").with_attr("saveSubsetFonts", "1");
        root = root.with_child(
            Element::new("p:sldMasterIdLst").with_child(
                Element::new("p:sldMasterId")
                    .with_attr("id", "2147483648")
                    .with_attr("r:id", "rId1"),
            ),
        );

        if !slide_ids.is_empty() {
            let list = slide_ids.iter().fold(Element::new("p:sldIdLst"), |list, (id, rel_id)| {
                list.with_child(
                    Element::new("p:sldId")
                        .with_attr("id", id.to_string())
                        .with_attr("r:id", rel_id.as_str()),
                )
            });
            root = root.with_child(list);
        }

        root.with_child(
            Element::new("p:sldSz")
                .with_attr("cx", self.slide_size.cx.to_string())
                .with_attr("cy", self.slide_size.cy.to_string()),
        )
        .with_child(
            Element::new("p:notesSz")
                .with_attr("cx", "6858000")
                .with_attr("cy", "9144000"),
        )
    }

    fn master_element(&self) -> Element {
        let SlideSize { cx, cy } = self.slide_size;
        let title = Frame {
            x: cx / 12,
            y: cy / 24,
            cx: cx * 10 / 12,
            cy: cy / 6,
        };
        let body = Frame {
            x: cx / 12,
            y: cy / 4,
            cx: cx * 10 / 12,
            cy: cy * 2 / 3,
        };

        let shapes = vec![
            placeholder_shape(2, "Title Placeholder 1", PlaceholderType::Title, None, Some(&title)),
            placeholder_shape(3, "Text Placeholder 2", PlaceholderType::Body, Some(1), Some(&body)),
        ];

        slide_root("p:sldMaster", shapes)
            .with_child(
                Element::new("p:clrMap")
                    .with_attr("bg1", "lt1")
                    .with_attr("tx1", "dk1")
                    .with_attr("bg2", "lt2")
                    .with_attr("tx2", "dk2")
                    .with_attr("accent1", "accent1")
                    .with_attr("accent2", "accent2")
                    .with_attr("accent3", "accent3")
                    .with_attr("accent4", "accent4")
                    .with_attr("accent5", "accent5")
                    .with_attr("accent6", "accent6")
                    .with_attr("hlink", "hlink")
                    .with_attr("folHlink", "folHlink"),
            )
            .with_child(
                Element::new("p:sldLayoutIdLst").with_child(
                    Element::new("p:sldLayoutId")
                        .with_attr("id", "2147483649")
                        .with_attr("r:id", "rId1"),
                ),
            )
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn layout_element() -> Element {
    let shapes = vec![
        placeholder_shape(2, "Title 1", PlaceholderType::Title, None, None),
        placeholder_shape(3, "Content Placeholder 2", PlaceholderType::Object, Some(1), None),
    ];
    let mut root = slide_root("p:sldLayout", shapes)
        .with_attr("type", "obj")
        .with_attr("preserve", "1");
    if let Some(c_sld) = root.child_mut("cSld") {
        c_sld.set_attr("name", "Title and Content");
    }
    root.with_child(Element::new("p:clrMapOvr").with_child(Element::new("a:masterClrMapping")))
}

fn rel(id: &str, kind: &str, target: &str) -> Relationship {
    Relationship {
        id: id.to_string(),
        rel_type: format!("{}{}", REL_TYPE_BASE, kind),
        target: target.to_string(),
        external: false,
    }
}

fn namespaced(name: &str) -> Element {
    Element::new(name)
        .with_attr("xmlns:a", NS_A)
        .with_attr("xmlns:r", NS_R)
        .with_attr("xmlns:p", NS_P)
}

/// `<root><p:cSld><p:spTree>` with the group properties and `shapes`.
fn slide_root(name: &str, shapes: Vec<Element>) -> Element {
    let zero = Frame {
        x: 0,
        y: 0,
        cx: 0,
        cy: 0,
    };
    let mut group_xfrm = xfrm("a:xfrm", &zero);
    group_xfrm = group_xfrm
        .with_child(Element::new("a:chOff").with_attr("x", "0").with_attr("y", "0"))
        .with_child(Element::new("a:chExt").with_attr("cx", "0").with_attr("cy", "0"));

    let tree = Element::new("p:spTree")
        .with_child(
            Element::new("p:nvGrpSpPr")
                .with_child(Element::new("p:cNvPr").with_attr("id", "1").with_attr("name", ""))
                .with_child(Element::new("p:cNvGrpSpPr"))
                .with_child(Element::new("p:nvPr")),
        )
        .with_child(Element::new("p:grpSpPr").with_child(group_xfrm));
    let tree = shapes.into_iter().fold(tree, Element::with_child);

    namespaced(name).with_child(Element::new("p:cSld").with_child(tree))
}

fn xfrm(name: &str, frame: &Frame) -> Element {
    Element::new(name)
        .with_child(
            Element::new("a:off")
                .with_attr("x", frame.x.to_string())
                .with_attr("y", frame.y.to_string()),
        )
        .with_child(
            Element::new("a:ext")
                .with_attr("cx", frame.cx.to_string())
                .with_attr("cy", frame.cy.to_string()),
        )
}

fn shape_props(frame: Option<&Frame>) -> Element {
    match frame {
        Some(frame) => Element::new("p:spPr")
            .with_child(xfrm("a:xfrm", frame))
            .with_child(Element::new("a:prstGeom").with_attr("prst", "rect").with_child(Element::new("a:avLst"))),
        None => Element::new("p:spPr"),
    }
}

fn ph_element(kind: PlaceholderType, idx: Option<u32>) -> Element {
    let mut ph = Element::new("p:ph");
    if kind != PlaceholderType::Object {
        ph.set_attr("type", kind.as_ooxml());
    }
    if let Some(idx) = idx {
        ph.set_attr("idx", idx.to_string());
    }
    ph
}

fn placeholder_shape(
    id: u32,
    name: &str,
    kind: PlaceholderType,
    idx: Option<u32>,
    frame: Option<&Frame>,
) -> Element {
    Element::new("p:sp")
        .with_child(
            Element::new("p:nvSpPr")
                .with_child(Element::new("p:cNvPr").with_attr("id", id.to_string()).with_attr("name", name))
                .with_child(
                    Element::new("p:cNvSpPr")
                        .with_child(Element::new("a:spLocks").with_attr("noGrp", "1")),
                )
                .with_child(Element::new("p:nvPr").with_child(ph_element(kind, idx))),
        )
        .with_child(shape_props(frame))
        .with_child(
            text::new_text_body(Some("p"), "a")
                .with_child(text::build_paragraph("a", &ParagraphRecord::default(), None)),
        )
}

fn text_box_element(id: u32, text_box: &TextBox, idx: Option<u32>) -> Element {
    let default_name = match text_box.placeholder {
        Some(_) => format!("Placeholder {}", id - 1),
        None => format!("TextBox {}", id - 1),
    };
    let name = text_box.name.clone().unwrap_or(default_name);

    let (c_nv_sp_pr, nv_pr) = match text_box.placeholder {
        Some(kind) => (
            Element::new("p:cNvSpPr").with_child(Element::new("a:spLocks").with_attr("noGrp", "1")),
            Element::new("p:nvPr").with_child(ph_element(kind, idx)),
        ),
        None => (
            Element::new("p:cNvSpPr").with_attr("txBox", "1"),
            Element::new("p:nvPr"),
        ),
    };

    let mut body = Element::new("p:txBody")
        .with_child(Element::new("a:bodyPr").with_attr("wrap", "square").with_attr("rtlCol", "0"))
        .with_child(Element::new("a:lstStyle"));
    text::write_text_body(&mut body, &text_box.paragraphs);

    Element::new("p:sp")
        .with_child(
            Element::new("p:nvSpPr")
                .with_child(Element::new("p:cNvPr").with_attr("id", id.to_string()).with_attr("name", name))
                .with_child(c_nv_sp_pr)
                .with_child(nv_pr),
        )
        .with_child(shape_props(text_box.frame.as_ref()))
        .with_child(body)
}

fn rectangle_element(id: u32, frame: &Frame) -> Element {
    Element::new("p:sp")
        .with_child(
            Element::new("p:nvSpPr")
                .with_child(
                    Element::new("p:cNvPr")
                        .with_attr("id", id.to_string())
                        .with_attr("name", format!("Rectangle {}", id - 1)),
                )
                .with_child(Element::new("p:cNvSpPr"))
                .with_child(Element::new("p:nvPr")),
        )
        .with_child(shape_props(Some(frame)))
}

fn picture_element(id: u32, frame: &Frame, embed: &str) -> Element {
    Element::new("p:pic")
        .with_child(
            Element::new("p:nvPicPr")
                .with_child(
                    Element::new("p:cNvPr")
                        .with_attr("id", id.to_string())
                        .with_attr("name", format!("Picture {}", id - 1)),
                )
                .with_child(
                    Element::new("p:cNvPicPr")
                        .with_child(Element::new("a:picLocks").with_attr("noChangeAspect", "1")),
                )
                .with_child(Element::new("p:nvPr")),
        )
        .with_child(
            Element::new("p:blipFill")
                .with_child(Element::new("a:blip").with_attr("r:embed", embed))
                .with_child(Element::new("a:stretch").with_child(Element::new("a:fillRect"))),
        )
        .with_child(shape_props(Some(frame)))
}

#[derive(Default)]
struct ContentTypesBuilder {
    overrides: Vec<(String, &'static str)>,
}

impl ContentTypesBuilder {
    fn add(&mut self, part: &str, content_type: &'static str) {
        self.overrides.push((format!("/{}", part), content_type));
    }

    fn to_bytes(&self, with_png: bool) -> Result<Vec<u8>> {
        let mut root = Element::new("Types")
            .with_attr("xmlns", NS_CONTENT_TYPES)
            .with_child(
                Element::new("Default")
                    .with_attr("Extension", "rels")
                    .with_attr("ContentType", CT_RELS),
            )
            .with_child(
                Element::new("Default")
                    .with_attr("Extension", "xml")
                    .with_attr("ContentType", "application/xml"),
            );
        if with_png {
            root = root.with_child(
                Element::new("Default")
                    .with_attr("Extension", "png")
                    .with_attr("ContentType", "image/png"),
            );
        }
        for (part, content_type) in &self.overrides {
            root = root.with_child(
                Element::new("Override")
                    .with_attr("PartName", part.as_str())
                    .with_attr("ContentType", *content_type),
            );
        }
        Document::new(root).to_bytes()
    }
}

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;
