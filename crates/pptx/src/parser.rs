//! Shape-tree parsing for slide, layout and master parts.

use crate::text;
use crate::xml::{Document, Element};
use deck_core::{Error, ParagraphRecord, PlaceholderType, Result};

/// Kind of a top-level shape-tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// `p:sp`, an auto shape or text box.
    Shape,
    Picture,
    /// `p:graphicFrame`: tables, charts, diagrams, OLE objects.
    GraphicFrame,
    Group,
    Connector,
    ContentPart,
}

impl ShapeKind {
    /// Map a shape-tree element's local name.
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "sp" => Some(Self::Shape),
            "pic" => Some(Self::Picture),
            "graphicFrame" => Some(Self::GraphicFrame),
            "grpSp" => Some(Self::Group),
            "cxnSp" => Some(Self::Connector),
            "contentPart" => Some(Self::ContentPart),
            _ => None,
        }
    }

    /// Only plain shapes carry a DrawingML text body.
    pub fn can_hold_text(self) -> bool {
        matches!(self, Self::Shape)
    }
}

/// Offset and extent in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Transform {
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.cx)
    }

    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.cy)
    }
}

/// A shape's `p:ph` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderRef {
    pub kind: PlaceholderType,
    pub idx: Option<u32>,
}

/// A parsed top-level shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideShape {
    pub kind: ShapeKind,
    pub name: Option<String>,
    /// Own transform; `None` when inherited from a layout or master.
    pub transform: Option<Transform>,
    pub placeholder: Option<PlaceholderRef>,
    pub paragraphs: Vec<ParagraphRecord>,
}

/// The `p:cSld/p:spTree` element of a slide-like part.
pub fn shape_tree(doc: &Document) -> Result<&Element> {
    doc.root
        .path(&["cSld", "spTree"])
        .ok_or_else(|| Error::CorruptedFile(format!("<{}> has no shape tree", doc.root.name)))
}

/// Mutable `p:cSld/p:spTree`.
pub fn shape_tree_mut(doc: &mut Document) -> Result<&mut Element> {
    let name = doc.root.name.clone();
    doc.root
        .path_mut(&["cSld", "spTree"])
        .ok_or_else(|| Error::CorruptedFile(format!("<{}> has no shape tree", name)))
}

/// Top-level shape elements in z-order.
pub fn shape_elements(tree: &Element) -> impl Iterator<Item = &Element> {
    tree.elements()
        .filter(|e| ShapeKind::from_local_name(e.local_name()).is_some())
}

/// The `n`th top-level shape element.
pub fn nth_shape_mut(tree: &mut Element, n: usize) -> Option<&mut Element> {
    tree.elements_mut()
        .filter(|e| ShapeKind::from_local_name(e.local_name()).is_some())
        .nth(n)
}

/// Parse every top-level shape of a slide-like part.
pub fn parse_shapes(doc: &Document) -> Result<Vec<SlideShape>> {
    let tree = shape_tree(doc)?;
    Ok(shape_elements(tree).filter_map(parse_shape).collect())
}

/// Parse one shape-tree entry.
pub fn parse_shape(el: &Element) -> Option<SlideShape> {
    let kind = ShapeKind::from_local_name(el.local_name())?;
    let nv = non_visual_props(el);

    let name = nv
        .and_then(|nv| nv.child("cNvPr"))
        .and_then(|c| c.attr("name"))
        .map(str::to_string);

    let placeholder = nv
        .and_then(|nv| nv.path(&["nvPr", "ph"]))
        .map(|ph| {
            let ty = ph.attr("type");
            let kind = PlaceholderType::from_ooxml(ty).unwrap_or_else(|| {
                log::debug!("Unknown placeholder type {:?}, treating as object", ty);
                PlaceholderType::Object
            });
            PlaceholderRef {
                kind,
                idx: ph.attr("idx").and_then(|v| v.parse().ok()),
            }
        });

    let paragraphs = if kind.can_hold_text() {
        el.child("txBody")
            .map(text::read_text_body)
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Some(SlideShape {
        kind,
        name,
        transform: read_transform(el),
        placeholder,
        paragraphs,
    })
}

/// The `nv*Pr` child holding the shape's non-visual properties.
fn non_visual_props(el: &Element) -> Option<&Element> {
    el.elements().find(|c| {
        let name = c.local_name();
        name.starts_with("nv") && name.ends_with("Pr")
    })
}

/// Read the shape's own `xfrm`, wherever its kind keeps it.
pub fn read_transform(el: &Element) -> Option<Transform> {
    let xfrm = el
        .path(&["spPr", "xfrm"])
        .or_else(|| el.path(&["grpSpPr", "xfrm"]))
        .or_else(|| el.child("xfrm"))?;

    let off = xfrm.child("off");
    let ext = xfrm.child("ext");
    Some(Transform {
        x: emu_attr(off, "x"),
        y: emu_attr(off, "y"),
        cx: emu_attr(ext, "cx"),
        cy: emu_attr(ext, "cy"),
    })
}

fn emu_attr(el: Option<&Element>, name: &str) -> i64 {
    el.and_then(|e| e.attr(name))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Extract a trailing number from a string like "rId2" or "slide3.xml".
pub(crate) fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".rels").trim_end_matches(".xml");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
