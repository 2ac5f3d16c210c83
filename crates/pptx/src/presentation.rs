//! The main presentation part: slide list, slide size and slide access.

use crate::package::{rel_kind, resolve_target, Package, Relationships};
use crate::parser::extract_slide_number;
use crate::xml::{qualify, Document, Element, Node};
use deck_core::{Error, Result, SlideKey};
use std::collections::HashSet;
use std::path::Path;

const OFFICE_RELS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// `p:presentation` children that follow `p:sldIdLst`.
const AFTER_SLIDE_LIST: &[&str] = &[
    "sldSz",
    "notesSz",
    "smartTags",
    "embeddedFontLst",
    "custShowLst",
    "photoAlbum",
    "custDataLst",
    "kinsoku",
    "defaultTextStyle",
    "modifyVerifier",
    "extLst",
];

/// Default 4:3 slide size in EMU, used when `p:sldSz` is absent.
const DEFAULT_SLIDE_SIZE: SlideSize = SlideSize {
    cx: 9_144_000,
    cy: 6_858_000,
};

/// Slide dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

/// One `p:sldId` entry resolved to its part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRef {
    pub id: u32,
    pub rel_id: String,
    pub part: String,
}

/// An opened presentation.
#[derive(Debug, Clone)]
pub struct Deck {
    package: Package,
    main_part: String,
    document: Document,
    rels: Relationships,
    slides: Vec<SlideRef>,
    slide_size: SlideSize,
}

impl Deck {
    /// Open a `.pptx` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening {}", path.display());
        Self::from_package(Package::open(path)?)
    }

    /// Interpret an already loaded package.
    pub fn from_package(package: Package) -> Result<Self> {
        let main_part = package.main_part_name()?;
        let document = package.xml_part(&main_part)?;
        let rels = package.relationships(&main_part)?;

        let slides = match document.root.child("sldIdLst") {
            Some(list) => read_slide_list(&package, &main_part, &rels, list)?,
            None => slides_from_relationships(&package, &main_part, &rels),
        };

        let slide_size = document
            .root
            .child("sldSz")
            .and_then(|sz| {
                Some(SlideSize {
                    cx: sz.attr("cx")?.parse().ok()?,
                    cy: sz.attr("cy")?.parse().ok()?,
                })
            })
            .unwrap_or(DEFAULT_SLIDE_SIZE);

        log::debug!(
            "{} has {} slides, size {}x{} EMU",
            main_part,
            slides.len(),
            slide_size.cx,
            slide_size.cy
        );

        Ok(Self {
            package,
            main_part,
            document,
            rels,
            slides,
            slide_size,
        })
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn package_mut(&mut self) -> &mut Package {
        &mut self.package
    }

    /// Name of the main presentation part.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[SlideRef] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    /// Relationships of the main presentation part.
    pub fn relationships(&self) -> &Relationships {
        &self.rels
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    fn slide_ref(&self, index: usize) -> Result<&SlideRef> {
        self.slides
            .get(index)
            .ok_or_else(|| Error::SlideNotFound(SlideKey(index).to_string()))
    }

    /// Parse the XML of the slide at `index`.
    pub fn slide_document(&self, index: usize) -> Result<Document> {
        let slide = self.slide_ref(index)?;
        self.package.xml_part(&slide.part)
    }

    /// Store edited slide XML for the slide at `index`.
    pub fn set_slide_document(&mut self, index: usize, doc: &Document) -> Result<()> {
        let part = self.slide_ref(index)?.part.clone();
        self.package.set_xml_part(part, doc)
    }

    /// Replace the slide list.
    ///
    /// Custom shows and sections lose entries for slides that are no longer
    /// listed. Relationships are not touched.
    pub fn set_slide_list(&mut self, slides: Vec<SlideRef>) {
        let rel_attr = qualify(Some(&self.rels_prefix()), "id");
        let root = &mut self.document.root;

        if root.child("sldIdLst").is_none() {
            let at = root.position_of(AFTER_SLIDE_LIST).unwrap_or(root.children.len());
            let list = Element::new(root.sibling_name("sldIdLst"));
            root.children.insert(at, Node::Element(list));
        }
        let entry_name = root.sibling_name("sldId");
        if let Some(list) = root.child_mut("sldIdLst") {
            list.children = slides
                .iter()
                .map(|s| {
                    Node::Element(
                        Element::new(entry_name.as_str())
                            .with_attr("id", s.id.to_string())
                            .with_attr(rel_attr.as_str(), s.rel_id.as_str()),
                    )
                })
                .collect();
        }

        let kept_ids: HashSet<String> = slides.iter().map(|s| s.id.to_string()).collect();
        let kept_rels: HashSet<&str> = slides.iter().map(|s| s.rel_id.as_str()).collect();

        if let Some(shows) = root.child_mut("custShowLst") {
            for show in shows.elements_mut() {
                if let Some(list) = show.child_mut("sldLst") {
                    list.retain_elements(|e| e.rel_id().is_some_and(|id| kept_rels.contains(id)));
                }
            }
        }
        for_each_section_list(root, &mut |list| {
            list.retain_elements(|e| e.attr("id").is_some_and(|id| kept_ids.contains(id)));
        });

        self.slides = slides;
    }

    /// List `new_id` in the same section as `source_id`, right after it.
    pub fn add_to_section_of(&mut self, source_id: u32, new_id: u32) {
        let source = source_id.to_string();
        let mut placed = false;
        for_each_section_list(&mut self.document.root, &mut |list| {
            if placed {
                return;
            }
            if let Some(pos) = list
                .children
                .iter()
                .position(|n| matches!(n, Node::Element(e) if e.attr("id") == Some(source.as_str())))
            {
                let mut entry = Element::new(list.sibling_name("sldId"));
                entry.set_attr("id", new_id.to_string());
                list.children.insert(pos + 1, Node::Element(entry));
                placed = true;
            }
        });
    }

    /// Largest slide id in use, including ids only listed in sections.
    pub fn max_slide_id(&self) -> u32 {
        let listed = self.slides.iter().map(|s| s.id).max().unwrap_or(0);
        let sectioned = self
            .document
            .root
            .child("extLst")
            .into_iter()
            .flat_map(|ext_list| ext_list.elements())
            .flat_map(|ext| ext.elements().filter(|e| e.local_name() == "sectionLst"))
            .flat_map(|sections| sections.elements())
            .filter_map(|section| section.child("sldIdLst"))
            .flat_map(|ids| ids.elements())
            .filter_map(|e| e.attr("id")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        listed.max(sectioned)
    }

    /// Namespace prefix bound to the officeDocument relationships namespace.
    fn rels_prefix(&self) -> String {
        self.document
            .root
            .attributes
            .iter()
            .find(|(k, v)| k.starts_with("xmlns:") && v == OFFICE_RELS_NS)
            .map(|(k, _)| k["xmlns:".len()..].to_string())
            .unwrap_or_else(|| "r".to_string())
    }

    /// Write the presentation part and its relationships back into the package.
    pub fn flush(&mut self) -> Result<()> {
        self.package.set_xml_part(self.main_part.clone(), &self.document)?;
        self.package.set_relationships(&self.main_part, &self.rels)
    }

    /// Flush and save to `path`.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.flush()?;
        self.package.save(path.as_ref())?;
        log::debug!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

fn read_slide_list(
    package: &Package,
    main_part: &str,
    rels: &Relationships,
    list: &Element,
) -> Result<Vec<SlideRef>> {
    let mut slides = Vec::new();
    for entry in list.elements().filter(|e| e.local_name() == "sldId") {
        let rel_id = entry
            .rel_id()
            .ok_or_else(|| Error::CorruptedFile("slide entry without relationship id".to_string()))?;
        let rel = rels.get(rel_id).ok_or_else(|| {
            Error::CorruptedFile(format!(
                "slide relationship '{}' missing from {}",
                rel_id, main_part
            ))
        })?;
        let part = resolve_target(main_part, &rel.target);
        if !package.contains(&part) {
            return Err(Error::CorruptedFile(format!("missing slide part '{}'", part)));
        }
        slides.push(SlideRef {
            id: entry.attr("id").and_then(|v| v.parse().ok()).unwrap_or(0),
            rel_id: rel_id.to_string(),
            part,
        });
    }
    Ok(slides)
}

/// Slide order when the presentation has no `p:sldIdLst`: slide
/// relationships sorted by the number in their target.
fn slides_from_relationships(package: &Package, main_part: &str, rels: &Relationships) -> Vec<SlideRef> {
    let mut slides: Vec<(SlideRef, Option<usize>)> = rels
        .iter()
        .filter(|r| r.kind() == rel_kind::SLIDE && !r.external)
        .map(|r| {
            let part = resolve_target(main_part, &r.target);
            let number = extract_slide_number(&part);
            (
                SlideRef {
                    id: 0,
                    rel_id: r.id.clone(),
                    part,
                },
                number,
            )
        })
        .filter(|(s, _)| package.contains(&s.part))
        .collect();

    if slides.is_empty() {
        return Vec::new();
    }
    log::warn!(
        "{} has no slide list, ordering {} slides by part name",
        main_part,
        slides.len()
    );

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.part.cmp(&b.0.part),
    });

    slides
        .into_iter()
        .enumerate()
        .map(|(i, (mut s, _))| {
            s.id = 256 + i as u32;
            s
        })
        .collect()
}

/// Visit every `p14:sectionLst/p14:section/p14:sldIdLst` under the
/// presentation's extension list.
fn for_each_section_list(root: &mut Element, visit: &mut dyn FnMut(&mut Element)) {
    let Some(ext_list) = root.child_mut("extLst") else {
        return;
    };
    for ext in ext_list.elements_mut() {
        for section_list in ext.elements_mut().filter(|e| e.local_name() == "sectionLst") {
            for section in section_list.elements_mut() {
                if let Some(ids) = section.child_mut("sldIdLst") {
                    visit(ids);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{DeckBuilder, SlideSpec, TextBox};

    fn three_slide_deck() -> Deck {
        let package = DeckBuilder::new()
            .add_slide(SlideSpec::new().with_shape(TextBox::new(0.5, 0.5, 4.0, 1.0).with_text("one")))
            .add_slide(SlideSpec::new().with_shape(TextBox::new(0.5, 0.5, 4.0, 1.0).with_text("two")))
            .add_slide(SlideSpec::new().with_shape(TextBox::new(0.5, 0.5, 4.0, 1.0).with_text("three")))
            .build()
            .unwrap();
        Deck::from_package(package).unwrap()
    }

    #[test]
    fn test_slide_order_and_size() {
        let deck = three_slide_deck();
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slides()[0].part, "ppt/slides/slide1.xml");
        assert_eq!(deck.slides()[2].id, 258);
        assert_eq!(deck.slide_size(), SlideSize { cx: 12_192_000, cy: 6_858_000 });
    }

    #[test]
    fn test_slide_document_out_of_range() {
        let deck = three_slide_deck();
        assert!(deck.slide_document(2).is_ok());
        assert!(matches!(deck.slide_document(3), Err(Error::SlideNotFound(key)) if key == "slide-3"));
    }

    #[test]
    fn test_set_slide_list_reorders() {
        let mut deck = three_slide_deck();
        let mut slides = deck.slides().to_vec();
        slides.reverse();
        deck.set_slide_list(slides);
        deck.flush().unwrap();

        let reopened = Deck::from_package(deck.package().clone()).unwrap();
        assert_eq!(reopened.slides()[0].part, "ppt/slides/slide3.xml");
        assert_eq!(reopened.slides()[2].part, "ppt/slides/slide1.xml");
    }

    #[test]
    fn test_sections_follow_slide_list() {
        let mut deck = three_slide_deck();
        let section_xml = r#"<p:extLst xmlns:p="urn:p"><p:ext uri="{521415D9-36F7-43E2-AB2F-B90AF26B5E84}"><p14:sectionLst xmlns:p14="urn:p14"><p14:section name="Default"><p14:sldIdLst><p14:sldId id="256"/><p14:sldId id="257"/><p14:sldId id="258"/></p14:sldIdLst></p14:section></p14:sectionLst></p:ext></p:extLst>"#;
        let ext = Document::parse_str(section_xml).unwrap().root;
        deck.document.root.children.push(Node::Element(ext));

        let first = deck.slides()[0].clone();
        deck.set_slide_list(vec![first]);
        deck.add_to_section_of(256, 300);
        assert_eq!(deck.max_slide_id(), 300);

        let ids: Vec<String> = deck
            .document
            .root
            .path(&["extLst", "ext", "sectionLst", "section", "sldIdLst"])
            .unwrap()
            .elements()
            .filter_map(|e| e.attr("id").map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["256", "300"]);
    }
}
