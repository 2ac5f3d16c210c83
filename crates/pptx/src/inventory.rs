//! Inventory extraction: slides, shapes, positions and paragraphs as JSON.

use crate::package::{rel_kind, resolve_target, write_atomic, Package};
use crate::parser::{parse_shapes, PlaceholderRef, SlideShape, Transform};
use crate::presentation::{Deck, SlideSize};
use crate::xml::Document;
use deck_core::{Inventory, LengthUnit, Result, ShapeKey, ShapeRecord, SlideInventory, SlideKey};
use std::collections::HashMap;
use std::path::Path;

/// Output options for the inventory document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryOptions {
    /// Unit for `left`, `top`, `width` and `height`.
    pub unit: LengthUnit,
    /// Pretty-print the JSON.
    pub pretty: bool,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Inches,
            pretty: true,
        }
    }
}

impl InventoryOptions {
    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Extracts an [`Inventory`] from a presentation.
#[derive(Debug, Clone, Default)]
pub struct InventoryExtractor {
    options: InventoryOptions,
}

impl InventoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: InventoryOptions) -> Self {
        self.options = options;
        self
    }

    /// Inventory every slide of an opened deck, hidden slides included.
    pub fn extract(&self, deck: &Deck) -> Result<Inventory> {
        let mut layouts = LayoutCache::new(deck.package());
        let size = deck.slide_size();
        let mut inventory = Inventory::default();

        for (index, slide) in deck.slides().iter().enumerate() {
            let doc = deck.slide_document(index)?;
            let shapes = parse_shapes(&doc)?;
            log::debug!("{} ({}): {} shapes", SlideKey(index), slide.part, shapes.len());

            let records = shapes
                .iter()
                .enumerate()
                .map(|(n, shape)| {
                    let transform = shape.transform.or_else(|| {
                        shape
                            .placeholder
                            .and_then(|ph| layouts.inherited_transform(&slide.part, ph))
                    });
                    self.record(SlideKey(index), ShapeKey(n), shape, transform, size)
                })
                .collect();
            inventory.slides.push(SlideInventory { shapes: records });
        }

        Ok(inventory)
    }

    /// Open a file and inventory it.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Inventory> {
        self.extract(&Deck::open(path)?)
    }

    /// Serialize an inventory to `path`.
    pub fn write<P: AsRef<Path>>(&self, inventory: &Inventory, path: P) -> Result<()> {
        let json = inventory.to_json(self.options.pretty)?;
        write_atomic(path.as_ref(), json.as_bytes())
    }

    /// Inventory `input` and write the JSON document to `output`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<Inventory> {
        let inventory = self.extract_file(input)?;
        self.write(&inventory, output)?;
        Ok(inventory)
    }

    fn record(
        &self,
        slide: SlideKey,
        shape: ShapeKey,
        parsed: &SlideShape,
        transform: Option<Transform>,
        size: SlideSize,
    ) -> ShapeRecord {
        let unit = self.options.unit;
        let t = transform.unwrap_or_default();

        let overflow_right = (t.right() > size.cx).then(|| unit.from_emu(t.right() - size.cx));
        let overflow_bottom = (t.bottom() > size.cy).then(|| unit.from_emu(t.bottom() - size.cy));
        if overflow_right.is_some() || overflow_bottom.is_some() {
            log::warn!(
                "{} {} ({}) extends past the slide edge",
                slide,
                shape,
                parsed.name.as_deref().unwrap_or("unnamed")
            );
        }

        ShapeRecord {
            left: unit.from_emu(t.x),
            top: unit.from_emu(t.y),
            width: unit.from_emu(t.cx),
            height: unit.from_emu(t.cy),
            placeholder_type: parsed.placeholder.map(|ph| ph.kind),
            paragraphs: parsed.paragraphs.clone(),
            slide_overflow_right: overflow_right,
            slide_overflow_bottom: overflow_bottom,
        }
    }
}

/// Parsed layout and master shapes, loaded on first use.
struct LayoutCache<'a> {
    package: &'a Package,
    shapes: HashMap<String, Vec<SlideShape>>,
}

impl<'a> LayoutCache<'a> {
    fn new(package: &'a Package) -> Self {
        Self {
            package,
            shapes: HashMap::new(),
        }
    }

    /// Geometry of the matching placeholder on the slide's layout, else on
    /// the layout's master.
    fn inherited_transform(&mut self, slide_part: &str, ph: PlaceholderRef) -> Option<Transform> {
        let layout = self.related_part(slide_part, rel_kind::SLIDE_LAYOUT)?;
        let on_layout = find_placeholder(self.shapes(&layout), ph)
            .map(|s| (s.transform, s.placeholder));
        if let Some((Some(transform), _)) = on_layout {
            return Some(transform);
        }

        // The layout's own type is more specific than an untyped slide placeholder.
        let kind = on_layout
            .and_then(|(_, layout_ph)| layout_ph)
            .unwrap_or(ph)
            .kind
            .master_equivalent();
        let master = self.related_part(&layout, rel_kind::SLIDE_MASTER)?;
        self.shapes(&master)
            .iter()
            .find(|s| s.placeholder.is_some_and(|p| p.kind.master_equivalent() == kind))
            .and_then(|s| s.transform)
    }

    fn related_part(&self, source: &str, kind: &str) -> Option<String> {
        let rels = match self.package.relationships(source) {
            Ok(rels) => rels,
            Err(e) => {
                log::warn!("Ignoring relationships of {}: {}", source, e);
                return None;
            }
        };
        let rel = rels.first_of_kind(kind)?;
        let part = resolve_target(source, &rel.target);
        self.package.contains(&part).then_some(part)
    }

    fn shapes(&mut self, part: &str) -> &[SlideShape] {
        let package = self.package;
        self.shapes.entry(part.to_string()).or_insert_with(|| {
            let parsed = package
                .xml_part(part)
                .and_then(|doc: Document| parse_shapes(&doc));
            parsed.unwrap_or_else(|e| {
                log::warn!("Ignoring placeholders of {}: {}", part, e);
                Vec::new()
            })
        })
    }
}

/// The placeholder with the same `idx`, else the first one of the same type.
fn find_placeholder(shapes: &[SlideShape], ph: PlaceholderRef) -> Option<&SlideShape> {
    let placeholders = || shapes.iter().filter_map(|s| s.placeholder.map(|p| (s, p)));

    ph.idx
        .and_then(|idx| placeholders().find(|(_, p)| p.idx == Some(idx)))
        .or_else(|| placeholders().find(|(_, p)| p.kind == ph.kind))
        .map(|(s, _)| s)
}
