//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use deck_core::{Inventory, ShapeKey, SlideKey};
use deck_pptx::{DeckBuilder, InventoryExtractor, SlideSpec};
use std::path::{Path, PathBuf};

/// Write a deck of `n` title-and-body slides titled "Slide 0", "Slide 1", ...
pub fn numbered_deck(dir: &Path, n: usize) -> PathBuf {
    let path = dir.join(format!("deck_{}.pptx", n));
    DeckBuilder::new()
        .add_slides((0..n).map(|i| {
            SlideSpec::title_and_body(&format!("Slide {}", i), &format!("Content for slide {}", i))
        }))
        .save(&path)
        .unwrap();
    path
}

/// Inventory a file with default options.
pub fn inventory(path: &Path) -> Inventory {
    InventoryExtractor::new().extract_file(path).unwrap()
}

/// Text of the first shape on every slide.
pub fn titles(path: &Path) -> Vec<String> {
    let inventory = inventory(path);
    inventory
        .iter()
        .map(|(key, _)| inventory.shape(key, ShapeKey(0)).unwrap().text())
        .collect()
}

/// Text of one shape.
pub fn shape_text(path: &Path, slide: usize, shape: usize) -> String {
    inventory(path)
        .shape(SlideKey(slide), ShapeKey(shape))
        .unwrap()
        .text()
}
