//! Core data model for slide-deck inventory, text replacement and slide
//! rearrangement.

pub mod error;
pub mod indices;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use indices::{check_indices, parse_indices};
pub use types::{
    Alignment, Inventory, ParagraphRecord, PlaceholderType, ReplacementDocument, RgbColor,
    ShapeKey, ShapeRecord, ShapeReplacement, SlideInventory, SlideKey,
};
pub use units::LengthUnit;
