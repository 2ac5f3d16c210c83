//! PPTX (Office Open XML) backend: inventory, text replacement, slide
//! rearrangement and deck building.
//!
//! A .pptx file is a ZIP archive of XML parts linked by relationships. The
//! package is read fully into memory, edited part by part and written back
//! as a new archive.

pub mod builder;
pub mod inventory;
pub mod package;
pub mod parser;
pub mod presentation;
pub mod rearrange;
pub mod replace;
pub mod text;
pub mod xml;

pub use builder::{DeckBuilder, ShapeSpec, SlideSpec, TextBox};
pub use inventory::{InventoryExtractor, InventoryOptions};
pub use package::Package;
pub use presentation::{Deck, SlideRef, SlideSize};
pub use rearrange::Rearranger;
pub use replace::Replacer;
