//! Text replacement driven by a replacement document.

use crate::parser::{nth_shape_mut, shape_tree_mut, ShapeKind};
use crate::presentation::Deck;
use crate::text;
use crate::xml::{Element, Node};
use deck_core::{Error, ParagraphRecord, ReplacementDocument, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Rewrites the paragraphs of the shapes a replacement document addresses.
#[derive(Debug, Clone, Default)]
pub struct Replacer;

impl Replacer {
    pub fn new() -> Self {
        Self
    }

    /// Apply `replacements` to `deck` and return the number of shapes rewritten.
    ///
    /// The paragraphs are validated and every slide and shape reference is
    /// resolved before the deck is touched; on error the deck is unchanged.
    pub fn apply(&self, deck: &mut Deck, replacements: &ReplacementDocument) -> Result<usize> {
        replacements.validate()?;
        let mut edited = Vec::new();
        let mut count = 0;

        for (slide_key, shapes) in replacements.iter() {
            let index = slide_key.index();
            if index >= deck.slide_count() {
                return Err(Error::SlideNotFound(slide_key.to_string()));
            }

            let mut doc = deck.slide_document(index)?;
            let tree = shape_tree_mut(&mut doc)?;
            for (shape_key, replacement) in shapes {
                let shape = nth_shape_mut(tree, shape_key.index()).ok_or_else(|| Error::ShapeNotFound {
                    slide: slide_key.to_string(),
                    shape: shape_key.to_string(),
                })?;
                let holds_text = ShapeKind::from_local_name(shape.local_name())
                    .is_some_and(ShapeKind::can_hold_text);
                if !holds_text {
                    return Err(Error::NoTextFrame {
                        slide: slide_key.to_string(),
                        shape: shape_key.to_string(),
                    });
                }

                replace_shape_text(shape, &replacement.paragraphs);
                log::debug!(
                    "{} {}: {} paragraphs",
                    slide_key,
                    shape_key,
                    replacement.paragraphs.len()
                );
                count += 1;
            }
            edited.push((index, doc));
        }

        for (index, doc) in &edited {
            deck.set_slide_document(*index, doc)?;
        }
        Ok(count)
    }

    /// Read `input` and the replacement JSON, write the result to `output`.
    pub fn run<P, Q, R>(&self, input: P, replacements: Q, output: R) -> Result<usize>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        let file = File::open(replacements.as_ref())?;
        let document = ReplacementDocument::from_reader(BufReader::new(file))?;

        let mut deck = Deck::open(input)?;
        let count = self.apply(&mut deck, &document)?;
        deck.save(output)?;
        Ok(count)
    }
}

/// Replace the text body of an `sp` element, creating one if needed.
fn replace_shape_text(shape: &mut Element, paragraphs: &[ParagraphRecord]) {
    if shape.child("txBody").is_none() {
        let body = text::new_text_body(shape.prefix(), text::drawing_prefix(shape));
        let at = shape.position_of(&["extLst"]).unwrap_or(shape.children.len());
        shape.children.insert(at, Node::Element(body));
    }
    if let Some(body) = shape.child_mut("txBody") {
        text::write_text_body(body, paragraphs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{DeckBuilder, ShapeSpec, SlideSpec};
    use crate::inventory::InventoryExtractor;
    use deck_core::{Alignment, ShapeKey, SlideKey};

    fn deck() -> Deck {
        let package = DeckBuilder::new()
            .add_slide(
                SlideSpec::title_and_body("Title", "Body")
                    .with_shape(ShapeSpec::picture(1.0, 1.0, 1.0, 1.0))
                    .with_shape(ShapeSpec::rectangle(3.0, 1.0, 1.0, 1.0)),
            )
            .build()
            .unwrap();
        Deck::from_package(package).unwrap()
    }

    fn doc(json: &str) -> ReplacementDocument {
        ReplacementDocument::from_json_str(json).unwrap()
    }

    #[test]
    fn test_replaces_addressed_shape_only() {
        let mut deck = deck();
        let count = Replacer::new()
            .apply(
                &mut deck,
                &doc(r#"{"slide-0": {"shape-1": {"paragraphs": [
                    {"text": "First", "bold": true, "alignment": "CENTER"},
                    {"text": "Second", "bullet": true, "level": 1}
                ]}}}"#),
            )
            .unwrap();
        assert_eq!(count, 1);

        let inventory = InventoryExtractor::new().extract(&deck).unwrap();
        assert_eq!(inventory.shape(SlideKey(0), ShapeKey(0)).unwrap().text(), "Title");

        let body = inventory.shape(SlideKey(0), ShapeKey(1)).unwrap();
        assert_eq!(body.paragraphs.len(), 2);
        assert_eq!(body.paragraphs[0].bold, Some(true));
        assert_eq!(body.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(body.paragraphs[1].bullet, Some(true));
        assert_eq!(body.paragraphs[1].level, Some(1));
    }

    #[test]
    fn test_shape_without_text_body_gets_one() {
        let mut deck = deck();
        Replacer::new()
            .apply(
                &mut deck,
                &doc(r#"{"slide-0": {"shape-3": {"paragraphs": [{"text": "Now with text"}]}}}"#),
            )
            .unwrap();
        let inventory = InventoryExtractor::new().extract(&deck).unwrap();
        assert_eq!(inventory.shape(SlideKey(0), ShapeKey(3)).unwrap().text(), "Now with text");
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let mut deck = deck();
        let err = Replacer::new()
            .apply(
                &mut deck,
                &doc(r#"{"slide-0": {"shape-999": {"paragraphs": [{"text": "x"}]}}}"#),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ShapeNotFound { .. }));
        let message = err.to_string();
        assert!(message.contains("shape-999"));
        assert!(message.to_lowercase().contains("not found"));
    }

    #[test]
    fn test_unknown_slide_is_rejected() {
        let mut deck = deck();
        let err = Replacer::new()
            .apply(&mut deck, &doc(r#"{"slide-5": {"shape-0": {"paragraphs": []}}}"#))
            .unwrap_err();
        assert!(err.to_string().contains("slide-5"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_picture_cannot_hold_text() {
        let mut deck = deck();
        let err = Replacer::new()
            .apply(
                &mut deck,
                &doc(r#"{"slide-0": {"shape-2": {"paragraphs": [{"text": "x"}]}}}"#),
            )
            .unwrap_err();
        assert!(matches!(err, Error::NoTextFrame { .. }));
    }

    #[test]
    fn test_failed_apply_leaves_deck_untouched() {
        let mut deck = deck();
        let result = Replacer::new().apply(
            &mut deck,
            &doc(r#"{"slide-0": {"shape-0": {"paragraphs": [{"text": "changed"}]}, "shape-42": {"paragraphs": []}}}"#),
        );
        assert!(result.is_err());

        let inventory = InventoryExtractor::new().extract(&deck).unwrap();
        assert_eq!(inventory.shape(SlideKey(0), ShapeKey(0)).unwrap().text(), "Title");
    }

    #[test]
    fn test_empty_paragraph_list_leaves_empty_text() {
        let mut deck = deck();
        Replacer::new()
            .apply(&mut deck, &doc(r#"{"slide-0": {"shape-0": {"paragraphs": []}}}"#))
            .unwrap();
        let inventory = InventoryExtractor::new().extract(&deck).unwrap();
        let title = inventory.shape(SlideKey(0), ShapeKey(0)).unwrap();
        assert_eq!(title.paragraphs.len(), 1);
        assert_eq!(title.text(), "");
    }
}
