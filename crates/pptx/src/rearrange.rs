//! Slide selection, reordering and duplication.

use crate::package::{rel_kind, relative_target, Relationship, REL_TYPE_BASE, SLIDE_CONTENT_TYPE};
use crate::parser::extract_slide_number;
use crate::presentation::{Deck, SlideRef};
use deck_core::{check_indices, parse_indices, Result};
use std::collections::HashSet;
use std::path::Path;

/// Smallest id PowerPoint accepts for `p:sldId`.
const MIN_SLIDE_ID: u32 = 256;

/// Builds a new slide sequence from zero-based indices into the current one.
#[derive(Debug, Clone, Default)]
pub struct Rearranger;

impl Rearranger {
    pub fn new() -> Self {
        Self
    }

    /// Keep exactly the slides at `indices`, in that order.
    ///
    /// The first occurrence of a slide keeps its part. Every repeat gets its
    /// own part and relationships, sharing everything except notes. Parts no
    /// longer reachable afterwards are removed.
    pub fn apply(&self, deck: &mut Deck, indices: &[usize]) -> Result<()> {
        check_indices(indices, deck.slide_count())?;

        let reachable_before = deck.package().reachable_parts()?;
        let source = deck.slides().to_vec();
        let mut part_names: HashSet<String> = deck.package().part_names().map(str::to_string).collect();
        let mut next_number = part_names
            .iter()
            .filter(|name| name.contains("/slides/") && name.ends_with(".xml"))
            .filter_map(|name| extract_slide_number(name))
            .max()
            .unwrap_or(0)
            + 1;
        let mut next_id = deck.max_slide_id().max(MIN_SLIDE_ID - 1) + 1;

        let mut content_types = deck.package().content_types()?;
        let mut used = vec![false; source.len()];
        let mut slides = Vec::with_capacity(indices.len());
        let mut duplicates = Vec::new();

        for &index in indices {
            let original = &source[index];
            if !used[index] {
                used[index] = true;
                slides.push(original.clone());
                continue;
            }

            let dir = original.part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("ppt/slides");
            let part = loop {
                let candidate = format!("{}/slide{}.xml", dir, next_number);
                next_number += 1;
                if !part_names.contains(&candidate) {
                    break candidate;
                }
            };
            part_names.insert(part.clone());

            let data = deck.package().require_part(&original.part)?.to_vec();
            let mut rels = deck.package().relationships(&original.part)?;
            rels.retain(|r| r.kind() != rel_kind::NOTES_SLIDE);
            let content_type = content_types
                .content_type(&original.part)
                .unwrap_or(SLIDE_CONTENT_TYPE)
                .to_string();

            let package = deck.package_mut();
            package.set_part(part.as_str(), data);
            package.set_relationships(&part, &rels)?;
            content_types.set_override(&part, &content_type);

            let rel_type = deck
                .relationships()
                .get(&original.rel_id)
                .map(|r| r.rel_type.clone())
                .unwrap_or_else(|| format!("{}{}", REL_TYPE_BASE, rel_kind::SLIDE));
            let rel_id = deck.relationships().next_id();
            let target = relative_target(deck.main_part(), &part);
            deck.relationships_mut().push(Relationship {
                id: rel_id.clone(),
                rel_type,
                target,
                external: false,
            });

            log::debug!("Duplicated {} as {}", original.part, part);
            duplicates.push((original.id, next_id));
            slides.push(SlideRef {
                id: next_id,
                rel_id,
                part,
            });
            next_id += 1;
        }

        for (slide, _) in source.iter().zip(&used).filter(|(_, used)| !**used) {
            log::debug!("Removing {}", slide.part);
            deck.relationships_mut().remove(&slide.rel_id);
        }

        deck.package_mut().set_content_types(&content_types)?;
        deck.set_slide_list(slides);
        for (source_id, new_id) in duplicates.into_iter().rev() {
            deck.add_to_section_of(source_id, new_id);
        }
        deck.flush()?;

        let dropped = deck.package_mut().drop_unreachable(&reachable_before)?;
        log::debug!(
            "Rearranged into {} slides, dropped {} parts",
            deck.slide_count(),
            dropped.len()
        );
        Ok(())
    }

    /// Parse `indices`, rearrange `input` and write the result to `output`.
    /// Returns the number of slides written.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q, indices: &str) -> Result<usize> {
        let indices = parse_indices(indices)?;
        let mut deck = Deck::open(input)?;
        self.apply(&mut deck, &indices)?;
        deck.save(output)?;
        Ok(indices.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{DeckBuilder, ShapeSpec, SlideSpec};
    use crate::inventory::InventoryExtractor;
    use deck_core::{Error, ShapeKey};

    fn numbered_deck(n: usize) -> Deck {
        let package = DeckBuilder::new()
            .add_slides((0..n).map(|i| SlideSpec::title_and_body(&format!("Slide {}", i), "body")))
            .build()
            .unwrap();
        Deck::from_package(package).unwrap()
    }

    fn titles(deck: &Deck) -> Vec<String> {
        let inventory = InventoryExtractor::new().extract(deck).unwrap();
        inventory
            .iter()
            .map(|(key, _)| inventory.shape(key, ShapeKey(0)).unwrap().text())
            .collect()
    }

    #[test]
    fn test_reverse_order() {
        let mut deck = numbered_deck(5);
        Rearranger::new().apply(&mut deck, &[4, 3, 2, 1, 0]).unwrap();
        assert_eq!(titles(&deck), vec!["Slide 4", "Slide 3", "Slide 2", "Slide 1", "Slide 0"]);
    }

    #[test]
    fn test_subset_drops_unselected_parts() {
        let mut deck = numbered_deck(3);
        Rearranger::new().apply(&mut deck, &[2]).unwrap();

        let reopened = Deck::from_package(deck.package().clone()).unwrap();
        assert_eq!(titles(&reopened), vec!["Slide 2"]);
        assert!(!reopened.package().contains("ppt/slides/slide1.xml"));
        assert!(!reopened.package().contains("ppt/slides/_rels/slide1.xml.rels"));
        assert!(reopened.package().contains("ppt/slides/slide3.xml"));
        assert!(reopened.package().contains("ppt/slideLayouts/slideLayout1.xml"));

        let content_types = reopened.package().content_types().unwrap();
        assert_eq!(
            content_types.content_type("ppt/slides/slide1.xml"),
            Some("application/xml")
        );
    }

    #[test]
    fn test_duplicates_are_independent_parts() {
        let mut deck = numbered_deck(1);
        Rearranger::new().apply(&mut deck, &[0, 0, 0]).unwrap();

        let reopened = Deck::from_package(deck.package().clone()).unwrap();
        assert_eq!(reopened.slide_count(), 3);
        let parts: HashSet<&str> = reopened.slides().iter().map(|s| s.part.as_str()).collect();
        assert_eq!(parts.len(), 3);
        let ids: HashSet<u32> = reopened.slides().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(titles(&reopened), vec!["Slide 0"; 3]);
    }

    #[test]
    fn test_duplicates_share_media_but_not_notes() {
        let package = DeckBuilder::new()
            .add_slide(SlideSpec::new().with_shape(ShapeSpec::picture(1.0, 1.0, 1.0, 1.0)))
            .build()
            .unwrap();
        let mut deck = Deck::from_package(package).unwrap();

        let slide_part = deck.slides()[0].part.clone();
        let mut rels = deck.package().relationships(&slide_part).unwrap();
        rels.push(Relationship {
            id: rels.next_id(),
            rel_type: format!("{}{}", REL_TYPE_BASE, rel_kind::NOTES_SLIDE),
            target: "../notesSlides/notesSlide1.xml".to_string(),
            external: false,
        });
        let package = deck.package_mut();
        package.set_relationships(&slide_part, &rels).unwrap();
        package.set_part("ppt/notesSlides/notesSlide1.xml", b"<p:notes xmlns:p=\"urn:p\"/>".to_vec());

        Rearranger::new().apply(&mut deck, &[0, 0]).unwrap();

        let copy = deck.slides()[1].part.clone();
        let copy_rels = deck.package().relationships(&copy).unwrap();
        assert!(copy_rels.first_of_kind(rel_kind::NOTES_SLIDE).is_none());
        assert_eq!(copy_rels.first_of_kind("image").unwrap().target, "../media/image1.png");

        let original_rels = deck.package().relationships(&slide_part).unwrap();
        assert!(original_rels.first_of_kind(rel_kind::NOTES_SLIDE).is_some());
        assert!(deck.package().contains("ppt/notesSlides/notesSlide1.xml"));
    }

    #[test]
    fn test_many_duplicates() {
        let mut deck = numbered_deck(100);
        let mut indices: Vec<usize> = (0..100).collect();
        indices.extend(std::iter::repeat(7).take(50));
        Rearranger::new().apply(&mut deck, &indices).unwrap();
        assert_eq!(deck.slide_count(), 150);
        assert_eq!(titles(&deck)[149], "Slide 7");
    }

    #[test]
    fn test_out_of_range_and_empty() {
        let mut deck = numbered_deck(3);
        assert!(matches!(
            Rearranger::new().apply(&mut deck, &[0, 1, 99]),
            Err(Error::IndexOutOfRange { index: 99, count: 3 })
        ));
        assert!(matches!(
            Rearranger::new().apply(&mut deck, &[]),
            Err(Error::EmptyIndexList)
        ));
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(titles(&deck)[2], "Slide 2");
    }
}
