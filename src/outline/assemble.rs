//! Outline assembly and title selection.

use std::cmp::Ordering;

use crate::model::{Candidate, OutlineEntry};

use super::levels::SizeLevelMap;
use super::options::OutlineOptions;

/// Map every candidate with a leveled size to an outline entry, in order.
pub fn assemble_outline(candidates: &[Candidate], levels: &SizeLevelMap) -> Vec<OutlineEntry> {
    candidates
        .iter()
        .filter_map(|candidate| {
            levels.get(candidate.size).map(|level| OutlineEntry {
                level,
                text: candidate.text.clone(),
                page: candidate.page,
            })
        })
        .collect()
}

/// Select the document title with default options.
pub fn select_title(candidates: &[Candidate]) -> String {
    select_title_with(candidates, &OutlineOptions::default())
}

/// Select the document title from the first page.
///
/// The largest candidate wins; among equal sizes the one whose `y` is closest
/// to the reference offset wins, then the earliest.
pub fn select_title_with(candidates: &[Candidate], options: &OutlineOptions) -> String {
    let reference = options.title_reference_y;
    let distance = |c: &Candidate| (c.y - reference).abs();

    candidates
        .iter()
        .filter(|c| c.page == 1)
        .min_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| distance(a).partial_cmp(&distance(b)).unwrap_or(Ordering::Equal))
        })
        .map(|c| c.text.clone())
        .unwrap_or_else(|| options.fallback_title.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSize, HeadingLevel, StyleFlags};

    fn candidate(text: &str, size: f32, page: u32, y: f32) -> Candidate {
        Candidate {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size: FontSize::from_points(size),
            flags: StyleFlags::empty(),
            page,
            y,
        }
    }

    #[test]
    fn test_assemble_skips_unmapped_sizes() {
        let levels: SizeLevelMap = [
            (FontSize::from_points(20.0), HeadingLevel::H1),
            (FontSize::from_points(14.0), HeadingLevel::H2),
        ]
        .into_iter()
        .collect();
        let candidates = vec![
            candidate("Chapter One", 20.0, 1, 50.0),
            candidate("body text here", 10.0, 1, 80.0),
            candidate("Section 1.1", 14.0, 2, 40.0),
            candidate("Chapter One", 20.0, 3, 50.0),
        ];

        let outline = assemble_outline(&candidates, &levels);
        assert_eq!(
            outline,
            vec![
                OutlineEntry {
                    level: HeadingLevel::H1,
                    text: "Chapter One".to_string(),
                    page: 1
                },
                OutlineEntry {
                    level: HeadingLevel::H2,
                    text: "Section 1.1".to_string(),
                    page: 2
                },
                OutlineEntry {
                    level: HeadingLevel::H1,
                    text: "Chapter One".to_string(),
                    page: 3
                },
            ]
        );
    }

    #[test]
    fn test_assemble_with_empty_map() {
        let candidates = vec![candidate("Anything", 20.0, 1, 0.0)];
        assert!(assemble_outline(&candidates, &SizeLevelMap::new()).is_empty());
    }

    #[test]
    fn test_title_prefers_largest_size() {
        let candidates = vec![
            candidate("Subtitle", 18.0, 1, 100.0),
            candidate("Main Title", 26.0, 1, 400.0),
            candidate("Bigger but page two", 40.0, 2, 100.0),
        ];
        assert_eq!(select_title(&candidates), "Main Title");
    }

    #[test]
    fn test_title_tie_break_on_distance_from_reference() {
        let candidates = vec![
            candidate("Table header", 24.0, 1, 10.0),
            candidate("Introduction", 24.0, 1, 40.0),
            candidate("Footer banner", 24.0, 1, 700.0),
        ];
        assert_eq!(select_title(&candidates), "Introduction");

        // Below the reference offset counts the same as above it.
        let candidates = vec![
            candidate("Above", 24.0, 1, 70.0),
            candidate("Below", 24.0, 1, 120.0),
        ];
        assert_eq!(select_title(&candidates), "Below");
    }

    #[test]
    fn test_title_full_tie_keeps_first() {
        let candidates = vec![
            candidate("First", 24.0, 1, 90.0),
            candidate("Second", 24.0, 1, 110.0),
        ];
        assert_eq!(select_title(&candidates), "First");
    }

    #[test]
    fn test_title_fallback() {
        assert_eq!(select_title(&[]), "Untitled Document");
        let candidates = vec![candidate("Only on page two", 30.0, 2, 100.0)];
        assert_eq!(select_title(&candidates), "Untitled Document");

        let options = OutlineOptions::new().with_fallback_title("(none)");
        assert_eq!(select_title_with(&candidates, &options), "(none)");
    }

    #[test]
    fn test_title_custom_reference() {
        let candidates = vec![
            candidate("Near top", 24.0, 1, 10.0),
            candidate("Near hundred", 24.0, 1, 100.0),
        ];
        let options = OutlineOptions::new().with_title_reference_y(0.0);
        assert_eq!(select_title_with(&candidates, &options), "Near top");
    }
}
