//! Layout analysis: from glyphs to resolved page rows.
//!
//! The stages run strictly in order for one page:
//!
//! 1. [`LineAssembler`] turns written strings into [`PageLine`]s
//! 2. [`BlockAssembler`] groups lines into [`Block`]s and records line gaps
//! 3. [`RowIndex`] merges every block's lines into numbered page rows
//! 4. [`DividerDetector`] finds whitespace [`Divider`]s across rows
//! 5. [`SkeletonResolver`] turns dividers into nested [`Skeleton`]s
//!
//! The result is a [`PageAnalysis`] that [`crate::reconstruct`] turns into
//! structural objects.

mod block;
mod divider;
mod line;
mod object;
mod options;
mod rows;
mod skeleton;
mod statistics;
mod style;

pub use block::{Block, BlockAssembler};
pub use divider::{Divider, DividerDetector};
pub use line::{LineAssembler, PageLine};
pub use object::{DocumentObject, LinkObject, TextObject};
pub use options::{LayoutOptions, PageSelection};
pub use rows::RowIndex;
pub use skeleton::{Skeleton, SkeletonKind, SkeletonResolver};
pub use statistics::LayoutStatistics;
pub use style::{is_bold_font, is_italic_font, StyleResolver};

use crate::error::Result;
use crate::geometry::Rectangle;
use crate::model::PageInput;

/// Everything layout analysis learned about one page.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Content box used for page-border decisions
    pub content_box: Rectangle,
    /// Blocks as first assembled, before any skeleton was extracted
    pub blocks: Vec<Block>,
    /// Dividers spanning more than one row
    pub dividers: Vec<Divider>,
    /// Rows after skeleton resolution, each skeleton on its first row
    pub rows: Vec<PageLine>,
    /// Line gap statistics of this page
    pub statistics: LayoutStatistics,
}

impl PageAnalysis {
    /// Top-level skeletons in row order.
    pub fn skeletons(&self) -> Vec<&Skeleton> {
        self.rows
            .iter()
            .flat_map(|row| row.objects())
            .filter_map(DocumentObject::as_skeleton)
            .collect()
    }
}

/// Run layout analysis over one page.
pub fn analyze_page(input: &PageInput, options: &LayoutOptions) -> Result<PageAnalysis> {
    let mut statistics = LayoutStatistics::new();

    let lines = LineAssembler::assemble(input, options)?;
    let blocks = BlockAssembler::new(options).assemble(lines, &mut statistics);

    let mut rows = RowIndex::from_blocks(&blocks, options.tolerance.y);
    let content_box = input.content_box.unwrap_or_else(|| rows.bounds());

    let dividers = DividerDetector::new(options, content_box).detect(&rows, &input.strokes);
    let skeletons = SkeletonResolver::new(options).resolve(dividers.clone(), &mut rows)?;

    log::debug!(
        "Page {}: {} blocks, {} rows, {} dividers, {} skeletons",
        input.number,
        blocks.len(),
        rows.len(),
        dividers.len(),
        skeletons
    );

    Ok(PageAnalysis {
        number: input.number,
        width: input.width,
        height: input.height,
        content_box,
        blocks,
        dividers,
        rows: rows.into_rows(),
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WrittenString;

    #[test]
    fn test_empty_page() {
        let input = PageInput::new(1, 612.0, 792.0);
        let analysis = analyze_page(&input, &LayoutOptions::default()).unwrap();
        assert!(analysis.blocks.is_empty());
        assert!(analysis.rows.is_empty());
        assert_eq!(analysis.content_box, Rectangle::EMPTY);
    }

    #[test]
    fn test_single_paragraph_has_no_dividers() {
        let mut input = PageInput::new(1, 612.0, 792.0);
        for i in 0..3 {
            input.push_string(WrittenString::monospaced(
                "same width line",
                72.0,
                100.0 + i as f32 * 14.0,
                6.0,
                10.0,
            ));
        }
        let analysis = analyze_page(&input, &LayoutOptions::default()).unwrap();
        assert_eq!(analysis.blocks.len(), 1);
        assert!(analysis.dividers.is_empty());
        assert_eq!(analysis.rows.len(), 3);
        assert!(analysis.skeletons().is_empty());
    }
}
