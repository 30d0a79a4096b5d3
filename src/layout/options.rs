//! Layout options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::geometry::Tolerance;

/// Options for layout reconstruction.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Inaccuracy used by the geometric predicates
    pub tolerance: Tolerance,

    /// Narrowest gap that can count as a divider
    pub min_divider_width: f32,

    /// Widest gap between glyphs of the same word
    pub min_word_gap: f32,

    /// Largest line gap inside a block, in multiples of the line height
    pub block_gap_factor: f32,

    /// Share of a gap that must overlap a divider for the two to merge
    pub overlap_ratio: f32,

    /// Slack around the baseline when matching underline strokes
    pub baseline_tolerance: f32,

    /// Whether to process pages in parallel
    pub parallel: bool,

    /// Page selection (which pages to process)
    pub pages: PageSelection,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the predicate tolerance.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum divider width.
    pub fn with_min_divider_width(mut self, width: f32) -> Self {
        self.min_divider_width = width;
        self
    }

    /// Set the word gap threshold.
    pub fn with_min_word_gap(mut self, gap: f32) -> Self {
        self.min_word_gap = gap;
        self
    }

    /// Set the block gap factor.
    pub fn with_block_gap_factor(mut self, factor: f32) -> Self {
        self.block_gap_factor = factor;
        self
    }

    /// Set the divider overlap ratio.
    pub fn with_overlap_ratio(mut self, ratio: f32) -> Self {
        self.overlap_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            min_divider_width: 12.0,
            min_word_gap: 1.5,
            block_gap_factor: 2.0,
            overlap_ratio: 0.75,
            baseline_tolerance: 2.0,
            parallel: true,
            pages: PageSelection::All,
        }
    }
}

/// Page selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = (parse_page(start)?, parse_page(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                for p in parse_page(start)?..=parse_page(end)? {
                    pages.push(p);
                }
            } else {
                pages.push(parse_page(part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidPageRange(format!("invalid page number '{}'", s.trim())))
}
