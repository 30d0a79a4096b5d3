//! Blocks: vertically contiguous, left-aligned runs of lines.

use crate::geometry::{Bounded, Rectangle};

use super::line::PageLine;
use super::options::LayoutOptions;
use super::statistics::LayoutStatistics;

/// A candidate paragraph, table region or standalone graphic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    lines: Vec<PageLine>,
    border_rect: Rectangle,
    content_rect: Rectangle,
}

impl Block {
    /// Create an empty block with a provisional border.
    pub fn new(border_rect: Rectangle) -> Self {
        Self {
            lines: Vec::new(),
            border_rect,
            content_rect: Rectangle::EMPTY,
        }
    }

    /// Create a block from one line; the border is the line's extent.
    pub fn from_line(line: PageLine) -> Self {
        let mut block = Self::new(line.rect());
        block.push_line(line);
        block
    }

    /// Add a line, keeping lines sorted by vertical position.
    pub fn push_line(&mut self, line: PageLine) {
        let y = line.rect().min_y();
        let at = self.lines.partition_point(|l| l.rect().min_y() <= y);
        self.lines.insert(at, line);
        self.content_rect = Rectangle::combine(self.lines.iter().map(Bounded::rect));
    }

    /// Lines from top to bottom.
    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    /// Consume the block, yielding its lines.
    pub fn into_lines(self) -> Vec<PageLine> {
        self.lines
    }

    /// The area the block was allowed to claim.
    pub fn border_rect(&self) -> Rectangle {
        self.border_rect
    }

    /// Tight bounding box of the lines; `EMPTY` without lines.
    pub fn content_rect(&self) -> Rectangle {
        self.content_rect
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain text of the lines, one per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn last_line(&self) -> Option<&PageLine> {
        self.lines.last()
    }
}

impl Bounded for Block {
    fn rect(&self) -> Rectangle {
        self.content_rect
    }
}

/// Groups consecutive lines into blocks.
///
/// A line continues the current block when its left edge is within εx of
/// the last line's and the vertical gap does not exceed the gap factor
/// times its own height. Lines holding a graphic or skeleton stand alone.
pub struct BlockAssembler<'a> {
    options: &'a LayoutOptions,
}

impl<'a> BlockAssembler<'a> {
    /// Create an assembler.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self { options }
    }

    /// Group `lines` (in their given order) and record accepted gaps.
    pub fn assemble(&self, lines: Vec<PageLine>, stats: &mut LayoutStatistics) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();
        let mut current: Option<Block> = None;

        for line in lines {
            if let Some(block) = current.as_mut() {
                if let Some(gap) = self.continuation_gap(block, &line) {
                    stats.record_line_gap(gap);
                    block.push_line(line);
                    continue;
                }
            }
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(Block::from_line(line));
        }
        blocks.extend(current);

        log::trace!("Grouped lines into {} blocks", blocks.len());
        blocks
    }

    /// The gap to the block's last line when `line` continues the block.
    fn continuation_gap(&self, block: &Block, line: &PageLine) -> Option<f32> {
        let last = block.last_line()?;
        if last.is_standalone() || line.is_standalone() {
            return None;
        }
        let (prev, next) = (last.rect(), line.rect());
        if (next.min_x() - prev.min_x()).abs() > self.options.tolerance.x {
            return None;
        }
        let gap = next.min_y() - prev.max_y();
        if gap < -self.options.tolerance.y || gap > self.options.block_gap_factor * next.height() {
            return None;
        }
        Some(gap)
    }
}
