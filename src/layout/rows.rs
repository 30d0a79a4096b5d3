//! Page rows: every line of the page merged by visual line.

use crate::geometry::{Bounded, Rectangle};

use super::block::Block;
use super::line::PageLine;

/// Page lines indexed by vertical position.
///
/// Lines from different blocks that sit on the same visual line are merged
/// into one row. Rows stay sorted by top edge, and a row's index is the line
/// number dividers and skeletons refer to.
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    rows: Vec<PageLine>,
    eps_y: f32,
}

impl RowIndex {
    /// Create an empty index.
    pub fn new(eps_y: f32) -> Self {
        Self {
            rows: Vec::new(),
            eps_y,
        }
    }

    /// Build the index from blocks and number the rows.
    pub fn from_blocks(blocks: &[Block], eps_y: f32) -> Self {
        let mut index = Self::new(eps_y);
        for line in blocks.iter().flat_map(|b| b.lines()) {
            index.insert(line.clone());
        }
        index.renumber();
        index
    }

    /// Merge a line into the row it shares, or open a new row.
    pub fn insert(&mut self, line: PageLine) {
        let rect = line.rect();
        if let Some(row) = self.find_row_mut(&rect) {
            row.absorb(line);
            return;
        }
        let at = self.rows.partition_point(|r| r.rect().min_y() <= rect.min_y());
        self.rows.insert(at, line);
    }

    fn find_row_mut(&mut self, rect: &Rectangle) -> Option<&mut PageLine> {
        let lo = self
            .rows
            .partition_point(|r| r.rect().min_y() < rect.min_y() - self.eps_y);
        let hi = self
            .rows
            .partition_point(|r| r.rect().min_y() <= rect.min_y() + self.eps_y);
        let eps_y = self.eps_y;
        self.rows[lo..hi]
            .iter_mut()
            .find(|r| r.rect().on_same_line(rect, eps_y))
    }

    /// Rows whose index lies in `first..=last`.
    pub fn range(&self, first: usize, last: usize) -> &[PageLine] {
        let end = (last + 1).min(self.rows.len());
        &self.rows[first.min(end)..end]
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[PageLine] {
        &self.rows
    }

    /// Mutable access to a row.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut PageLine> {
        self.rows.get_mut(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bounding box of every row.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::combine(self.rows.iter().map(Bounded::rect))
    }

    /// Drop empty rows and number the remaining ones from zero.
    pub fn compact(&mut self) {
        self.rows.retain(|r| !r.is_empty());
        self.renumber();
    }

    fn renumber(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.set_line_number(i);
        }
    }

    /// Consume the index, yielding the rows.
    pub fn into_rows(self) -> Vec<PageLine> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::object::{DocumentObject, TextObject};
    use crate::model::TextStyle;

    fn line(text: &str, x: f32, y: f32) -> PageLine {
        PageLine::with_object(DocumentObject::Text(TextObject::new(
            text,
            Rectangle::new(x, y, 40.0, 10.0).unwrap(),
            TextStyle::default(),
        )))
    }

    #[test]
    fn test_same_visual_line_merges() {
        let mut left = Block::from_line(line("a", 0.0, 0.0));
        left.push_line(line("b", 0.0, 14.0));
        let mut right = Block::from_line(line("c", 100.0, 0.5));
        right.push_line(line("d", 100.0, 14.0));

        let index = RowIndex::from_blocks(&[right, left], 2.5);
        assert_eq!(index.len(), 2);
        assert_eq!(index.rows()[0].text(), "ac");
        assert_eq!(index.rows()[1].text(), "bd");
        assert_eq!(index.rows()[1].line_number(), Some(1));
    }

    #[test]
    fn test_rows_sorted_by_top_edge() {
        let mut index = RowIndex::new(2.5);
        index.insert(line("low", 0.0, 50.0));
        index.insert(line("high", 0.0, 10.0));
        index.insert(line("mid", 0.0, 30.0));
        let texts: Vec<_> = index.rows().iter().map(|r| r.text().to_string()).collect();
        assert_eq!(texts, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_compact_renumbers() {
        let mut index = RowIndex::new(2.5);
        index.insert(line("a", 0.0, 0.0));
        index.insert(line("b", 0.0, 20.0));
        index.insert(line("c", 0.0, 40.0));
        index.row_mut(1).unwrap().take_where(|_| true);
        index.compact();

        assert_eq!(index.len(), 2);
        assert_eq!(index.rows()[1].text(), "c");
        assert_eq!(index.rows()[1].line_number(), Some(1));
    }

    #[test]
    fn test_range_clamps() {
        let mut index = RowIndex::new(2.5);
        index.insert(line("a", 0.0, 0.0));
        index.insert(line("b", 0.0, 20.0));
        assert_eq!(index.range(0, 5).len(), 2);
        assert_eq!(index.range(1, 1).len(), 1);
        assert!(index.range(4, 6).is_empty());
    }
}
