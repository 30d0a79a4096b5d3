//! Whitespace dividers between content.

use crate::geometry::{Bounded, Rectangle};

use super::line::PageLine;
use super::options::LayoutOptions;
use super::rows::RowIndex;

/// A rectangle of empty space spanning a contiguous range of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    /// The empty space itself
    pub rect: Rectangle,
    /// First row covered
    pub first_line: usize,
    /// Last row covered (inclusive)
    pub last_line: usize,
    /// The area this divider can split
    pub border_rect: Rectangle,
    /// Touches a content edge of the page
    pub page_border: bool,
    /// Confirmed by a drawn stroke
    pub visible: bool,
}

impl Divider {
    /// Start a divider from a gap on one row.
    pub fn new(rect: Rectangle, line: usize) -> Self {
        Self {
            rect,
            first_line: line,
            last_line: line,
            border_rect: rect,
            page_border: false,
            visible: false,
        }
    }

    /// Number of rows covered.
    pub fn line_span(&self) -> usize {
        self.last_line - self.first_line + 1
    }

    /// Whether this divider's rows include all of `other`'s rows.
    pub fn covers_range(&self, other: &Divider) -> bool {
        self.first_line <= other.first_line && other.last_line <= self.last_line
    }

    /// Whether a gap on `line` continues this divider.
    ///
    /// The divider must end on the previous row and the horizontal overlap
    /// must reach `ratio` of either width.
    pub fn accepts(&self, candidate: &Rectangle, line: usize, ratio: f32) -> bool {
        if self.last_line + 1 != line {
            return false;
        }
        let overlap = self.rect.intersect_horizontally(candidate);
        overlap > 0.0 && (overlap >= ratio * self.rect.width() || overlap >= ratio * candidate.width())
    }

    /// Fold a gap on `line` into the divider.
    ///
    /// The divider narrows to the common horizontal range and grows down to
    /// cover the gap. Merging the same gap again changes nothing.
    pub fn merge(&mut self, candidate: &Rectangle, line: usize) {
        let min_x = self.rect.min_x().max(candidate.min_x());
        let max_x = self.rect.max_x().min(candidate.max_x());
        let min_y = self.rect.min_y().min(candidate.min_y());
        let max_y = self.rect.max_y().max(candidate.max_y());
        if max_x >= min_x {
            self.rect = Rectangle::spanning(min_x, min_y, max_x, max_y);
        } else {
            self.rect = self.rect.with_vertical_span(min_y, max_y);
        }
        self.last_line = self.last_line.max(line);
    }
}

impl Bounded for Divider {
    fn rect(&self) -> Rectangle {
        self.rect
    }
}

/// Finds, merges and qualifies dividers over the page rows.
pub struct DividerDetector<'a> {
    options: &'a LayoutOptions,
    content_box: Rectangle,
}

impl<'a> DividerDetector<'a> {
    /// Create a detector for a page with the given content box.
    pub fn new(options: &'a LayoutOptions, content_box: Rectangle) -> Self {
        Self {
            options,
            content_box,
        }
    }

    /// Detect the dividers of a page.
    pub fn detect(&self, rows: &RowIndex, strokes: &[Rectangle]) -> Vec<Divider> {
        let mut dividers: Vec<Divider> = Vec::new();

        for (line, row) in rows.rows().iter().enumerate() {
            for candidate in self.candidates(row) {
                self.merge_candidate(&mut dividers, candidate, line);
            }
        }

        let found = dividers.len();
        dividers.retain(|d| d.line_span() > 1);
        log::trace!(
            "Merged gaps into {} dividers, {} span more than one row",
            found,
            dividers.len()
        );

        let eps_x = self.options.tolerance.x;
        for divider in &mut dividers {
            divider.page_border = divider.rect.min_x() <= self.content_box.min_x() + eps_x
                || divider.rect.max_x() >= self.content_box.max_x() - eps_x;
        }

        let borders: Vec<Rectangle> = dividers
            .iter()
            .map(|d| self.border_rect(d, &dividers, rows))
            .collect();
        for (divider, border) in dividers.iter_mut().zip(borders) {
            divider.border_rect = border;
            divider.visible = strokes.iter().any(|s| {
                divider
                    .rect
                    .contains_with_inaccuracy(s, eps_x, self.options.tolerance.y)
                    && s.height() >= divider.rect.height() / 2.0
            });
        }

        dividers
    }

    /// Merge a gap into the first divider that accepts it, or open one.
    pub fn merge_candidate(&self, dividers: &mut Vec<Divider>, candidate: Rectangle, line: usize) {
        let ratio = self.options.overlap_ratio;
        match dividers
            .iter_mut()
            .find(|d| d.accepts(&candidate, line, ratio))
        {
            Some(divider) => divider.merge(&candidate, line),
            None => dividers.push(Divider::new(candidate, line)),
        }
    }

    /// Gap rectangles on one row: before the first visible object, between
    /// objects, and after the last one up to the content edge.
    fn candidates(&self, row: &PageLine) -> Vec<Rectangle> {
        let eps_x = self.options.tolerance.x;
        let min_width = self.options.min_divider_width;
        let rects: Vec<Rectangle> = row
            .objects()
            .iter()
            .filter(|o| o.is_visible())
            .map(Bounded::rect)
            .collect();
        let Some(first) = rects.first() else {
            return Vec::new();
        };
        let row_rect = row.rect();

        let mut gaps = Vec::new();
        let left_edge = self
            .content_box
            .with_vertical_span(row_rect.min_y(), row_rect.max_y())
            .with_horizontal_span(self.content_box.min_x(), self.content_box.min_x());
        gaps.extend(left_edge.between_gap(first, eps_x, min_width));

        // Objects may overlap; a gap opens only past the furthest right edge.
        let mut reach = *first;
        for next in &rects[1..] {
            if let Some(gap) = reach.between_gap(next, 0.0, min_width) {
                gaps.push(gap);
            }
            if next.max_x() > reach.max_x() {
                reach = *next;
            }
        }

        let right_edge = row_rect
            .with_horizontal_span(self.content_box.max_x(), self.content_box.max_x());
        gaps.extend(reach.between_gap(&right_edge, eps_x, min_width));
        gaps
    }

    /// The area a divider can split: its rows, bounded by the nearest
    /// dividers on either side whose rows include its own.
    fn border_rect(&self, divider: &Divider, all: &[Divider], rows: &RowIndex) -> Rectangle {
        let eps_x = self.options.tolerance.x;
        let mut left = self.content_box.min_x();
        let mut right = self.content_box.max_x();
        for other in all {
            if std::ptr::eq(other, divider) || !other.covers_range(divider) {
                continue;
            }
            if other.rect.max_x() <= divider.rect.min_x() + eps_x {
                left = left.max(other.rect.max_x());
            } else if other.rect.min_x() >= divider.rect.max_x() - eps_x {
                right = right.min(other.rect.min_x());
            }
        }
        let span = Rectangle::combine(
            rows.range(divider.first_line, divider.last_line)
                .iter()
                .map(Bounded::rect),
        );
        let (top, bottom) = if span.is_empty() {
            (divider.rect.min_y(), divider.rect.max_y())
        } else {
            (span.min_y(), span.max_y())
        };
        Rectangle::spanning(left, top, right.max(left), bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::object::{DocumentObject, TextObject};
    use crate::model::TextStyle;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(x, y, w, h).unwrap()
    }

    fn row(cells: &[(f32, f32)], y: f32) -> PageLine {
        let mut line = PageLine::new();
        for (x, w) in cells {
            line.push(DocumentObject::Text(TextObject::new(
                "text",
                rect(*x, y, *w, 10.0),
                TextStyle::default(),
            )));
        }
        line
    }

    fn index(rows: Vec<PageLine>) -> RowIndex {
        let mut index = RowIndex::new(2.5);
        for r in rows {
            index.insert(r);
        }
        index
    }

    #[test]
    fn test_two_columns_one_divider() {
        let rows = index(
            (0..5)
                .map(|i| row(&[(50.0, 100.0), (190.0, 100.0)], i as f32 * 14.0))
                .collect(),
        );
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rows.bounds());
        let dividers = detector.detect(&rows, &[]);

        assert_eq!(dividers.len(), 1);
        let d = &dividers[0];
        assert_eq!((d.first_line, d.last_line), (0, 4));
        assert_eq!(d.rect.min_x(), 150.0);
        assert_eq!(d.rect.max_x(), 190.0);
        assert!(!d.page_border);
        assert!(!d.visible);
        assert_eq!(d.border_rect, Rectangle::spanning(50.0, 0.0, 290.0, 66.0));
    }

    #[test]
    fn test_single_row_gap_discarded() {
        let rows = index(vec![
            row(&[(50.0, 100.0), (190.0, 100.0)], 0.0),
            row(&[(50.0, 240.0)], 14.0),
        ]);
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rows.bounds());
        assert!(detector.detect(&rows, &[]).is_empty());
    }

    #[test]
    fn test_merge_narrows_to_common_range() {
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rect(0.0, 0.0, 500.0, 500.0));
        let mut dividers = Vec::new();
        detector.merge_candidate(&mut dividers, rect(100.0, 0.0, 40.0, 10.0), 0);
        detector.merge_candidate(&mut dividers, rect(105.0, 14.0, 40.0, 10.0), 1);

        assert_eq!(dividers.len(), 1);
        assert_eq!(dividers[0].rect, Rectangle::spanning(105.0, 0.0, 140.0, 24.0));
        assert_eq!(dividers[0].last_line, 1);
    }

    #[test]
    fn test_merge_requires_contiguous_rows() {
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rect(0.0, 0.0, 500.0, 500.0));
        let mut dividers = Vec::new();
        detector.merge_candidate(&mut dividers, rect(100.0, 0.0, 40.0, 10.0), 0);
        detector.merge_candidate(&mut dividers, rect(100.0, 28.0, 40.0, 10.0), 2);
        assert_eq!(dividers.len(), 2);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut divider = Divider::new(rect(100.0, 0.0, 40.0, 10.0), 0);
        let candidate = rect(110.0, 14.0, 40.0, 10.0);
        divider.merge(&candidate, 1);
        let once = divider.clone();
        divider.merge(&candidate, 1);
        assert_eq!(divider, once);
    }

    #[test]
    fn test_low_overlap_not_merged() {
        let divider = Divider::new(rect(100.0, 0.0, 40.0, 10.0), 0);
        assert!(!divider.accepts(&rect(130.0, 14.0, 40.0, 10.0), 1, 0.75));
        assert!(divider.accepts(&rect(90.0, 14.0, 45.0, 10.0), 1, 0.75));
    }

    #[test]
    fn test_margin_divider_is_page_border() {
        let rows = index(vec![
            row(&[(0.0, 300.0)], 0.0),
            row(&[(40.0, 260.0)], 14.0),
            row(&[(40.0, 260.0)], 28.0),
        ]);
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rows.bounds());
        let dividers = detector.detect(&rows, &[]);

        assert_eq!(dividers.len(), 1);
        assert!(dividers[0].page_border);
        assert_eq!((dividers[0].first_line, dividers[0].last_line), (1, 2));
    }

    #[test]
    fn test_visible_divider() {
        let rows = index(
            (0..3)
                .map(|i| row(&[(50.0, 100.0), (190.0, 100.0)], i as f32 * 14.0))
                .collect(),
        );
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rows.bounds());
        let rule = rect(169.5, 0.0, 1.0, 38.0);
        let dividers = detector.detect(&rows, &[rule]);
        assert!(dividers[0].visible);
    }

    #[test]
    fn test_border_bounded_by_neighbours() {
        let rows = index(
            (0..3)
                .map(|i| row(&[(0.0, 50.0), (100.0, 50.0), (200.0, 50.0)], i as f32 * 14.0))
                .collect(),
        );
        let options = LayoutOptions::default();
        let detector = DividerDetector::new(&options, rows.bounds());
        let dividers = detector.detect(&rows, &[]);

        assert_eq!(dividers.len(), 2);
        assert_eq!(dividers[0].border_rect.max_x(), 150.0);
        assert_eq!(dividers[1].border_rect.min_x(), 100.0);
    }
}
