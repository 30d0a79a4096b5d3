//! Axis-aligned rectangle and its tolerance-aware predicates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An immutable axis-aligned rectangle in top-down page coordinates.
///
/// `min_y` is the top edge and grows downward. Every combinator returns a
/// new value; nothing mutates in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleRepr", into = "RectangleRepr")]
pub struct Rectangle {
    min_x: f32,
    min_y: f32,
    width: f32,
    height: f32,
}

/// Wire form of a rectangle, validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RectangleRepr {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl TryFrom<RectangleRepr> for Rectangle {
    type Error = Error;

    fn try_from(repr: RectangleRepr) -> Result<Self> {
        Rectangle::new(repr.x, repr.y, repr.width, repr.height)
    }
}

impl From<Rectangle> for RectangleRepr {
    fn from(rect: Rectangle) -> Self {
        Self {
            x: rect.min_x,
            y: rect.min_y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl Rectangle {
    /// The all-zero rectangle. Distinct from "no rectangle" (`None`).
    pub const EMPTY: Rectangle = Rectangle {
        min_x: 0.0,
        min_y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rectangle from its top-left corner and extents.
    ///
    /// Fails when an extent is negative or any value is not finite.
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Result<Self> {
        if ![min_x, min_y, width, height].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "non-finite rectangle ({}, {}, {}, {})",
                min_x, min_y, width, height
            )));
        }
        if width < 0.0 || height < 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "negative extent {}x{} at ({}, {})",
                width, height, min_x, min_y
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Create the rectangle spanned by two corners, in any order.
    pub fn spanning(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let min_x = x1.min(x2);
        let min_y = y1.min(y2);
        Self {
            min_x,
            min_y,
            width: x1.max(x2) - min_x,
            height: y1.max(y2) - min_y,
        }
    }

    /// Left edge.
    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    /// Top edge.
    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    /// Right edge.
    pub fn max_x(&self) -> f32 {
        self.min_x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f32 {
        self.min_y + self.height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal centre.
    pub fn center_x(&self) -> f32 {
        self.min_x + self.width / 2.0
    }

    /// Whether this is the `EMPTY` sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Same vertical span, new horizontal span.
    pub fn with_horizontal_span(&self, min_x: f32, max_x: f32) -> Self {
        Self::spanning(min_x, self.min_y, max_x, self.max_y())
    }

    /// Same horizontal span, new vertical span.
    pub fn with_vertical_span(&self, min_y: f32, max_y: f32) -> Self {
        Self::spanning(self.min_x, min_y, self.max_x(), max_y)
    }

    /// Exact containment.
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Containment after growing `self` by `eps_x`/`eps_y` on each side.
    pub fn contains_with_inaccuracy(&self, other: &Rectangle, eps_x: f32, eps_y: f32) -> bool {
        self.contains(other)
            || (self.min_x - eps_x <= other.min_x
                && self.min_y - eps_y <= other.min_y
                && other.max_x() <= self.max_x() + eps_x
                && other.max_y() <= self.max_y() + eps_y)
    }

    /// Whether the two rectangles share a region of positive area.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.intersect_horizontally(other) > 0.0 && self.intersect_vertically(other) > 0.0
    }

    /// Length of the overlap of the two X-intervals (0 when disjoint).
    pub fn intersect_horizontally(&self, other: &Rectangle) -> f32 {
        (self.max_x().min(other.max_x()) - self.min_x.max(other.min_x)).max(0.0)
    }

    /// Length of the overlap of the two Y-intervals (0 when disjoint).
    pub fn intersect_vertically(&self, other: &Rectangle) -> f32 {
        (self.max_y().min(other.max_y()) - self.min_y.max(other.min_y)).max(0.0)
    }

    /// `self` ends at or before `other` starts, within `eps_x`.
    pub fn is_before_horizontally(&self, other: &Rectangle, eps_x: f32) -> bool {
        self.max_x() <= other.min_x + eps_x
    }

    /// `self` starts at or after `other` ends, within `eps_x`.
    pub fn is_after_horizontally(&self, other: &Rectangle, eps_x: f32) -> bool {
        other.max_x() <= self.min_x + eps_x
    }

    /// Both top and bottom edges match within `eps_y`.
    pub fn on_same_line(&self, other: &Rectangle, eps_y: f32) -> bool {
        (self.min_y - other.min_y).abs() <= eps_y && (self.max_y() - other.max_y()).abs() <= eps_y
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Self::spanning(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Common region, or `None` when the rectangles do not overlap.
    ///
    /// Touching rectangles yield a zero-width or zero-height result.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some(Self::spanning(min_x, min_y, max_x, max_y))
    }

    /// Fold of [`Rectangle::union`]; an empty input yields `EMPTY`.
    pub fn combine<I>(rects: I) -> Rectangle
    where
        I: IntoIterator<Item = Rectangle>,
    {
        rects
            .into_iter()
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or(Self::EMPTY)
    }

    /// Remove `other`'s X-range from `self`.
    ///
    /// Returns the left and/or right remainders (0, 1 or 2 pieces). When
    /// the X-ranges do not overlap, `self` is returned unchanged.
    pub fn subtract(&self, other: &Rectangle) -> Vec<Rectangle> {
        self.split_horizontally(other, 0.0)
    }

    /// Split `self` by `other`'s X-range, snapping edges that coincide
    /// within `eps_x`.
    ///
    /// A shared left edge leaves only the right remainder, a shared right
    /// edge only the left one, and shared edges on both sides leave nothing.
    pub fn cut(&self, other: &Rectangle, eps_x: f32) -> Vec<Rectangle> {
        self.split_horizontally(other, eps_x)
    }

    fn split_horizontally(&self, other: &Rectangle, eps_x: f32) -> Vec<Rectangle> {
        if self.intersect_horizontally(other) <= 0.0 {
            return vec![*self];
        }
        let mut pieces = Vec::with_capacity(2);
        if other.min_x - self.min_x > eps_x {
            pieces.push(self.with_horizontal_span(self.min_x, other.min_x));
        }
        if self.max_x() - other.max_x() > eps_x {
            pieces.push(self.with_horizontal_span(other.max_x(), self.max_x()));
        }
        pieces
    }

    /// The empty horizontal strip between `self` and a later `other`.
    ///
    /// `None` unless `self` is before `other` within `eps_x` and the strip
    /// is at least `min_width` wide. The strip spans both vertical extents.
    pub fn between_gap(&self, other: &Rectangle, eps_x: f32, min_width: f32) -> Option<Rectangle> {
        if !self.is_before_horizontally(other, eps_x) {
            return None;
        }
        let width = other.min_x - self.max_x();
        if width < min_width || width <= 0.0 {
            return None;
        }
        Some(Self::spanning(
            self.max_x(),
            self.min_y.min(other.min_y),
            other.min_x,
            self.max_y().max(other.max_y()),
        ))
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_construction_rejects_negative_extent() {
        assert!(Rectangle::new(0.0, 0.0, -1.0, 5.0).is_err());
        assert!(Rectangle::new(0.0, 0.0, 1.0, -5.0).is_err());
        assert!(Rectangle::new(f32::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(Rectangle::new(3.0, 4.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_edges() {
        let r = rect(10.0, 20.0, 30.0, 5.0);
        assert_eq!(r.max_x(), 40.0);
        assert_eq!(r.max_y(), 25.0);
        assert_eq!(r.center_x(), 25.0);
        assert!(!r.is_empty());
        assert!(Rectangle::EMPTY.is_empty());
    }

    #[test]
    fn test_union_is_commutative_and_associative() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, -3.0, 20.0, 4.0);
        let c = rect(-7.0, 12.0, 2.0, 2.0);
        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
    }

    #[test]
    fn test_contains_self() {
        let r = rect(1.5, 2.5, 8.0, 3.0);
        assert!(r.contains(&r));
        assert!(r.contains_with_inaccuracy(&r, 0.0, 0.0));
    }

    #[test]
    fn test_zero_inaccuracy_matches_exact_containment() {
        let outer = rect(0.0, 0.0, 100.0, 50.0);
        let cases = [
            rect(10.0, 10.0, 20.0, 20.0),
            rect(-1.0, 10.0, 20.0, 20.0),
            rect(90.0, 40.0, 11.0, 5.0),
            rect(0.0, 0.0, 100.0, 50.0),
        ];
        for inner in cases {
            assert_eq!(
                outer.contains_with_inaccuracy(&inner, 0.0, 0.0),
                outer.contains(&inner)
            );
        }
    }

    #[test]
    fn test_contains_with_inaccuracy() {
        let outer = rect(0.0, 0.0, 100.0, 50.0);
        let slightly_out = rect(-2.0, 1.0, 50.0, 50.5);
        assert!(!outer.contains(&slightly_out));
        assert!(outer.contains_with_inaccuracy(&slightly_out, 2.5, 2.5));
        assert!(!outer.contains_with_inaccuracy(&slightly_out, 1.0, 2.5));
    }

    #[test]
    fn test_interval_overlap_lengths() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(6.0, 8.0, 10.0, 10.0);
        assert_eq!(a.intersect_horizontally(&b), 4.0);
        assert_eq!(a.intersect_vertically(&b), 2.0);
        assert!(a.intersects(&b));

        let far = rect(50.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersect_horizontally(&far), 0.0);
        assert!(!a.intersects(&far));
    }

    #[test]
    fn test_before_and_after() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(11.0, 0.0, 10.0, 10.0);
        let overlapping = rect(9.0, 0.0, 10.0, 10.0);
        assert!(a.is_before_horizontally(&b, 0.0));
        assert!(b.is_after_horizontally(&a, 0.0));
        assert!(!a.is_before_horizontally(&overlapping, 0.0));
        assert!(a.is_before_horizontally(&overlapping, 2.5));
        assert!(!b.is_before_horizontally(&a, 2.5));
    }

    #[test]
    fn test_on_same_line() {
        let a = rect(0.0, 100.0, 10.0, 12.0);
        let b = rect(40.0, 101.0, 10.0, 12.5);
        let c = rect(40.0, 115.0, 10.0, 12.0);
        assert!(a.on_same_line(&b, 2.5));
        assert!(!a.on_same_line(&c, 2.5));
    }

    #[test]
    fn test_combine() {
        assert_eq!(Rectangle::combine(Vec::new()), Rectangle::EMPTY);
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(5.0, 5.0, 1.0, 1.0);
        assert_eq!(Rectangle::combine(vec![a]), a);
        assert_eq!(Rectangle::combine(vec![a, b]), rect(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    fn test_intersection() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Some(rect(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersection(&rect(20.0, 0.0, 1.0, 1.0)), None);
    }

    #[test]
    fn test_between_gap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(30.0, 2.0, 10.0, 10.0);
        let gap = a.between_gap(&b, 2.5, 12.0).unwrap();
        assert_eq!(gap, rect(10.0, 0.0, 20.0, 12.0));

        // too narrow
        assert!(a.between_gap(&b, 2.5, 25.0).is_none());
        // wrong order
        assert!(b.between_gap(&a, 2.5, 1.0).is_none());
    }

    #[test]
    fn test_cut_piece_counts() {
        let r = rect(0.0, 0.0, 100.0, 10.0);
        // interior slice leaves both sides
        assert_eq!(r.cut(&rect(40.0, 0.0, 20.0, 10.0), 2.5).len(), 2);
        // shared left edge leaves the right remainder only
        let right = r.cut(&rect(1.0, 0.0, 20.0, 10.0), 2.5);
        assert_eq!(right, vec![rect(21.0, 0.0, 79.0, 10.0)]);
        // shared right edge leaves the left remainder only
        let left = r.cut(&rect(70.0, 0.0, 29.0, 10.0), 2.5);
        assert_eq!(left, vec![rect(0.0, 0.0, 70.0, 10.0)]);
        // both edges shared
        assert!(r.cut(&rect(1.0, 0.0, 98.0, 10.0), 2.5).is_empty());
        // disjoint
        assert_eq!(r.cut(&rect(200.0, 0.0, 5.0, 10.0), 2.5), vec![r]);
    }

    #[test]
    fn test_cut_then_union_restores_original() {
        let r = rect(0.0, 0.0, 100.0, 10.0);
        let slice = rect(40.0, 0.0, 20.0, 10.0);
        let removed = r.intersection(&slice).unwrap();
        let rebuilt = Rectangle::combine(r.cut(&slice, 2.5).into_iter().chain([removed]));
        assert_eq!(rebuilt, r);

        let edge_slice = rect(0.0, 0.0, 30.0, 10.0);
        let removed = r.intersection(&edge_slice).unwrap();
        let rebuilt = Rectangle::combine(r.cut(&edge_slice, 2.5).into_iter().chain([removed]));
        assert_eq!(rebuilt, r);
    }

    #[test]
    fn test_subtract() {
        let r = rect(0.0, 0.0, 100.0, 10.0);
        assert_eq!(
            r.subtract(&rect(1.0, 0.0, 20.0, 10.0)),
            vec![rect(0.0, 0.0, 1.0, 10.0), rect(21.0, 0.0, 79.0, 10.0)]
        );
    }

    #[test]
    fn test_serde_validation() {
        let ok: Rectangle =
            serde_json::from_str(r#"{"x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0}"#).unwrap();
        assert_eq!(ok, rect(1.0, 2.0, 3.0, 4.0));

        let bad: std::result::Result<Rectangle, _> =
            serde_json::from_str(r#"{"x": 1.0, "y": 2.0, "width": -3.0, "height": 4.0}"#);
        assert!(bad.is_err());
    }
}
