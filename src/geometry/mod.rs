//! Geometry kernel shared by every layout stage.
//!
//! All predicates take their tolerance as an explicit argument; there is no
//! process-wide inaccuracy setting.

mod rectangle;

pub use rectangle::Rectangle;

use serde::{Deserialize, Serialize};

/// Anything that occupies a rectangle on the page.
pub trait Bounded {
    /// The bounding rectangle.
    fn rect(&self) -> Rectangle;
}

impl Bounded for Rectangle {
    fn rect(&self) -> Rectangle {
        *self
    }
}

/// Per-axis inaccuracy used by the layout predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Horizontal inaccuracy in page units
    pub x: f32,
    /// Vertical inaccuracy in page units
    pub y: f32,
}

impl Tolerance {
    /// Default inaccuracy in page units.
    pub const DEFAULT: f32 = 2.5;

    /// Create a tolerance with separate axes.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same tolerance on both axes.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value)
    }

    /// No tolerance at all.
    pub fn exact() -> Self {
        Self::uniform(0.0)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_defaults() {
        let tol = Tolerance::default();
        assert_eq!(tol.x, 2.5);
        assert_eq!(tol.y, 2.5);
        assert_eq!(Tolerance::exact(), Tolerance::new(0.0, 0.0));
    }
}
