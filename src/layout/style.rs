//! Glyph style resolution.

use crate::geometry::{Bounded, Rectangle};
use crate::model::{FontInfo, Glyph, TextStyle};

/// Weight at which a font counts as bold.
const BOLD_WEIGHT: u16 = 600;

/// Strokes taller than this share of the glyph height are not rules.
const THIN_STROKE_RATIO: f32 = 0.25;

/// Resolves the full [`TextStyle`] of a glyph, including decorations
/// drawn as thin stroked rectangles.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    strokes: &'a [Rectangle],
    baseline_tolerance: f32,
    eps_x: f32,
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver over the page's stroked rectangles.
    pub fn new(strokes: &'a [Rectangle], baseline_tolerance: f32, eps_x: f32) -> Self {
        Self {
            strokes,
            baseline_tolerance,
            eps_x,
        }
    }

    /// Resolve the style of one glyph.
    pub fn resolve(&self, glyph: &Glyph) -> TextStyle {
        let font = &glyph.font;
        let size = if glyph.font_size > 0.0 {
            glyph.font_size
        } else {
            glyph.height
        };

        TextStyle {
            font_family: font.family.clone(),
            font_name: (!font.name.is_empty()).then(|| font.name.clone()),
            font_weight: font.weight,
            font_size: (size > 0.0).then_some(size),
            bold: is_bold_font(font),
            italic: is_italic_font(font),
            underline: self.is_underlined(glyph, size),
            strikethrough: self.is_struck(glyph, size),
            color: glyph.color.clone(),
            rotation: glyph.rotation,
        }
    }

    fn decorations(&self, glyph: &Glyph) -> impl Iterator<Item = &'a Rectangle> {
        let rect = glyph.rect();
        let max_height = (glyph.height * THIN_STROKE_RATIO).max(0.5);
        let eps_x = self.eps_x;
        let strokes: &'a [Rectangle] = self.strokes;
        strokes.iter().filter(move |s| {
            s.height() <= max_height
                && s.min_x() <= rect.min_x() + eps_x
                && s.max_x() >= rect.max_x() - eps_x
        })
    }

    fn is_underlined(&self, glyph: &Glyph, size: f32) -> bool {
        let top = glyph.y - self.baseline_tolerance;
        let bottom = glyph.y + glyph.font.descent * size + self.baseline_tolerance;
        self.decorations(glyph)
            .any(|s| s.min_y() >= top && s.max_y() <= bottom)
    }

    fn is_struck(&self, glyph: &Glyph, size: f32) -> bool {
        let top = glyph.y - glyph.font.ascent * size;
        let bottom = glyph.y - self.baseline_tolerance;
        self.decorations(glyph)
            .any(|s| s.min_y() >= top && s.max_y() < bottom)
    }
}

/// Whether the font descriptor or name says bold.
pub fn is_bold_font(font: &FontInfo) -> bool {
    if font.bold || font.weight.is_some_and(|w| w >= BOLD_WEIGHT) {
        return true;
    }
    let name = font.name.to_lowercase();
    name.contains("bold") || name.contains("black") || name.contains("heavy")
}

/// Whether the font descriptor or name says italic.
pub fn is_italic_font(font: &FontInfo) -> bool {
    if font.italic {
        return true;
    }
    let name = font.name.to_lowercase();
    name.contains("italic") || name.contains("oblique")
}
