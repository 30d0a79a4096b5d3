//! Per-page input delivered by the document-decoding collaborator.
//!
//! Coordinates are top-down page coordinates: the decoder has already
//! flipped the PDF y axis against the page height.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounded, Rectangle};

/// Text rendering mode that paints nothing (PDF `Tr 3`).
pub const RENDER_MODE_INVISIBLE: u8 = 3;

/// Everything the layout pipeline needs to know about one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInput {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Content box; when absent it is the bounding box of the content
    #[serde(default)]
    pub content_box: Option<Rectangle>,

    /// Glyph groups in content-stream order, one per text-writing call
    #[serde(default)]
    pub strings: Vec<WrittenString>,

    /// Axis-aligned stroked rectangles (`re` path operators)
    #[serde(default)]
    pub strokes: Vec<Rectangle>,

    /// Link annotations
    #[serde(default)]
    pub links: Vec<LinkAnnotation>,

    /// Raster images
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

impl PageInput {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            ..Default::default()
        }
    }

    /// Add a glyph group.
    pub fn push_string(&mut self, string: WrittenString) {
        self.strings.push(string);
    }

    /// Total number of glyphs on the page.
    pub fn glyph_count(&self) -> usize {
        self.strings.iter().map(|s| s.glyphs.len()).sum()
    }
}

/// A group of glyphs written by one text-showing operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WrittenString {
    /// Glyphs in writing order
    pub glyphs: Vec<Glyph>,
}

impl WrittenString {
    /// Create a group from glyphs.
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    /// Lay `text` out one glyph per character with a fixed advance.
    pub fn monospaced(text: &str, x: f32, baseline: f32, advance: f32, height: f32) -> Self {
        let glyphs = text
            .chars()
            .enumerate()
            .map(|(i, c)| Glyph::new(c.to_string(), x + i as f32 * advance, baseline, advance, height))
            .collect();
        Self { glyphs }
    }

    /// Apply the same font to every glyph.
    pub fn with_font(mut self, font: FontInfo) -> Self {
        for glyph in &mut self.glyphs {
            glyph.font = font.clone();
        }
        self
    }

    /// Concatenated glyph text.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.text.as_str()).collect()
    }
}

/// One positioned glyph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glyph {
    /// Unicode text of the glyph (may be more than one char for ligatures)
    pub text: String,

    /// Left edge
    pub x: f32,

    /// Baseline
    pub y: f32,

    /// Advance width
    pub width: f32,

    /// Glyph height above the baseline
    pub height: f32,

    /// Font description
    #[serde(default)]
    pub font: FontInfo,

    /// Font size in points
    #[serde(default)]
    pub font_size: f32,

    /// Fill color (hex format, e.g., "#000000")
    #[serde(default)]
    pub color: Option<String>,

    /// Rotation in degrees
    #[serde(default)]
    pub rotation: f32,

    /// PDF text rendering mode
    #[serde(default)]
    pub render_mode: u8,
}

impl Glyph {
    /// Create a glyph with the default font.
    pub fn new(text: impl Into<String>, x: f32, baseline: f32, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y: baseline,
            width,
            height,
            font: FontInfo::default(),
            font_size: height,
            color: None,
            rotation: 0.0,
            render_mode: 0,
        }
    }

    /// Whether the glyph paints anything.
    pub fn is_visible(&self) -> bool {
        self.render_mode != RENDER_MODE_INVISIBLE
    }

    /// Whether the glyph is whitespace only.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

impl Bounded for Glyph {
    /// The glyph box sits on the baseline: `(x, y - height, width, height)`.
    fn rect(&self) -> Rectangle {
        Rectangle::spanning(self.x, self.y - self.height, self.x + self.width, self.y)
    }
}

/// Font description as reported by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    /// Font family (e.g., "Helvetica")
    #[serde(default)]
    pub family: Option<String>,

    /// Font name (e.g., "ABCDEF+Helvetica-Bold")
    #[serde(default)]
    pub name: String,

    /// Weight from the font descriptor
    #[serde(default)]
    pub weight: Option<u16>,

    /// Bold flag from the font descriptor
    #[serde(default)]
    pub bold: bool,

    /// Italic flag from the font descriptor
    #[serde(default)]
    pub italic: bool,

    /// Ascent as a fraction of the font size
    #[serde(default = "default_ascent")]
    pub ascent: f32,

    /// Descent as a positive fraction of the font size
    #[serde(default = "default_descent")]
    pub descent: f32,
}

fn default_ascent() -> f32 {
    0.8
}

fn default_descent() -> f32 {
    0.2
}

impl FontInfo {
    /// A font known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Default for FontInfo {
    fn default() -> Self {
        Self {
            family: None,
            name: String::new(),
            weight: None,
            bold: false,
            italic: false,
            ascent: default_ascent(),
            descent: default_descent(),
        }
    }
}

/// A link annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAnnotation {
    /// Active area
    pub rect: Rectangle,

    /// Target URI
    pub target: String,
}

/// A decoded raster image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageObject {
    /// Placement on the page
    pub rect: Rectangle,

    /// Raster width in pixels
    #[serde(default)]
    pub pixel_width: u32,

    /// Raster height in pixels
    #[serde(default)]
    pub pixel_height: u32,

    /// RGBA samples, row-major
    #[serde(default)]
    pub rgba: Vec<u8>,
}

impl ImageObject {
    /// Whether the raster carries content.
    ///
    /// Fully transparent rasters and rasters of a single colour are
    /// decoration, not content. A raster without samples is kept.
    pub fn carries_content(&self) -> bool {
        let mut pixels = self.rgba.chunks_exact(4);
        let Some(first) = pixels.next() else {
            return true;
        };
        let mut any_opaque = first[3] != 0;
        let mut varied = false;
        for px in pixels {
            any_opaque |= px[3] != 0;
            varied |= px[..3] != first[..3];
            if any_opaque && varied {
                return true;
            }
        }
        false
    }
}

impl Bounded for ImageObject {
    fn rect(&self) -> Rectangle {
        self.rect
    }
}
