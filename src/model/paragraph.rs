//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextParagraph {
    /// Inline content in reading order
    pub content: Vec<InlineContent>,
}

impl TextParagraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with one unstyled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a hyperlink.
    pub fn add_link(&mut self, text: impl Into<String>, url: impl Into<String>, style: TextStyle) {
        self.content.push(InlineContent::Link {
            text: text.into(),
            url: url.into(),
            style,
        });
    }

    /// Add a word separator.
    pub fn add_space(&mut self) {
        self.content.push(InlineContent::Space);
    }

    /// Concatenated text of the text and link runs only, exactly as extracted.
    pub fn leaf_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                InlineContent::Text(run) => Some(run.text.as_str()),
                InlineContent::Link { text, .. } => Some(text.as_str()),
                InlineContent::Space => None,
            })
            .collect()
    }

    /// Readable text with separators.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.as_str(),
                InlineContent::Link { text, .. } => text.as_str(),
                InlineContent::Space => " ",
            })
            .collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Number of text and link runs.
    pub fn run_count(&self) -> usize {
        self.content
            .iter()
            .filter(|c| !matches!(c, InlineContent::Space))
            .count()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A hyperlink
    Link {
        /// Link text
        text: String,
        /// Link target
        url: String,
        /// Text styling
        style: TextStyle,
    },

    /// Separator between runs that did not touch on the page
    Space,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Resolved text styling.
///
/// Two glyphs belong to the same run only when their styles compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family
    pub font_family: Option<String>,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: Option<String>,

    /// Font weight (400 regular, 700 bold)
    pub font_weight: Option<u16>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Text color (hex format, e.g., "#FF0000")
    pub color: Option<String>,

    /// Rotation in degrees
    pub rotation: f32,
}

impl TextStyle {
    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.strikethrough
    }
}
