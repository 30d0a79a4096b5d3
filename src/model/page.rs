//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{ItemsList, Table, TextParagraph};
use crate::geometry::{Bounded, Rectangle};

/// A single page of reconstructed structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Top-level structural objects in reading order
    pub elements: Vec<StructuralObject>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Add an element to the page.
    pub fn add_element(&mut self, element: StructuralObject) {
        self.elements.push(element);
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(|e| e.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The final output unit consumed by markup rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuralObject {
    /// A paragraph of text
    Paragraph(TextParagraph),

    /// A bulleted or numbered list
    List(ItemsList),

    /// A table
    Table(Table),

    /// A standalone raster graphic
    Graphic(Graphic),
}

impl StructuralObject {
    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        match self {
            StructuralObject::Paragraph(p) => p.plain_text(),
            StructuralObject::List(l) => l.plain_text(),
            StructuralObject::Table(t) => t.plain_text(),
            StructuralObject::Graphic(_) => String::new(),
        }
    }

    /// Check if this is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, StructuralObject::Paragraph(_))
    }

    /// Check if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, StructuralObject::List(_))
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, StructuralObject::Table(_))
    }
}

/// A raster image placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    /// Resource identifier, unique within the document
    pub id: String,

    /// Placement on the page
    pub rect: Rectangle,
}

impl Bounded for Graphic {
    fn rect(&self) -> Rectangle {
        self.rect
    }
}
