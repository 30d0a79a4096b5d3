//! List types.

use serde::{Deserialize, Serialize};

use super::StructuralObject;

/// An ordered list of bulleted or numbered items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsList {
    /// Items in reading order
    pub rows: Vec<ItemsListRow>,
}

impl ItemsList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item.
    pub fn add_row(&mut self, row: ItemsListRow) {
        self.rows.push(row);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation, one item per line.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One list item: its marker and the reconstructed body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsListRow {
    /// Marker text as it appeared on the page ("1.", "•", ...)
    pub bullet: String,

    /// Item body; may hold nested lists and tables
    pub content: Vec<StructuralObject>,
}

impl ItemsListRow {
    /// Create an item.
    pub fn new(bullet: impl Into<String>, content: Vec<StructuralObject>) -> Self {
        Self {
            bullet: bullet.into(),
            content,
        }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        let body = self
            .content
            .iter()
            .map(|o| o.plain_text())
            .collect::<Vec<_>>()
            .join(" ");
        if self.bullet.is_empty() {
            body
        } else {
            format!("{} {}", self.bullet, body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextParagraph;

    #[test]
    fn test_list_plain_text() {
        let mut list = ItemsList::new();
        list.add_row(ItemsListRow::new(
            "1.",
            vec![StructuralObject::Paragraph(TextParagraph::with_text("First"))],
        ));
        list.add_row(ItemsListRow::new(
            "2.",
            vec![StructuralObject::Paragraph(TextParagraph::with_text("Second"))],
        ));

        assert_eq!(list.len(), 2);
        assert_eq!(list.plain_text(), "1. First\n2. Second");
    }
}
