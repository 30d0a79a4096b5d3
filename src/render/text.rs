//! Plain text rendering of reconstructed documents.

use crate::error::Result;
use crate::model::Document;

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Pages are separated by a blank line, table cells by tabs and list
/// items keep their bullet.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let output = doc
        .pages
        .iter()
        .filter(|page| options.page_selection.includes(page.number))
        .map(|page| page.plain_text())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(output.trim().to_string())
}
