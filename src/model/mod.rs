//! Document model types.
//!
//! `input` holds what the decoding collaborator hands to the pipeline;
//! the remaining modules hold the structural output that rendering
//! consumes. Output types are recursive: table cells and list items hold
//! further structural objects.

mod document;
mod input;
mod list;
mod page;
mod paragraph;
mod table;

pub use document::{Document, SkippedPage};
pub use input::{
    FontInfo, Glyph, ImageObject, LinkAnnotation, PageInput, WrittenString, RENDER_MODE_INVISIBLE,
};
pub use list::{ItemsList, ItemsListRow};
pub use page::{Graphic, Page, StructuralObject};
pub use paragraph::{InlineContent, TextParagraph, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};
