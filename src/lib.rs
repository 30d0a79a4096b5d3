//! # unlayout
//!
//! Layout reconstruction for extracted PDF pages.
//!
//! The input is what a PDF decoder already knows about each page: glyphs
//! with their positions and fonts, stroked rectangles, link annotations
//! and images. This library rebuilds the logical structure the page
//! expresses visually (paragraphs, bulleted lists and tables, nested to
//! any depth) by finding the whitespace that separates columns.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unlayout::{parse_file, render};
//!
//! fn main() -> unlayout::Result<()> {
//!     // Read a page dump produced by the decoder
//!     let doc = parse_file("document.pages.json")?;
//!
//!     // Convert to HTML
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Lines**: glyphs become text and link runs on lines ([`layout::LineAssembler`])
//! - **Blocks**: lines group into blocks by vertical gaps ([`layout::BlockAssembler`])
//! - **Dividers**: whitespace gaps shared by several rows ([`layout::DividerDetector`])
//! - **Skeletons**: dividers grouped into tables, lists and page regions
//! - **Reconstruction**: skeletons become [`Table`]s and [`ItemsList`]s
//! - **Parallel processing**: pages are independent and run on Rayon

pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod reconstruct;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{Bounded, Rectangle, Tolerance};
pub use layout::{analyze_page, LayoutOptions, PageAnalysis, PageSelection};
pub use model::{
    Document, FontInfo, Glyph, Graphic, ImageObject, InlineContent, ItemsList, ItemsListRow,
    LinkAnnotation, Page, PageInput, SkippedPage, StructuralObject, Table, TableCell, TableRow,
    TextParagraph, TextRun, TextStyle, WrittenString,
};
pub use reconstruct::Reconstructor;
pub use render::{JsonFormat, RenderOptions};
pub use source::{JsonPageSource, PageSource};

use std::path::Path;

use rayon::prelude::*;

/// Reconstruct the structure of a single page.
///
/// # Example
///
/// ```
/// use unlayout::{reconstruct_page, LayoutOptions, PageInput, WrittenString};
///
/// let mut input = PageInput::new(1, 612.0, 792.0);
/// input.push_string(WrittenString::monospaced("Hello", 72.0, 100.0, 6.0, 10.0));
///
/// let page = reconstruct_page(&input, &LayoutOptions::default()).unwrap();
/// assert_eq!(page.plain_text(), "Hello");
/// ```
pub fn reconstruct_page(input: &PageInput, options: &LayoutOptions) -> Result<Page> {
    let analysis = analyze_page(input, options)?;
    let statistics = analysis.statistics.clone();
    Reconstructor::new(options, &statistics).page(analysis)
}

/// Reconstruct every selected page of a source.
///
/// Pages are processed in parallel unless `options.parallel` is off; the
/// result keeps page order either way. A page that fails to decode is
/// recorded in [`Document::skipped`] and the rest of the document is
/// still returned. Any other error aborts the whole run.
pub fn reconstruct_document<S>(source: &S, options: &LayoutOptions) -> Result<Document>
where
    S: PageSource + ?Sized,
{
    let indices: Vec<usize> = (0..source.page_count())
        .filter(|index| options.pages.includes(*index as u32 + 1))
        .collect();

    log::debug!(
        "Reconstructing {} of {} pages ({})",
        indices.len(),
        source.page_count(),
        if options.parallel { "parallel" } else { "sequential" }
    );

    let process = |index: usize| -> Result<Page> {
        let input = source.page(index)?;
        reconstruct_page(&input, options).map_err(|e| match e {
            Error::InvalidGeometry(message) => Error::PageDecode {
                page: index as u32 + 1,
                message,
            },
            other => other,
        })
    };

    let results: Vec<(usize, Result<Page>)> = if options.parallel {
        indices
            .into_par_iter()
            .map(|index| (index, process(index)))
            .collect()
    } else {
        indices
            .into_iter()
            .map(|index| (index, process(index)))
            .collect()
    };

    let mut doc = Document::new();
    for (index, result) in results {
        match result {
            Ok(page) => doc.add_page(page),
            Err(e) if e.is_page_local() => {
                log::warn!("Skipping page {}: {}", index + 1, e);
                doc.skipped.push(SkippedPage {
                    number: index as u32 + 1,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(doc)
}

/// Read a JSON page dump and reconstruct it.
///
/// # Example
///
/// ```no_run
/// use unlayout::parse_file;
///
/// let doc = parse_file("document.pages.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, &LayoutOptions::default())
}

/// Read a JSON page dump and reconstruct it with custom options.
///
/// # Example
///
/// ```no_run
/// use unlayout::{parse_file_with_options, LayoutOptions, PageSelection};
///
/// let options = LayoutOptions::new()
///     .sequential()
///     .with_pages(PageSelection::Range(1..=3));
/// let doc = parse_file_with_options("document.pages.json", &options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: &LayoutOptions) -> Result<Document> {
    let source = JsonPageSource::open(path)?;
    reconstruct_document(&source, options)
}

/// Read a page dump and return its plain text.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Read a page dump and convert it to HTML.
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Read a page dump and convert it to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for layout reconstruction with custom options.
///
/// # Example
///
/// ```no_run
/// use unlayout::Unlayout;
///
/// let result = Unlayout::new()
///     .sequential()
///     .with_page_markers()
///     .parse("document.pages.json")
///     .unwrap();
///
/// println!("{}", result.to_html().unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unlayout {
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl Unlayout {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process pages one after another.
    pub fn sequential(mut self) -> Self {
        self.layout_options = self.layout_options.sequential();
        self
    }

    /// Only reconstruct (and render) the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.layout_options = self.layout_options.with_pages(pages.clone());
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Set the geometric tolerance.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.layout_options = self.layout_options.with_tolerance(tolerance);
        self
    }

    /// Set the narrowest gap that counts as a divider.
    pub fn with_min_divider_width(mut self, width: f32) -> Self {
        self.layout_options = self.layout_options.with_min_divider_width(width);
        self
    }

    /// Set the image path prefix used in HTML output.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_image_prefix(prefix);
        self
    }

    /// Wrap each page of HTML output in a section.
    pub fn with_page_markers(mut self) -> Self {
        self.render_options = self.render_options.with_page_markers(true);
        self
    }

    /// Reconstruct a JSON page dump.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<UnlayoutResult> {
        let source = JsonPageSource::open(path)?;
        self.reconstruct(&source)
    }

    /// Reconstruct pages from any source.
    pub fn reconstruct<S: PageSource + ?Sized>(&self, source: &S) -> Result<UnlayoutResult> {
        let document = reconstruct_document(source, &self.layout_options)?;
        Ok(UnlayoutResult {
            document,
            render_options: self.render_options.clone(),
        })
    }
}

/// Result of a reconstruction run.
pub struct UnlayoutResult {
    /// The reconstructed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnlayoutResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
