//! Structure reconstruction: from resolved rows to structural objects.
//!
//! Rows are regrouped into blocks and walked in order. Text and link runs
//! accumulate into paragraphs; graphics pass through; skeletons dispatch to
//! the table or list reconstructor. PAGE skeletons are spliced back into
//! the rows before blocks form, so a margin split never cuts a paragraph.
//! Cells and list items recurse through the same walk, so tables and lists
//! nest freely.

mod bullet;
mod list;
mod paragraph;
mod table;

pub use bullet::is_bullet;
pub use list::ListReconstructor;
pub use table::TableReconstructor;

use crate::error::{Error, Result};
use crate::geometry::Bounded;
use crate::layout::{
    Block, BlockAssembler, DocumentObject, LayoutOptions, LayoutStatistics, PageAnalysis,
    PageLine, RowIndex, Skeleton, SkeletonKind,
};
use crate::model::{Page, StructuralObject};

use paragraph::ParagraphBuilder;

/// Walks resolved lines and emits structural objects.
pub struct Reconstructor<'a> {
    options: &'a LayoutOptions,
    statistics: &'a LayoutStatistics,
}

impl<'a> Reconstructor<'a> {
    /// Create a reconstructor for one page.
    pub fn new(options: &'a LayoutOptions, statistics: &'a LayoutStatistics) -> Self {
        Self {
            options,
            statistics,
        }
    }

    /// Reconstruct a whole analysed page.
    pub fn page(&self, analysis: PageAnalysis) -> Result<Page> {
        let mut page = Page::new(analysis.number, analysis.width, analysis.height);
        page.elements = self.lines(analysis.rows)?;
        log::debug!(
            "Page {}: reconstructed {} elements",
            page.number,
            page.elements.len()
        );
        Ok(page)
    }

    /// Reconstruct a set of lines, such as a table cell or a list item.
    pub fn lines(&self, lines: Vec<PageLine>) -> Result<Vec<StructuralObject>> {
        let mut lines = self.splice_pages(lines)?;
        lines.sort_by(|a, b| a.rect().min_y().total_cmp(&b.rect().min_y()));
        // Gaps seen here are not page statistics.
        let mut scratch = LayoutStatistics::new();
        let blocks = BlockAssembler::new(self.options).assemble(lines, &mut scratch);

        let mut out = Vec::new();
        for block in blocks {
            self.block(block, &mut out)?;
        }
        Ok(out)
    }

    /// Replace PAGE skeletons by their lines, merged back into the rows
    /// they came from.
    fn splice_pages(&self, lines: Vec<PageLine>) -> Result<Vec<PageLine>> {
        let mut rows = RowIndex::new(self.options.tolerance.y);
        for line in lines {
            self.splice_line(line, &mut rows)?;
        }
        Ok(rows.into_rows())
    }

    fn splice_line(&self, line: PageLine, rows: &mut RowIndex) -> Result<()> {
        let holds_page = line
            .objects()
            .iter()
            .any(|o| o.as_skeleton().is_some_and(Skeleton::is_page));
        if !holds_page {
            rows.insert(line);
            return Ok(());
        }

        let mut kept = PageLine::new();
        for object in line.into_objects() {
            match object {
                DocumentObject::Skeleton(skeleton) if skeleton.is_page() => {
                    for inner in page_lines(*skeleton)? {
                        self.splice_line(inner, rows)?;
                    }
                }
                other => kept.push(other),
            }
        }
        if !kept.is_empty() {
            rows.insert(kept);
        }
        Ok(())
    }

    fn block(&self, block: Block, out: &mut Vec<StructuralObject>) -> Result<()> {
        let mut paragraph = ParagraphBuilder::new(self.options);
        for line in block.into_lines() {
            for object in line.into_objects() {
                match object {
                    DocumentObject::Text(text) => paragraph.push_text(text),
                    DocumentObject::Link(link) => paragraph.push_link(link),
                    DocumentObject::Graphic(graphic) => {
                        paragraph.flush(out);
                        out.push(StructuralObject::Graphic(graphic));
                    }
                    DocumentObject::Skeleton(skeleton) => {
                        paragraph.flush(out);
                        self.skeleton(*skeleton, out)?;
                    }
                }
            }
        }
        paragraph.flush(out);
        Ok(())
    }

    /// Reconstruct one skeleton into `out`.
    pub fn skeleton(&self, skeleton: Skeleton, out: &mut Vec<StructuralObject>) -> Result<()> {
        match skeleton.kind {
            SkeletonKind::Page => out.extend(self.lines(page_lines(skeleton)?)?),
            SkeletonKind::Table => {
                let table = TableReconstructor::new(self.statistics, self.options.tolerance.y)
                    .reconstruct(skeleton, self)?;
                if !table.is_empty() {
                    out.push(StructuralObject::Table(table));
                }
            }
            SkeletonKind::List => {
                let list = ListReconstructor.reconstruct(skeleton, self)?;
                out.push(StructuralObject::List(list));
            }
        }
        Ok(())
    }
}

/// The lines of a PAGE skeleton's single content block.
fn page_lines(skeleton: Skeleton) -> Result<Vec<PageLine>> {
    if skeleton.blocks.len() != 1 {
        return Err(Error::Structure(format!(
            "page skeleton over rows {}..={} has {} content blocks",
            skeleton.first_line,
            skeleton.last_line,
            skeleton.blocks.len()
        )));
    }
    Ok(skeleton
        .into_blocks()
        .into_iter()
        .flat_map(Block::into_lines)
        .collect())
}
