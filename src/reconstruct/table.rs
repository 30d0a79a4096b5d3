//! Table reconstruction from TABLE skeletons.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::geometry::Bounded;
use crate::layout::{Block, LayoutStatistics, PageLine, Skeleton, SkeletonKind};
use crate::model::{Table, TableCell, TableRow};

use super::Reconstructor;

/// Turns a TABLE skeleton into rows and cells.
///
/// Every non-empty content block is a column. Row boundaries are the line
/// numbers where a column's line gap reaches the page's largest normal line
/// gap; they are shared by all columns, so rows cut every column in
/// lockstep.
pub struct TableReconstructor<'a> {
    statistics: &'a LayoutStatistics,
    eps_y: f32,
}

impl<'a> TableReconstructor<'a> {
    /// Create a reconstructor using the page's gap statistics.
    pub fn new(statistics: &'a LayoutStatistics, eps_y: f32) -> Self {
        Self { statistics, eps_y }
    }

    /// Line numbers at which a new table row starts, ascending.
    ///
    /// The first line of the table is never a boundary.
    pub fn resolve_table_rows(&self, blocks: &[Block]) -> Result<Vec<usize>> {
        let threshold = self.statistics.max_line_gap().map(|g| g - self.eps_y);
        let mut boundaries = BTreeSet::new();

        for block in blocks.iter().filter(|b| !b.is_empty()) {
            for pair in block.lines().windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                let gap = next.rect().min_y() - prev.rect().max_y();
                if threshold.map_or(true, |t| gap >= t) {
                    boundaries.insert(line_number(next)?);
                }
            }
        }

        Ok(boundaries.into_iter().collect())
    }

    /// Build the table.
    pub fn reconstruct(&self, skeleton: Skeleton, cells: &Reconstructor<'_>) -> Result<Table> {
        if skeleton.kind != SkeletonKind::Table {
            return Err(Error::Structure(format!(
                "table reconstruction given a {} skeleton (rows {}..={})",
                skeleton.kind, skeleton.first_line, skeleton.last_line
            )));
        }

        let boundaries = self.resolve_table_rows(skeleton.blocks())?;
        let columns: Vec<Block> = skeleton
            .into_blocks()
            .into_iter()
            .filter(|b| !b.is_empty())
            .collect();

        let mut first = usize::MAX;
        for block in &columns {
            for line in block.lines() {
                first = first.min(line_number(line)?);
            }
        }
        if columns.is_empty() {
            return Ok(Table::new());
        }

        let mut starts = vec![first];
        starts.extend(boundaries.into_iter().filter(|b| *b > first));
        let row_count = starts.len();

        // grid[column][row] holds the lines of one cell
        let mut grid: Vec<Vec<Vec<PageLine>>> = Vec::with_capacity(columns.len());
        for block in columns {
            let mut column: Vec<Vec<PageLine>> = vec![Vec::new(); row_count];
            for line in block.into_lines() {
                let number = line_number(&line)?;
                let row = starts.partition_point(|s| *s <= number) - 1;
                column[row].push(line);
            }
            grid.push(column);
        }

        let mut table = Table::new();
        for row in 0..row_count {
            let mut cells_of_row = Vec::with_capacity(grid.len());
            for column in &mut grid {
                let lines = std::mem::take(&mut column[row]);
                cells_of_row.push(TableCell::with_content(cells.lines(lines)?));
            }
            table.add_row(TableRow::new(cells_of_row));
        }

        log::trace!(
            "Reconstructed table with {} rows and {} columns",
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }
}

pub(crate) fn line_number(line: &PageLine) -> Result<usize> {
    line.line_number().ok_or_else(|| {
        Error::Structure(format!("line {:?} has no line number", line.text()))
    })
}
