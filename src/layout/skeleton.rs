//! Skeletons: regions split by co-extensive dividers.
//!
//! Resolution runs in three steps. Dividers sharing a row range become one
//! skeleton. Containment between skeleton rectangles gives each skeleton a
//! nesting level, and skeletons are filled innermost first. Filling moves
//! the covered objects out of the page rows into the skeleton's content
//! blocks and puts the skeleton itself on its first row, so an enclosing
//! skeleton picks it up like any other object.

use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::{Bounded, Rectangle};
use crate::reconstruct::is_bullet;

use super::block::Block;
use super::divider::Divider;
use super::line::PageLine;
use super::object::DocumentObject;
use super::options::LayoutOptions;
use super::rows::RowIndex;

/// Classification of a skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkeletonKind {
    /// A page-level split against the content edge; transparent
    Page,
    /// Bullets left of the split, item bodies right of it
    List,
    /// Columns of cells
    Table,
}

impl fmt::Display for SkeletonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkeletonKind::Page => "page",
            SkeletonKind::List => "list",
            SkeletonKind::Table => "table",
        };
        f.write_str(name)
    }
}

/// A resolved region of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    /// Dividers that split the region
    pub dividers: Vec<Divider>,
    /// Union of the dividers' border rectangles
    pub rect: Rectangle,
    /// First row covered
    pub first_line: usize,
    /// Last row covered (inclusive)
    pub last_line: usize,
    /// Number of enclosing skeletons
    pub level: usize,
    /// Classification
    pub kind: SkeletonKind,
    /// Content blocks: one for PAGE, left/right per divider otherwise
    pub blocks: Vec<Block>,
}

impl Skeleton {
    /// Create an unfilled skeleton from its first divider.
    pub fn new(divider: Divider) -> Self {
        Self {
            rect: divider.border_rect,
            first_line: divider.first_line,
            last_line: divider.last_line,
            level: 0,
            kind: if divider.page_border {
                SkeletonKind::Page
            } else {
                SkeletonKind::Table
            },
            dividers: vec![divider],
            blocks: Vec::new(),
        }
    }

    /// Whether `divider` belongs to this skeleton.
    fn accepts(&self, divider: &Divider) -> bool {
        self.first_line == divider.first_line
            && self.last_line == divider.last_line
            && self.is_page() == divider.page_border
    }

    fn add_divider(&mut self, divider: Divider) {
        self.rect = self.rect.union(&divider.border_rect);
        self.dividers.push(divider);
    }

    /// Whether the skeleton is a page-level split.
    pub fn is_page(&self) -> bool {
        self.kind == SkeletonKind::Page
    }

    /// Content blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Consume the skeleton, yielding its content blocks.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl Bounded for Skeleton {
    fn rect(&self) -> Rectangle {
        self.rect
    }
}

/// Tracks whether every left-hand object is a bullet.
#[derive(Debug, Clone, Copy)]
struct BulletTally {
    all: bool,
    seen: bool,
}

impl BulletTally {
    fn new() -> Self {
        Self {
            all: true,
            seen: false,
        }
    }

    fn observe(&mut self, line: &PageLine) {
        for object in line.objects().iter().filter(|o| o.is_visible()) {
            if object.text().is_some_and(is_bullet) {
                self.seen = true;
            } else {
                self.all = false;
            }
        }
    }

    fn is_list(&self) -> bool {
        self.all && self.seen
    }
}

/// Groups dividers into skeletons, orders them and fills them.
pub struct SkeletonResolver<'a> {
    options: &'a LayoutOptions,
}

impl<'a> SkeletonResolver<'a> {
    /// Create a resolver.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self { options }
    }

    /// Resolve every skeleton into the rows.
    ///
    /// Afterwards each top-level skeleton sits on its first row, emptied
    /// rows are gone and the remaining rows are renumbered. Returns the
    /// number of skeletons resolved.
    pub fn resolve(&self, dividers: Vec<Divider>, rows: &mut RowIndex) -> Result<usize> {
        let mut skeletons = self.group(dividers);
        self.order(&mut skeletons);
        let count = skeletons.len();

        for mut skeleton in skeletons {
            self.fill(&mut skeleton, rows);
            log::trace!(
                "Filled {} skeleton over rows {}..={} (level {}, {} blocks)",
                skeleton.kind,
                skeleton.first_line,
                skeleton.last_line,
                skeleton.level,
                skeleton.blocks.len()
            );
            let first = skeleton.first_line;
            let len = rows.len();
            rows.row_mut(first)
                .ok_or(Error::LineOutOfRange { line: first, len })?
                .insert_sorted(DocumentObject::Skeleton(Box::new(skeleton)));
        }

        rows.compact();
        Ok(count)
    }

    /// Group dividers by row range and page-border flag.
    pub fn group(&self, dividers: Vec<Divider>) -> Vec<Skeleton> {
        let mut skeletons: Vec<Skeleton> = Vec::new();
        for divider in dividers {
            match skeletons.iter_mut().find(|s| s.accepts(&divider)) {
                Some(skeleton) => skeleton.add_divider(divider),
                None => skeletons.push(Skeleton::new(divider)),
            }
        }
        skeletons
    }

    /// Assign nesting levels and sort innermost first.
    ///
    /// Ties keep non-PAGE skeletons ahead of PAGE ones, then go top down.
    pub fn order(&self, skeletons: &mut [Skeleton]) {
        let tol = self.options.tolerance;
        let rects: Vec<Rectangle> = skeletons.iter().map(|s| s.rect).collect();
        for (j, skeleton) in skeletons.iter_mut().enumerate() {
            skeleton.level = rects
                .iter()
                .enumerate()
                .filter(|(i, outer)| {
                    *i != j && outer.contains_with_inaccuracy(&rects[j], tol.x, tol.y)
                })
                .count();
        }
        skeletons.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then(a.is_page().cmp(&b.is_page()))
                .then(a.first_line.cmp(&b.first_line))
        });
    }

    /// Move the covered objects into the skeleton's content blocks and
    /// settle its kind.
    pub fn fill(&self, skeleton: &mut Skeleton, rows: &mut RowIndex) {
        if skeleton.is_page() {
            self.fill_page(skeleton, rows);
        } else {
            self.fill_split(skeleton, rows);
        }
    }

    fn fill_page(&self, skeleton: &mut Skeleton, rows: &mut RowIndex) {
        let tol = self.options.tolerance;
        let rect = skeleton.rect;
        let mut block = Block::new(rect);
        let mut tally = BulletTally::new();

        for line in skeleton.first_line..=skeleton.last_line {
            let Some(row) = rows.row_mut(line) else {
                break;
            };
            let taken = row.take_where(|o| rect.contains_with_inaccuracy(&o.rect(), tol.x, tol.y));
            place(taken, line, &mut block, &mut tally, false);
        }
        skeleton.blocks = vec![block];
    }

    fn fill_split(&self, skeleton: &mut Skeleton, rows: &mut RowIndex) {
        let tol = self.options.tolerance;
        skeleton
            .dividers
            .sort_by(|a, b| a.rect.min_x().total_cmp(&b.rect.min_x()));

        let mut blocks = Vec::with_capacity(skeleton.dividers.len() * 2);
        let mut tally = BulletTally::new();

        for divider in &skeleton.dividers {
            let border = divider.border_rect;
            let gap = divider.rect;
            let mut left = Block::new(border.with_horizontal_span(border.min_x(), gap.min_x()));
            let mut right = Block::new(border.with_horizontal_span(gap.max_x(), border.max_x()));

            for line in skeleton.first_line..=skeleton.last_line {
                let Some(row) = rows.row_mut(line) else {
                    break;
                };
                let (before, after): (Vec<_>, Vec<_>) = row
                    .take_where(|o| {
                        let r = o.rect();
                        border.contains_with_inaccuracy(&r, tol.x, tol.y)
                            && (r.is_before_horizontally(&gap, tol.x)
                                || r.is_after_horizontally(&gap, tol.x))
                    })
                    .into_iter()
                    .partition(|o| o.rect().is_before_horizontally(&gap, tol.x));

                place(before, line, &mut left, &mut tally, true);
                place(after, line, &mut right, &mut tally, false);
            }

            blocks.push(left);
            blocks.push(right);
        }

        skeleton.blocks = blocks;
        skeleton.kind = if tally.is_list() {
            SkeletonKind::List
        } else {
            SkeletonKind::Table
        };
    }
}

/// Put objects taken from row `line` into `block`.
///
/// PAGE skeletons are transparent: their lines are moved over as they are.
fn place(
    objects: Vec<DocumentObject>,
    line: usize,
    block: &mut Block,
    tally: &mut BulletTally,
    count_bullets: bool,
) {
    let mut row_line = PageLine::new();
    for object in objects {
        match object {
            DocumentObject::Skeleton(inner) if inner.is_page() => {
                for inner_line in inner.into_blocks().into_iter().flat_map(Block::into_lines) {
                    if count_bullets {
                        tally.observe(&inner_line);
                    }
                    block.push_line(inner_line);
                }
            }
            other => row_line.push(other),
        }
    }
    if row_line.is_empty() {
        return;
    }
    row_line.set_line_number(line);
    if count_bullets {
        tally.observe(&row_line);
    }
    block.push_line(row_line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::object::TextObject;
    use crate::model::TextStyle;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(x, y, w, h).unwrap()
    }

    fn divider(first: usize, last: usize, border: Rectangle, page_border: bool) -> Divider {
        let mut d = Divider::new(border.with_horizontal_span(border.center_x(), border.center_x() + 1.0), first);
        d.last_line = last;
        d.border_rect = border;
        d.page_border = page_border;
        d
    }

    fn text(s: &str, x: f32, y: f32, w: f32) -> DocumentObject {
        DocumentObject::Text(TextObject::new(s, rect(x, y, w, 10.0), TextStyle::default()))
    }

    fn rows_of(cells: &[&[(&str, f32, f32)]]) -> RowIndex {
        let mut index = RowIndex::new(2.5);
        for (i, cells) in cells.iter().enumerate() {
            let mut line = PageLine::new();
            for (s, x, w) in cells.iter() {
                line.push(text(s, *x, i as f32 * 14.0, *w));
            }
            index.insert(line);
        }
        index
    }

    fn two_column_divider(rows: usize) -> Divider {
        let mut d = Divider::new(rect(150.0, 0.0, 40.0, 10.0), 0);
        d.last_line = rows - 1;
        d.border_rect = Rectangle::spanning(50.0, 0.0, 290.0, (rows - 1) as f32 * 14.0 + 10.0);
        d
    }

    #[test]
    fn test_grouping_by_range() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let skeletons = resolver.group(vec![
            divider(0, 4, rect(0.0, 0.0, 100.0, 70.0), false),
            divider(0, 4, rect(100.0, 0.0, 100.0, 70.0), false),
            divider(2, 4, rect(0.0, 28.0, 100.0, 42.0), false),
            divider(0, 4, rect(180.0, 0.0, 20.0, 70.0), true),
        ]);

        assert_eq!(skeletons.len(), 3);
        assert_eq!(skeletons[0].dividers.len(), 2);
        assert_eq!(skeletons[0].rect, rect(0.0, 0.0, 200.0, 70.0));
        assert_eq!(skeletons[2].kind, SkeletonKind::Page);
    }

    #[test]
    fn test_margin_and_column_dividers_stay_apart() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let skeletons = resolver.group(vec![
            divider(0, 4, rect(50.0, 0.0, 240.0, 66.0), false),
            divider(0, 4, rect(250.0, 0.0, 40.0, 66.0), true),
        ]);

        assert_eq!(skeletons.len(), 2);
        assert_eq!(skeletons[0].kind, SkeletonKind::Table);
        assert_eq!(skeletons[0].rect, rect(50.0, 0.0, 240.0, 66.0));
        assert_eq!(skeletons[1].kind, SkeletonKind::Page);
        assert_eq!(skeletons[1].dividers.len(), 1);
    }

    #[test]
    fn test_nesting_levels() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let mut skeletons = resolver.group(vec![
            divider(0, 20, rect(0.0, 0.0, 400.0, 300.0), false),
            divider(2, 10, rect(100.0, 28.0, 200.0, 120.0), false),
            divider(4, 6, rect(150.0, 56.0, 50.0, 40.0), false),
        ]);
        resolver.order(&mut skeletons);

        let levels: Vec<(usize, usize)> = skeletons.iter().map(|s| (s.first_line, s.level)).collect();
        assert_eq!(levels, vec![(4, 2), (2, 1), (0, 0)]);
    }

    #[test]
    fn test_page_sorted_after_table_on_tie() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let mut skeletons = resolver.group(vec![
            divider(0, 4, rect(300.0, 0.0, 50.0, 70.0), true),
            divider(3, 6, rect(0.0, 40.0, 100.0, 50.0), false),
        ]);
        resolver.order(&mut skeletons);
        assert_eq!(skeletons[0].kind, SkeletonKind::Table);
        assert!(skeletons[1].is_page());
    }

    #[test]
    fn test_fill_table() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let mut rows = rows_of(&[
            &[("Name", 50.0, 100.0), ("Value", 190.0, 100.0)],
            &[("alpha", 50.0, 100.0), ("1", 190.0, 100.0)],
            &[("beta", 50.0, 100.0), ("2", 190.0, 100.0)],
        ]);
        let mut skeleton = Skeleton::new(two_column_divider(3));
        resolver.fill(&mut skeleton, &mut rows);

        assert_eq!(skeleton.kind, SkeletonKind::Table);
        assert_eq!(skeleton.blocks.len(), 2);
        assert_eq!(skeleton.blocks[0].text(), "Name\nalpha\nbeta");
        assert_eq!(skeleton.blocks[1].text(), "Value\n1\n2");
        assert_eq!(skeleton.blocks[1].lines()[2].line_number(), Some(2));
        assert!(rows.rows().iter().all(PageLine::is_empty));
    }

    #[test]
    fn test_fill_list() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let mut rows = rows_of(&[
            &[("1.", 50.0, 10.0), ("first item", 100.0, 190.0)],
            &[("continues", 100.0, 190.0)],
            &[("2.", 50.0, 10.0), ("second item", 100.0, 190.0)],
        ]);
        let mut d = Divider::new(rect(60.0, 0.0, 40.0, 10.0), 0);
        d.last_line = 2;
        d.border_rect = Rectangle::spanning(50.0, 0.0, 290.0, 38.0);
        let mut skeleton = Skeleton::new(d);
        resolver.fill(&mut skeleton, &mut rows);

        assert_eq!(skeleton.kind, SkeletonKind::List);
        assert_eq!(skeleton.blocks[0].len(), 2);
        assert_eq!(skeleton.blocks[1].len(), 3);
    }

    #[test]
    fn test_resolve_places_skeleton_on_first_row() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let mut rows = rows_of(&[
            &[("a", 50.0, 100.0), ("b", 190.0, 100.0)],
            &[("c", 50.0, 100.0), ("d", 190.0, 100.0)],
            &[("after", 50.0, 240.0)],
        ]);
        let count = resolver.resolve(vec![two_column_divider(2)], &mut rows).unwrap();

        assert_eq!(count, 1);
        assert_eq!(rows.len(), 2);
        let skeleton = rows.rows()[0].objects()[0].as_skeleton().unwrap();
        assert_eq!(skeleton.kind, SkeletonKind::Table);
        assert_eq!(rows.rows()[1].text(), "after");
        assert_eq!(rows.rows()[1].line_number(), Some(1));
    }

    #[test]
    fn test_page_skeleton_single_block() {
        let options = LayoutOptions::default();
        let resolver = SkeletonResolver::new(&options);
        let mut rows = rows_of(&[&[("x", 40.0, 200.0)], &[("y", 40.0, 200.0)]]);
        let mut skeleton = Skeleton::new(divider(0, 1, rect(0.0, 0.0, 300.0, 24.0), true));
        resolver.fill(&mut skeleton, &mut rows);

        assert!(skeleton.is_page());
        assert_eq!(skeleton.blocks.len(), 1);
        assert_eq!(skeleton.blocks[0].len(), 2);
    }
}
