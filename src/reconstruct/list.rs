//! List reconstruction from LIST skeletons.

use crate::error::{Error, Result};
use crate::layout::{PageLine, Skeleton, SkeletonKind};
use crate::model::{ItemsList, ItemsListRow};

use super::table::line_number;
use super::Reconstructor;

/// Turns a LIST skeleton into list rows.
///
/// Content block 0 holds the bullets. The remaining blocks hold the item
/// bodies, cut at the line numbers of the bullets; body lines above the
/// first bullet belong to the first item.
pub struct ListReconstructor;

impl ListReconstructor {
    /// Build the list.
    pub fn reconstruct(&self, skeleton: Skeleton, items: &Reconstructor<'_>) -> Result<ItemsList> {
        if skeleton.kind != SkeletonKind::List {
            return Err(Error::Structure(format!(
                "list reconstruction given a {} skeleton (rows {}..={})",
                skeleton.kind, skeleton.first_line, skeleton.last_line
            )));
        }
        let (first_line, last_line) = (skeleton.first_line, skeleton.last_line);

        let mut blocks = skeleton.into_blocks().into_iter();
        let bullet_block = blocks.next().unwrap_or_default();

        let mut bullets: Vec<(usize, String)> = Vec::new();
        for line in bullet_block.lines() {
            bullets.push((line_number(line)?, line.text().trim().to_string()));
        }
        if bullets.is_empty() {
            return Err(Error::Structure(format!(
                "list skeleton over rows {}..={} has no bullets",
                first_line, last_line
            )));
        }
        bullets.sort_by_key(|(number, _)| *number);

        let mut groups: Vec<Vec<Vec<PageLine>>> = Vec::new();
        for block in blocks {
            let mut group: Vec<Vec<PageLine>> = vec![Vec::new(); bullets.len()];
            for line in block.into_lines() {
                let number = line_number(&line)?;
                let item = bullets
                    .partition_point(|(b, _)| *b <= number)
                    .saturating_sub(1);
                group[item].push(line);
            }
            groups.push(group);
        }

        let mut list = ItemsList::new();
        for (index, (_, bullet)) in bullets.into_iter().enumerate() {
            let mut content = Vec::new();
            for group in &mut groups {
                content.extend(items.lines(std::mem::take(&mut group[index]))?);
            }
            list.add_row(ItemsListRow::new(bullet, content));
        }

        log::trace!("Reconstructed list with {} items", list.len());
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::layout::{Block, DocumentObject, Divider, LayoutOptions, LayoutStatistics, TextObject};
    use crate::model::{StructuralObject, TextStyle};

    fn line(text: &str, x: f32, number: usize) -> PageLine {
        let mut line = PageLine::with_object(DocumentObject::Text(TextObject::new(
            text,
            Rectangle::new(x, number as f32 * 14.0, 100.0, 10.0).unwrap(),
            TextStyle::default(),
        )));
        line.set_line_number(number);
        line
    }

    fn list_skeleton(bullets: &[(usize, &str)], body: &[(usize, &str)]) -> Skeleton {
        let mut left = Block::new(Rectangle::EMPTY);
        for (n, t) in bullets {
            left.push_line(line(t, 50.0, *n));
        }
        let mut right = Block::new(Rectangle::EMPTY);
        for (n, t) in body {
            right.push_line(line(t, 100.0, *n));
        }
        let mut d = Divider::new(Rectangle::new(70.0, 0.0, 30.0, 10.0).unwrap(), 0);
        d.last_line = 5;
        let mut s = Skeleton::new(d);
        s.kind = SkeletonKind::List;
        s.blocks = vec![left, right];
        s
    }

    #[test]
    fn test_three_bullets_two_lines_each() {
        let options = LayoutOptions::default();
        let stats = LayoutStatistics::new();
        let items = Reconstructor::new(&options, &stats);
        let skeleton = list_skeleton(
            &[(0, "1."), (2, "2."), (4, "3.")],
            &[
                (0, "first a"),
                (1, "first b"),
                (2, "second a"),
                (3, "second b"),
                (4, "third a"),
                (5, "third b"),
            ],
        );
        let list = ListReconstructor.reconstruct(skeleton, &items).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.rows[0].bullet, "1.");
        assert_eq!(list.rows[1].content.len(), 1);
        match &list.rows[1].content[0] {
            StructuralObject::Paragraph(p) => assert_eq!(p.plain_text(), "second a second b"),
            other => panic!("expected paragraph, got {:?}", other),
        }
        assert_eq!(list.rows[2].plain_text(), "3. third a third b");
    }

    #[test]
    fn test_body_before_first_bullet_joins_first_item() {
        let options = LayoutOptions::default();
        let stats = LayoutStatistics::new();
        let items = Reconstructor::new(&options, &stats);
        let skeleton = list_skeleton(&[(1, "•"), (2, "•")], &[(0, "lead"), (1, "one"), (2, "two")]);
        let list = ListReconstructor.reconstruct(skeleton, &items).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.rows[0].plain_text(), "• lead one");
    }

    #[test]
    fn test_list_without_bullets_rejected() {
        let options = LayoutOptions::default();
        let stats = LayoutStatistics::new();
        let items = Reconstructor::new(&options, &stats);
        let skeleton = list_skeleton(&[], &[(0, "body")]);
        let err = ListReconstructor.reconstruct(skeleton, &items).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }
}
