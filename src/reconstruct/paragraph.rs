//! Accumulation of text runs into paragraphs.

use crate::geometry::Rectangle;
use crate::layout::{LayoutOptions, LinkObject, TextObject};
use crate::model::{StructuralObject, TextParagraph, TextRun};

/// Builds one paragraph from consecutive text and link runs.
///
/// Runs that do not touch on the page are separated by a space unless one
/// side already carries whitespace at the seam.
pub(crate) struct ParagraphBuilder {
    paragraph: TextParagraph,
    last: Option<(Rectangle, bool)>,
    word_gap: f32,
    eps_x: f32,
    eps_y: f32,
}

impl ParagraphBuilder {
    pub(crate) fn new(options: &LayoutOptions) -> Self {
        Self {
            paragraph: TextParagraph::new(),
            last: None,
            word_gap: options.min_word_gap,
            eps_x: options.tolerance.x,
            eps_y: options.tolerance.y,
        }
    }

    pub(crate) fn push_text(&mut self, object: TextObject) {
        self.separate(&object.rect, &object.text);
        self.paragraph
            .add_run(TextRun::styled(object.text, object.style));
    }

    pub(crate) fn push_link(&mut self, object: LinkObject) {
        self.separate(&object.rect, &object.text);
        self.paragraph
            .add_link(object.text, object.target, object.style);
    }

    fn separate(&mut self, rect: &Rectangle, text: &str) {
        if let Some((prev, prev_ends_blank)) = self.last {
            let gap = rect.min_x() - prev.max_x();
            let touching = prev.on_same_line(rect, self.eps_y)
                && gap >= -self.eps_x
                && gap <= self.word_gap;
            let starts_blank = text.starts_with(char::is_whitespace);
            if !touching && !prev_ends_blank && !starts_blank {
                self.paragraph.add_space();
            }
        }
        self.last = Some((*rect, text.ends_with(char::is_whitespace)));
    }

    /// Emit the paragraph, if any, and start a new one.
    pub(crate) fn flush(&mut self, out: &mut Vec<StructuralObject>) {
        self.last = None;
        let paragraph = std::mem::take(&mut self.paragraph);
        if !paragraph.is_empty() {
            out.push(StructuralObject::Paragraph(paragraph));
        }
    }
}
