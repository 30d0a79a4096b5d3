//! Page lines and glyph-to-line assembly.

use crate::error::{Error, Result};
use crate::geometry::{Bounded, Rectangle};
use crate::model::{Glyph, Graphic, ImageObject, LinkAnnotation, PageInput, TextStyle, WrittenString};

use super::object::{DocumentObject, LinkObject, TextObject};
use super::options::LayoutOptions;
use super::style::StyleResolver;

/// Objects sharing one visual line, ordered left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLine {
    objects: Vec<DocumentObject>,
    rect: Rectangle,
    text: String,
    line_number: Option<usize>,
}

impl PageLine {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line holding a single object.
    pub fn with_object(object: DocumentObject) -> Self {
        let mut line = Self::new();
        line.push(object);
        line
    }

    /// Append an object at the end of the line.
    pub fn push(&mut self, object: DocumentObject) {
        let rect = object.rect();
        self.rect = if self.objects.is_empty() {
            rect
        } else {
            self.rect.union(&rect)
        };
        if let Some(text) = object.text() {
            self.text.push_str(text);
        }
        self.objects.push(object);
    }

    /// Insert an object keeping the line ordered by left edge.
    pub fn insert_sorted(&mut self, object: DocumentObject) {
        let x = object.rect().min_x();
        let at = self.objects.partition_point(|o| o.rect().min_x() <= x);
        self.objects.insert(at, object);
        self.refresh();
    }

    /// Move every object of `other` into this line, keeping x order.
    pub fn absorb(&mut self, other: PageLine) {
        self.objects.extend(other.objects);
        self.objects
            .sort_by(|a, b| a.rect().min_x().total_cmp(&b.rect().min_x()));
        self.refresh();
    }

    /// Remove and return the objects matching `predicate`.
    pub fn take_where<F>(&mut self, mut predicate: F) -> Vec<DocumentObject>
    where
        F: FnMut(&DocumentObject) -> bool,
    {
        let (taken, kept): (Vec<_>, Vec<_>) =
            self.objects.drain(..).partition(|o| predicate(o));
        self.objects = kept;
        self.refresh();
        taken
    }

    fn refresh(&mut self) {
        self.rect = Rectangle::combine(self.objects.iter().map(Bounded::rect));
        self.text = self.objects.iter().filter_map(|o| o.text()).collect();
    }

    /// Objects in left-to-right order.
    pub fn objects(&self) -> &[DocumentObject] {
        &self.objects
    }

    /// Consume the line, yielding its objects.
    pub fn into_objects(self) -> Vec<DocumentObject> {
        self.objects
    }

    /// Text of the text and link objects.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the line within its page, once assigned.
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// Assign the line number.
    pub fn set_line_number(&mut self, number: usize) {
        self.line_number = Some(number);
    }

    /// Whether the line has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether the line shows nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.objects.iter().all(|o| !o.is_visible())
    }

    /// Whether the line holds a graphic or a skeleton.
    pub fn is_standalone(&self) -> bool {
        self.objects.iter().any(DocumentObject::is_standalone)
    }
}

impl Bounded for PageLine {
    fn rect(&self) -> Rectangle {
        self.rect
    }
}

/// The run currently being extended.
#[derive(Debug)]
struct OpenRun {
    object: DocumentObject,
    target: Option<usize>,
}

/// Turns written strings into page lines.
///
/// Glyphs join the open run while they stay on its line, in the same link
/// annotation, with an equal style and a gap no wider than the word gap.
/// A written string continues the pending line when it sits on the same
/// visual line and starts after it.
pub struct LineAssembler<'a> {
    options: &'a LayoutOptions,
    styles: StyleResolver<'a>,
    links: &'a [LinkAnnotation],
    page: u32,
    pending: PageLine,
    open: Option<OpenRun>,
    lines: Vec<PageLine>,
}

impl<'a> LineAssembler<'a> {
    /// Create an assembler for one page.
    pub fn new(input: &'a PageInput, options: &'a LayoutOptions) -> Self {
        Self {
            options,
            styles: StyleResolver::new(
                &input.strokes,
                options.baseline_tolerance,
                options.tolerance.x,
            ),
            links: &input.links,
            page: input.number,
            pending: PageLine::new(),
            open: None,
            lines: Vec::new(),
        }
    }

    /// Assemble every string and image of a page.
    pub fn assemble(input: &PageInput, options: &LayoutOptions) -> Result<Vec<PageLine>> {
        let mut assembler = LineAssembler::new(input, options);
        for string in &input.strings {
            assembler.push_string(string)?;
        }
        for (index, image) in input.images.iter().enumerate() {
            assembler.push_image(image, index);
        }
        let lines = assembler.finish();
        log::debug!("Page {}: assembled {} lines", input.number, lines.len());
        Ok(lines)
    }

    /// Process one written string.
    pub fn push_string(&mut self, string: &WrittenString) -> Result<()> {
        let glyphs: Vec<&Glyph> = string.glyphs.iter().filter(|g| g.is_visible()).collect();
        for glyph in &glyphs {
            self.validate(glyph)?;
        }
        let Some(string_rect) = glyphs.iter().map(|g| g.rect()).reduce(|a, b| a.union(&b)) else {
            return Ok(());
        };

        let eps = self.options.tolerance;
        if !self.pending.is_empty()
            && !(string_rect.on_same_line(&self.pending.rect(), eps.y)
                && string_rect.is_after_horizontally(&self.pending.rect(), eps.x))
        {
            self.finish_line();
        }

        for glyph in glyphs {
            self.push_glyph(glyph);
        }
        self.close_run();
        Ok(())
    }

    /// Place an image on a line of its own.
    ///
    /// Images without content (fully transparent or a single colour) are
    /// skipped.
    pub fn push_image(&mut self, image: &ImageObject, index: usize) {
        if !image.carries_content() {
            log::trace!("Page {}: skipping blank image {}", self.page, index);
            return;
        }
        self.close_run();
        self.finish_line();
        self.lines.push(PageLine::with_object(DocumentObject::Graphic(Graphic {
            id: format!("p{}-img{}", self.page, index),
            rect: image.rect,
        })));
    }

    /// Close any pending work and return the lines.
    pub fn finish(mut self) -> Vec<PageLine> {
        self.close_run();
        self.finish_line();
        self.lines
    }

    fn validate(&self, glyph: &Glyph) -> Result<()> {
        let finite = [glyph.x, glyph.y, glyph.width, glyph.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || glyph.width < 0.0 || glyph.height < 0.0 {
            return Err(Error::PageDecode {
                page: self.page,
                message: format!("glyph {:?} has invalid geometry", glyph.text),
            });
        }
        Ok(())
    }

    fn push_glyph(&mut self, glyph: &Glyph) {
        let rect = glyph.rect();
        let style = self.styles.resolve(glyph);
        let eps = self.options.tolerance;
        let target = self
            .links
            .iter()
            .position(|l| l.rect.contains_with_inaccuracy(&rect, eps.x, eps.y));

        if let Some(run) = &mut self.open {
            if run.target == target && continues(&run.object, &rect, &style, self.options) {
                match &mut run.object {
                    DocumentObject::Text(t) => t.extend(&glyph.text, &rect),
                    DocumentObject::Link(l) => l.extend(&glyph.text, &rect),
                    _ => {}
                }
                return;
            }
        }

        self.close_run();
        let object = match target {
            Some(index) => DocumentObject::Link(LinkObject::new(
                glyph.text.clone(),
                rect,
                style,
                self.links[index].target.clone(),
            )),
            None => DocumentObject::Text(TextObject::new(glyph.text.clone(), rect, style)),
        };
        self.open = Some(OpenRun { object, target });
    }

    fn close_run(&mut self) {
        if let Some(run) = self.open.take() {
            self.pending.push(run.object);
        }
    }

    fn finish_line(&mut self) {
        let line = std::mem::take(&mut self.pending);
        if line.is_empty() {
            return;
        }
        if line.is_blank() {
            log::trace!("Page {}: discarding blank line", self.page);
            return;
        }
        self.lines.push(line);
    }
}

/// Whether a glyph at `rect` with `style` extends the open run.
fn continues(open: &DocumentObject, rect: &Rectangle, style: &TextStyle, options: &LayoutOptions) -> bool {
    let (open_rect, open_style) = match open {
        DocumentObject::Text(t) => (t.rect, &t.style),
        DocumentObject::Link(l) => (l.rect, &l.style),
        _ => return false,
    };
    if open_style != style || !open_rect.on_same_line(rect, options.tolerance.y) {
        return false;
    }
    let gap = rect.min_x() - open_rect.max_x();
    gap >= -options.tolerance.x && gap <= options.min_word_gap
}
