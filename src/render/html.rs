//! HTML rendering of reconstructed documents.
//!
//! One structural object maps to one tag: paragraphs to `<p>`, lists to
//! `<ol>`, tables to `<table>`, graphics to `<img>`. Cells and list items
//! render their nested objects recursively.

use crate::error::Result;
use crate::model::{
    Document, Graphic, InlineContent, ItemsList, Page, StructuralObject, Table, TextParagraph,
    TextStyle,
};

use super::RenderOptions;

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to HTML.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        for page in &doc.pages {
            if self.options.page_selection.includes(page.number) {
                self.render_page(&mut output, page);
            }
        }
        Ok(output.trim_end().to_string())
    }

    fn render_page(&self, output: &mut String, page: &Page) {
        if self.options.page_markers {
            output.push_str(&format!("<section data-page=\"{}\">\n", page.number));
        }
        for element in &page.elements {
            self.render_element(output, element);
        }
        if self.options.page_markers {
            output.push_str("</section>\n");
        }
    }

    fn render_element(&self, output: &mut String, element: &StructuralObject) {
        match element {
            StructuralObject::Paragraph(p) => self.render_paragraph(output, p),
            StructuralObject::List(l) => self.render_list(output, l),
            StructuralObject::Table(t) => self.render_table(output, t),
            StructuralObject::Graphic(g) => self.render_image(output, g),
        }
    }

    /// Nested content: a lone paragraph is rendered without its `<p>`.
    fn render_nested(&self, output: &mut String, content: &[StructuralObject]) {
        match content {
            [StructuralObject::Paragraph(p)] => self.render_inline_content(output, &p.content),
            _ => {
                for element in content {
                    self.render_element(output, element);
                }
            }
        }
    }

    fn render_paragraph(&self, output: &mut String, para: &TextParagraph) {
        if para.is_empty() {
            return;
        }
        output.push_str("<p>");
        self.render_inline_content(output, &para.content);
        output.push_str("</p>\n");
    }

    fn render_inline_content(&self, output: &mut String, content: &[InlineContent]) {
        for item in content {
            match item {
                InlineContent::Text(run) => {
                    output.push_str(&apply_text_style(&escape_html(&run.text), &run.style));
                }
                InlineContent::Link { text, url, style } => {
                    let anchor = format!("<a href=\"{}\">{}</a>", escape_html(url), escape_html(text));
                    output.push_str(&apply_text_style(&anchor, style));
                }
                InlineContent::Space => output.push(' '),
            }
        }
    }

    fn render_list(&self, output: &mut String, list: &ItemsList) {
        if list.is_empty() {
            return;
        }
        output.push_str("<ol>\n");
        for row in &list.rows {
            output.push_str("<li>");
            self.render_nested(output, &row.content);
            output.push_str("</li>\n");
        }
        output.push_str("</ol>\n");
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.is_empty() {
            return;
        }
        output.push_str("<table>\n");
        for row in &table.rows {
            output.push_str("<tr>");
            for cell in &row.cells {
                output.push_str("<td>");
                self.render_nested(output, &cell.content);
                output.push_str("</td>");
            }
            output.push_str("</tr>\n");
        }
        output.push_str("</table>\n");
    }

    fn render_image(&self, output: &mut String, graphic: &Graphic) {
        let path = format!("{}{}", self.options.image_path_prefix, graphic.id);
        output.push_str(&format!(
            "<img src=\"{}\" width=\"{}\" height=\"{}\">\n",
            escape_html(&path),
            graphic.rect.width().round(),
            graphic.rect.height().round()
        ));
    }
}

/// Wrap already-escaped text in the tags its style calls for.
fn apply_text_style(text: &str, style: &TextStyle) -> String {
    let mut result = text.to_string();

    // innermost first
    if style.strikethrough {
        result = format!("<del>{}</del>", result);
    }
    if style.underline {
        result = format!("<u>{}</u>", result);
    }
    if style.italic {
        result = format!("<i>{}</i>", result);
    }
    if style.bold {
        result = format!("<b>{}</b>", result);
    }

    result
}

/// Escape the characters HTML treats specially.
fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::model::{ItemsListRow, TableCell, TableRow, TextRun};

    fn doc_with(elements: Vec<StructuralObject>) -> Document {
        let mut page = Page::new(1, 612.0, 792.0);
        page.elements = elements;
        let mut doc = Document::new();
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_paragraph_styles() {
        let mut p = TextParagraph::new();
        p.add_run(TextRun::styled(
            "bold",
            TextStyle {
                bold: true,
                ..Default::default()
            },
        ));
        p.add_space();
        p.add_run(TextRun::styled(
            "gone",
            TextStyle {
                strikethrough: true,
                italic: true,
                ..Default::default()
            },
        ));
        p.add_space();
        p.add_link("site", "https://example.com/?a=1&b=2", TextStyle::default());

        let html = to_html(&doc_with(vec![StructuralObject::Paragraph(p)]), &RenderOptions::default()).unwrap();
        assert_eq!(
            html,
            "<p><b>bold</b> <i><del>gone</del></i> <a href=\"https://example.com/?a=1&amp;b=2\">site</a></p>"
        );
    }

    #[test]
    fn test_escaping() {
        let doc = doc_with(vec![StructuralObject::Paragraph(TextParagraph::with_text("a < b & c"))]);
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_list_and_table() {
        let mut list = ItemsList::new();
        list.add_row(ItemsListRow::new(
            "1.",
            vec![StructuralObject::Paragraph(TextParagraph::with_text("first"))],
        ));
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::with_content(vec![StructuralObject::Paragraph(TextParagraph::with_text("a"))]),
            TableCell::with_content(vec![StructuralObject::List(list.clone())]),
        ]));

        let html = to_html(
            &doc_with(vec![StructuralObject::List(list), StructuralObject::Table(table)]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(html.starts_with("<ol>\n<li>first</li>\n</ol>\n"));
        assert!(html.contains("<table>\n<tr><td>a</td><td><ol>\n<li>first</li>\n</ol>\n</td></tr>\n</table>"));
    }

    #[test]
    fn test_image_and_page_markers() {
        let doc = doc_with(vec![StructuralObject::Graphic(Graphic {
            id: "p1-img0".to_string(),
            rect: Rectangle::new(0.0, 0.0, 100.0, 50.0).unwrap(),
        })]);
        let options = RenderOptions::new()
            .with_image_prefix("assets/")
            .with_page_markers(true);
        let html = to_html(&doc, &options).unwrap();
        assert_eq!(
            html,
            "<section data-page=\"1\">\n<img src=\"assets/p1-img0\" width=\"100\" height=\"50\">\n</section>"
        );
    }

    #[test]
    fn test_page_selection() {
        let doc = doc_with(vec![StructuralObject::Paragraph(TextParagraph::with_text("x"))]);
        let options = RenderOptions::new().with_pages(crate::layout::PageSelection::Pages(vec![2]));
        assert_eq!(to_html(&doc, &options).unwrap(), "");
    }
}
