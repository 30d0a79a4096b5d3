//! Objects placed on page lines during layout.

use crate::geometry::{Bounded, Rectangle};
use crate::model::{Graphic, TextStyle};

use super::skeleton::Skeleton;

/// Anything that can sit on a page line.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentObject {
    /// A run of glyphs sharing one style
    Text(TextObject),
    /// A run of glyphs inside a link annotation
    Link(LinkObject),
    /// A raster image
    Graphic(Graphic),
    /// A resolved region that replaced its content
    Skeleton(Box<Skeleton>),
}

impl DocumentObject {
    /// Text carried by text and link objects.
    pub fn text(&self) -> Option<&str> {
        match self {
            DocumentObject::Text(t) => Some(&t.text),
            DocumentObject::Link(l) => Some(&l.text),
            DocumentObject::Graphic(_) | DocumentObject::Skeleton(_) => None,
        }
    }

    /// Whether this is a text or link run.
    pub fn is_textual(&self) -> bool {
        matches!(self, DocumentObject::Text(_) | DocumentObject::Link(_))
    }

    /// Whether this object forces its line to stand alone.
    pub fn is_standalone(&self) -> bool {
        matches!(self, DocumentObject::Graphic(_) | DocumentObject::Skeleton(_))
    }

    /// Whether the object paints anything. Whitespace-only runs do not.
    pub fn is_visible(&self) -> bool {
        match self.text() {
            Some(text) => !text.trim().is_empty(),
            None => true,
        }
    }

    /// The skeleton, if this object is one.
    pub fn as_skeleton(&self) -> Option<&Skeleton> {
        match self {
            DocumentObject::Skeleton(s) => Some(s),
            _ => None,
        }
    }
}

impl Bounded for DocumentObject {
    fn rect(&self) -> Rectangle {
        match self {
            DocumentObject::Text(t) => t.rect,
            DocumentObject::Link(l) => l.rect,
            DocumentObject::Graphic(g) => g.rect,
            DocumentObject::Skeleton(s) => s.rect(),
        }
    }
}

/// A styled run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    /// Concatenated glyph text
    pub text: String,
    /// Union of the glyph rectangles
    pub rect: Rectangle,
    /// Resolved style shared by every glyph
    pub style: TextStyle,
}

impl TextObject {
    /// Start a run with its first glyph.
    pub fn new(text: impl Into<String>, rect: Rectangle, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            rect,
            style,
        }
    }

    /// Append a glyph.
    pub fn extend(&mut self, text: &str, rect: &Rectangle) {
        self.text.push_str(text);
        self.rect = self.rect.union(rect);
    }
}

/// A styled run of text that points somewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkObject {
    /// Concatenated glyph text
    pub text: String,
    /// Union of the glyph rectangles
    pub rect: Rectangle,
    /// Resolved style shared by every glyph
    pub style: TextStyle,
    /// Link target
    pub target: String,
}

impl LinkObject {
    /// Start a link run with its first glyph.
    pub fn new(
        text: impl Into<String>,
        rect: Rectangle,
        style: TextStyle,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            rect,
            style,
            target: target.into(),
        }
    }

    /// Append a glyph.
    pub fn extend(&mut self, text: &str, rect: &Rectangle) {
        self.text.push_str(text);
        self.rect = self.rect.union(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_text_object_extend() {
        let mut t = TextObject::new("a", rect(0.0, 0.0, 5.0, 10.0), TextStyle::default());
        t.extend("b", &rect(5.0, 0.0, 5.0, 10.0));
        assert_eq!(t.text, "ab");
        assert_eq!(t.rect, rect(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_visibility() {
        let space = DocumentObject::Text(TextObject::new(
            "  ",
            rect(0.0, 0.0, 5.0, 10.0),
            TextStyle::default(),
        ));
        assert!(!space.is_visible());
        assert!(space.is_textual());

        let graphic = DocumentObject::Graphic(Graphic {
            id: "p1-img0".to_string(),
            rect: rect(0.0, 0.0, 50.0, 50.0),
        });
        assert!(graphic.is_visible());
        assert!(graphic.is_standalone());
        assert_eq!(graphic.text(), None);
    }

    #[test]
    fn test_link_text() {
        let link = DocumentObject::Link(LinkObject::new(
            "here",
            rect(0.0, 0.0, 20.0, 10.0),
            TextStyle::default(),
            "https://example.com",
        ));
        assert_eq!(link.text(), Some("here"));
        assert_eq!(link.rect().width(), 20.0);
    }
}
