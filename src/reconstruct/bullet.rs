//! List bullet recognition.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Bullet glyphs that mark an unordered list item.
const BULLET_GLYPHS: &[&str] = &[
    "-", "–", "—", "•", "·", "*", "○", "▪", "◦", "▸", "▹", "►", "■", "●", "※", "□", "◆", "◇",
    "▶", "▷", "☞", "➤", "➜", "✓", "❖",
];

fn enumerator() -> &'static Regex {
    static ENUMERATOR: OnceLock<Regex> = OnceLock::new();
    ENUMERATOR.get_or_init(|| {
        Regex::new(r"^(?:\d{1,3}[.)]|\(\d{1,3}\)|[A-Za-z][.)]|\([A-Za-z]\)|[ivxIVX]{1,4}[.)])$")
            .expect("enumerator pattern is valid")
    })
}

/// Whether `text` is a list bullet on its own.
///
/// Accepts numbering (`1.`, `2)`, `(3)`), letters (`a.`, `B)`), short roman
/// numerals and bullet glyphs. Text is NFKC-normalized first so full-width
/// digits and compatibility forms match.
pub fn is_bullet(text: &str) -> bool {
    let normalized: String = text.nfkc().collect();
    let cleaned: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }
    BULLET_GLYPHS.contains(&cleaned.as_str()) || enumerator().is_match(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_bullets() {
        assert!(is_bullet("1."));
        assert!(is_bullet("12)"));
        assert!(is_bullet("(3)"));
        assert!(is_bullet(" 4 . "));
        assert!(!is_bullet("1234."));
        assert!(!is_bullet("42"));
    }

    #[test]
    fn test_letter_bullets() {
        assert!(is_bullet("a."));
        assert!(is_bullet("B)"));
        assert!(is_bullet("iv."));
        assert!(!is_bullet("ab."));
    }

    #[test]
    fn test_glyph_bullets() {
        assert!(is_bullet("•"));
        assert!(is_bullet("-"));
        assert!(is_bullet("▪"));
        assert!(!is_bullet("Name"));
        assert!(!is_bullet(""));
        assert!(!is_bullet("   "));
    }

    #[test]
    fn test_fullwidth_digits_normalized() {
        assert!(is_bullet("１．"));
        assert!(is_bullet("２）"));
    }
}
