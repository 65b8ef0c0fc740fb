//! Classification-to-color mapping for the compositor.

use core_text::Highlight;
use crossterm::style::Color;

/// Terminal color for a cell classification; `None` means the default
/// foreground. The compositor emits a color change only when this value
/// differs from the previous cell's.
pub fn highlight_color(tag: Highlight) -> Option<Color> {
    match tag {
        Highlight::Normal => None,
        Highlight::Comment | Highlight::BlockComment => Some(Color::DarkCyan),
        Highlight::KeywordPrimary => Some(Color::DarkYellow),
        Highlight::KeywordSecondary => Some(Color::DarkGreen),
        Highlight::String => Some(Color::DarkMagenta),
        Highlight::Number => Some(Color::DarkRed),
        Highlight::Match => Some(Color::DarkBlue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_uses_default_foreground() {
        assert!(highlight_color(Highlight::Normal).is_none());
    }

    #[test]
    fn comment_variants_share_a_color() {
        assert_eq!(
            highlight_color(Highlight::Comment),
            highlight_color(Highlight::BlockComment)
        );
    }
}
