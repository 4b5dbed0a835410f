//! Glyph renderer: turns a clock string into a block-art frame.

use unicode_width::UnicodeWidthStr;

use crate::font::GlyphFont;

/// Errors produced while rendering text with a glyph font.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Cannot render character {0:?}: only 0-9 and ':' are supported")]
    InvalidCharacter(char),
}

/// Block-art frame produced by the renderer.
///
/// Frames are rebuilt on every tick and never diffed against each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
}

impl Frame {
    /// Create a frame from its rows, top to bottom.
    pub fn from_rows(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Display width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.width()).max().unwrap_or(0)
    }

    /// Join the rows with newlines (no trailing newline).
    pub fn to_string_display(&self) -> String {
        self.rows.join("\n")
    }
}

/// Render `text` with `font`.
///
/// Row `r` of the frame is glyph row `r` of every character, joined by a
/// single space. Fails on the first character outside `0-9:`.
pub fn render(text: &str, font: &GlyphFont) -> Result<Frame, RenderError> {
    let glyphs = text
        .chars()
        .map(|c| font.glyph(c).ok_or(RenderError::InvalidCharacter(c)))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = (0..font.height())
        .map(|r| {
            glyphs
                .iter()
                .map(|glyph| glyph.rows()[r].as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Ok(Frame::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::SYMBOLS;

    /// Two-row font where every glyph is `<symbol><symbol>` over `..`.
    fn test_font() -> GlyphFont {
        let text = SYMBOLS
            .iter()
            .map(|s| format!("{s}{s}\n.."))
            .collect::<Vec<_>>()
            .join("\n<---->\n");
        GlyphFont::parse(&text).unwrap()
    }

    #[test]
    fn test_render_joins_glyphs_with_single_space() {
        let frame = render("12:05", &test_font()).unwrap();
        assert_eq!(frame.rows(), &["11 22 :: 00 55", ".. .. .. .. .."]);
    }

    #[test]
    fn test_render_no_trailing_space() {
        let frame = render("7", &test_font()).unwrap();
        assert_eq!(frame.rows(), &["77", ".."]);
    }

    #[test]
    fn test_render_height_independent_of_length() {
        let font = test_font();
        for text in ["", "0", "00:00", "123:45:67", "9999:59"] {
            assert_eq!(render(text, &font).unwrap().height(), font.height());
        }
    }

    #[test]
    fn test_render_rejects_invalid_characters() {
        let font = test_font();
        assert_eq!(
            render("12a:00", &font),
            Err(RenderError::InvalidCharacter('a'))
        );
        assert_eq!(render("-1", &font), Err(RenderError::InvalidCharacter('-')));
        assert_eq!(render("1 2", &font), Err(RenderError::InvalidCharacter(' ')));
    }

    #[test]
    fn test_render_with_bundled_font() {
        let font = GlyphFont::bundled().unwrap();
        let frame = render("25:00", &font).unwrap();
        assert_eq!(frame.height(), 5);
        // four 6-wide digits, one 2-wide colon, four separators
        assert_eq!(frame.width(), 30);
    }

    #[test]
    fn test_frame_to_string_display() {
        let frame = Frame::from_rows(vec!["ab".into(), "cd".into()]);
        assert_eq!(frame.to_string_display(), "ab\ncd");
        assert_eq!(Frame::default().to_string_display(), "");
    }
}
