//! Glyph font loading for the block-digit display.
//!
//! A font file holds eleven glyphs (`0`-`9`, then `:`) separated by a
//! `<---->` delimiter line. Every glyph must have the same number of rows.

use std::path::{Path, PathBuf};

use unicode_width::UnicodeWidthStr;

/// Delimiter line between two glyph blocks.
pub const GLYPH_DELIMITER: &str = "<---->";

/// Symbols a font defines, in file order.
pub const SYMBOLS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':'];

/// Glyph index used for the colon.
pub const COLON_INDEX: usize = 10;

/// The font compiled into the binary.
const BUNDLED_FONT: &str = include_str!("../assets/font.txt");

/// Errors that can occur while loading a glyph font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Font defines {found} glyphs, expected {expected} (0-9 and ':')")]
    GlyphCount { expected: usize, found: usize },

    #[error("Glyph '{symbol}' has {found} rows, expected {expected} like glyph '0'")]
    InconsistentHeight {
        symbol: char,
        expected: usize,
        found: usize,
    },

    #[error("Glyph '{symbol}' is empty")]
    EmptyGlyph { symbol: char },
}

/// Where the font is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A font file on disk.
    Path(PathBuf),
    /// The font shipped inside the binary.
    Bundled,
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSource::Path(path) => write!(f, "{}", path.display()),
            FontSource::Bundled => write!(f, "<bundled>"),
        }
    }
}

/// A single glyph: rows of identical display width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<String>,
}

impl Glyph {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Immutable set of glyphs for `0`-`9` and `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphFont {
    glyphs: Vec<Glyph>,
    height: usize,
}

impl GlyphFont {
    /// Load a font from the given source.
    pub fn load(source: &FontSource) -> Result<Self, FontError> {
        match source {
            FontSource::Path(path) => Self::from_file(path),
            FontSource::Bundled => Self::bundled(),
        }
    }

    /// Load a font file from disk.
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let content = std::fs::read_to_string(path).map_err(|e| FontError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// The font compiled into the binary.
    pub fn bundled() -> Result<Self, FontError> {
        Self::parse(BUNDLED_FONT)
    }

    /// Parse font text.
    ///
    /// CRLF line endings are accepted and one trailing newline is ignored.
    /// Rows narrower than the widest row of their glyph are padded with spaces
    /// on the right.
    pub fn parse(content: &str) -> Result<Self, FontError> {
        let normalized = content.replace("\r\n", "\n");
        let body = normalized.strip_suffix('\n').unwrap_or(&normalized);

        let delimiter = format!("\n{}\n", GLYPH_DELIMITER);
        let blocks: Vec<&str> = body.split(delimiter.as_str()).collect();
        if blocks.len() != SYMBOLS.len() {
            return Err(FontError::GlyphCount {
                expected: SYMBOLS.len(),
                found: blocks.len(),
            });
        }

        let height = blocks[0].split('\n').count();
        let mut glyphs = Vec::with_capacity(SYMBOLS.len());

        for (block, &symbol) in blocks.iter().zip(SYMBOLS.iter()) {
            let raw: Vec<&str> = block.split('\n').collect();
            if raw.len() != height {
                return Err(FontError::InconsistentHeight {
                    symbol,
                    expected: height,
                    found: raw.len(),
                });
            }

            let width = raw.iter().map(|row| row.width()).max().unwrap_or(0);
            if width == 0 {
                return Err(FontError::EmptyGlyph { symbol });
            }

            let rows = raw
                .iter()
                .map(|row| {
                    let mut padded = (*row).to_string();
                    padded.push_str(&" ".repeat(width - row.width()));
                    padded
                })
                .collect();

            glyphs.push(Glyph { rows });
        }

        Ok(Self { glyphs, height })
    }

    /// Number of rows shared by every glyph.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Look up the glyph for a symbol, if the font defines it.
    pub fn glyph(&self, symbol: char) -> Option<&Glyph> {
        glyph_index(symbol).map(|index| &self.glyphs[index])
    }
}

/// Direct glyph index: digit value, or [`COLON_INDEX`] for `:`.
pub fn glyph_index(symbol: char) -> Option<usize> {
    match symbol {
        ':' => Some(COLON_INDEX),
        c => c.to_digit(10).map(|d| d as usize),
    }
}
