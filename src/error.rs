//! Top-level error type.

use crate::config::ConfigError;
use crate::font::FontError;

/// Errors that end the program with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Standard input is not a terminal; tty-countdown needs an interactive terminal")]
    NotATerminal,

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Interactive mode is only supported on Unix-like systems")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_error_message_passes_through() {
        let err = AppError::from(FontError::GlyphCount {
            expected: 11,
            found: 3,
        });
        assert_eq!(
            err.to_string(),
            "Font defines 3 glyphs, expected 11 (0-9 and ':')"
        );
    }

    #[test]
    fn test_io_error_is_terminal_error() {
        let err = AppError::from(std::io::Error::other("boom"));
        assert_eq!(err.to_string(), "Terminal error: boom");
    }
}
