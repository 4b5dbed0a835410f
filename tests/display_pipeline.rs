//! Font loading, rendering and layout working together.

use std::io::Write;
use std::sync::Arc;

use tty_countdown::font::{FontError, FontSource, GlyphFont, SYMBOLS};
use tty_countdown::layout::{place, Placement, RESERVED_LINES};
use tty_countdown::render::{render, RenderError};
use tty_countdown::terminal::{compose, TerminalDimensions, TerminalScreen};
use tty_countdown::timer::{Screen, Status, TimerView};

fn font_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn block_font_text(height: usize) -> String {
    SYMBOLS
        .iter()
        .map(|s| vec![format!("{s}{s}{s}"); height].join("\n"))
        .collect::<Vec<_>>()
        .join("\n<---->\n")
        + "\n"
}

// ==================== Font loading ====================

#[test]
fn test_load_font_from_file() {
    let file = font_file(&block_font_text(4));
    let font = GlyphFont::load(&FontSource::Path(file.path().to_path_buf())).unwrap();
    assert_eq!(font.height(), 4);
    assert_eq!(font.glyph(':').unwrap().rows()[0], ":::");
}

#[test]
fn test_inconsistent_glyph_height_fails_fast() {
    let text = block_font_text(3).replacen("888\n888\n888", "888\n888\n888\n888", 1);
    let file = font_file(&text);

    let err = GlyphFont::load(&FontSource::Path(file.path().to_path_buf())).unwrap_err();
    match &err {
        FontError::InconsistentHeight {
            symbol,
            expected,
            found,
        } => {
            assert_eq!(*symbol, '8');
            assert_eq!(*expected, 3);
            assert_eq!(*found, 4);
        }
        other => panic!("Expected InconsistentHeight, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Glyph '8' has 4 rows, expected 3 like glyph '0'"
    );
}

#[test]
fn test_missing_delimiter_is_a_glyph_count_error() {
    let text = block_font_text(2).replacen("\n<---->\n", "\n", 1);
    let file = font_file(&text);
    assert!(matches!(
        GlyphFont::from_file(file.path()),
        Err(FontError::GlyphCount { found: 10, .. })
    ));
}

// ==================== Render + layout ====================

#[test]
fn test_render_height_matches_font_for_all_clock_texts() {
    let font = GlyphFont::bundled().unwrap();
    for secs in [0u64, 5, 59, 60, 25 * 60, 99 * 60 + 59, 1000 * 60] {
        let view = TimerView {
            remaining_secs: secs,
            status: Status::Running,
            instructions: Status::Running.instructions(),
        };
        let frame = render(&view.clock_text(), &font).unwrap();
        assert_eq!(frame.height(), font.height());
    }
}

#[test]
fn test_render_rejects_non_clock_text() {
    let font = GlyphFont::bundled().unwrap();
    assert_eq!(
        render("12.5", &font),
        Err(RenderError::InvalidCharacter('.'))
    );
}

#[test]
fn test_bundled_font_fits_default_terminal() {
    let font = GlyphFont::bundled().unwrap();
    let frame = render("25:00", &font).unwrap();

    let Placement::Placed(text) = place(&frame, TerminalDimensions::default(), true) else {
        panic!("25:00 should fit an 80x24 terminal");
    };
    let lines: Vec<&str> = text.split('\n').collect();
    // (24 - 5) / 2 = 9 blank lines above
    assert!(lines[..9].iter().all(|l| l.is_empty()));
    // (80 - 30) / 2 = 25 columns each side
    assert!(lines[9].starts_with(&" ".repeat(25)));
    assert!(lines[9].ends_with(&" ".repeat(25)));
}

#[test]
fn test_fit_boundary_with_bundled_font() {
    let font = GlyphFont::bundled().unwrap();
    let frame = render("00:00", &font).unwrap();
    let width = frame.width() as u16;
    let height = (frame.height() + RESERVED_LINES) as u16;

    let exact = TerminalDimensions { height, width };
    assert!(matches!(place(&frame, exact, true), Placement::Placed(_)));

    let narrow = TerminalDimensions {
        height,
        width: width - 1,
    };
    assert_eq!(place(&frame, narrow, true), Placement::DoesNotFit);

    let short = TerminalDimensions {
        height: height - 1,
        width,
    };
    assert_eq!(place(&frame, short, true), Placement::DoesNotFit);
}

#[test]
fn test_compose_tiny_terminal_prints_bare_time() {
    let font = GlyphFont::bundled().unwrap();
    let view = TimerView {
        remaining_secs: 42,
        status: Status::Paused,
        instructions: Status::Paused.instructions(),
    };
    let dims = TerminalDimensions {
        height: 5,
        width: 20,
    };
    assert_eq!(compose(&view, &font, dims, true), "00:42\n");
}

#[test]
fn test_terminal_screen_writes_status_lines() {
    let font = Arc::new(GlyphFont::bundled().unwrap());
    let mut screen = TerminalScreen::new(Vec::new(), font, false);
    let view = TimerView {
        remaining_secs: 0,
        status: Status::Aborted,
        instructions: Status::Aborted.instructions(),
    };
    screen.draw(&view).unwrap();

    let written = String::from_utf8(screen.into_inner()).unwrap();
    assert!(written.contains("██████"));
    assert!(written.ends_with("Aborted!\nBye!\n"));
}
