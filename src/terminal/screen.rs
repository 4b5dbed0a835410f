//! Full-frame redraw of the countdown in the terminal.

use std::io::{self, Write};
use std::sync::Arc;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use super::size::{probe, TerminalDimensions};
use crate::font::GlyphFont;
use crate::layout::{place, Placement};
use crate::render::render;
use crate::timer::{Screen, TimerView};

/// Build the text for one redraw.
///
/// The block clock is followed by the status and instructions lines. When the
/// clock does not fit the terminal only the bare `MM:SS` text is shown.
pub fn compose(
    view: &TimerView,
    font: &GlyphFont,
    dims: TerminalDimensions,
    center: bool,
) -> String {
    let clock = view.clock_text();

    let frame = match render(&clock, font) {
        Ok(frame) => frame,
        Err(e) => {
            log::warn!("{}", e);
            return format!("{clock}\n");
        }
    };

    match place(&frame, dims, center) {
        Placement::Placed(mut text) => {
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(view.status.label());
            text.push('\n');
            text.push_str(view.instructions);
            text.push('\n');
            text
        }
        Placement::DoesNotFit => format!("{clock}\n"),
    }
}

/// Draws countdown frames to a terminal writer.
pub struct TerminalScreen<W: Write = io::Stdout> {
    out: W,
    font: Arc<GlyphFont>,
    center: bool,
}

impl TerminalScreen<io::Stdout> {
    /// Screen drawing to stdout.
    pub fn stdout(font: Arc<GlyphFont>, center: bool) -> Self {
        Self::new(io::stdout(), font, center)
    }
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, font: Arc<GlyphFont>, center: bool) -> Self {
        Self { out, font, center }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> Screen for TerminalScreen<W> {
    fn draw(&mut self, view: &TimerView) -> io::Result<()> {
        let text = compose(view, &self.font, probe(), self.center);
        queue!(
            self.out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print(text)
        )?;
        self.out.flush()
    }
}
