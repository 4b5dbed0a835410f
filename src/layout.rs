//! Layout engine: centers a rendered frame inside the terminal.

use crate::render::Frame;
use crate::terminal::TerminalDimensions;

/// Lines kept free below the frame for the status and instructions.
pub const RESERVED_LINES: usize = 3;

/// Outcome of placing a frame on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Text ready to print.
    Placed(String),
    /// The frame is larger than the terminal allows.
    DoesNotFit,
}

/// Place `frame` for a terminal of size `dims`.
///
/// Without centering the frame is returned as-is. With centering every row is
/// padded by `(width - frame_width) / 2` spaces on both sides and the block by
/// `(height - frame_height) / 2` newlines above and below, truncating odd
/// remainders.
pub fn place(frame: &Frame, dims: TerminalDimensions, center: bool) -> Placement {
    if !center {
        return Placement::Placed(frame.to_string_display());
    }

    let frame_width = frame.width();
    let frame_height = frame.height();
    let term_width = dims.width as usize;
    let term_height = dims.height as usize;

    if term_width < frame_width || term_height < frame_height + RESERVED_LINES {
        return Placement::DoesNotFit;
    }

    let side = " ".repeat((term_width - frame_width) / 2);
    let body = frame
        .rows()
        .iter()
        .map(|row| format!("{side}{row}{side}"))
        .collect::<Vec<_>>()
        .join("\n");

    let vertical = "\n".repeat((term_height - frame_height) / 2);
    Placement::Placed(format!("{vertical}{body}{vertical}"))
}
