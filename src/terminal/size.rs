//! Terminal size probing with a fixed fallback.

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalDimensions {
    pub height: u16,
    pub width: u16,
}

impl Default for TerminalDimensions {
    fn default() -> Self {
        Self {
            height: 24,
            width: 80,
        }
    }
}

impl TerminalDimensions {
    /// Build dimensions from a crossterm `(columns, rows)` pair.
    ///
    /// A zero-sized answer (seen on some detached ptys) counts as unknown.
    pub fn from_cols_rows(cols: u16, rows: u16) -> Option<Self> {
        if cols == 0 || rows == 0 {
            return None;
        }
        Some(Self {
            height: rows,
            width: cols,
        })
    }
}

/// Query the controlling terminal's current size.
///
/// Falls back to 24x80 on any failure; never returns an error.
pub fn probe() -> TerminalDimensions {
    match crossterm::terminal::size() {
        Ok((cols, rows)) => TerminalDimensions::from_cols_rows(cols, rows).unwrap_or_else(|| {
            log::debug!("Terminal reported {}x{}, using default size", cols, rows);
            TerminalDimensions::default()
        }),
        Err(e) => {
            log::debug!("Terminal size unavailable ({}), using default size", e);
            TerminalDimensions::default()
        }
    }
}
