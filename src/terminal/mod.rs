//! Terminal management: size probing, cbreak mode and screen output.

#[cfg(unix)]
mod cbreak;
mod screen;
mod size;

#[cfg(unix)]
pub use cbreak::{current_mode, is_terminal, CbreakGuard, ModeSnapshot};
pub use screen::{compose, TerminalScreen};
pub use size::{probe, TerminalDimensions};
