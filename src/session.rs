//! Interactive countdown session.
//!
//! Wires the countdown, the terminal screen and the input loop together
//! inside a cbreak-mode scope. The terminal is restored on every exit path:
//! the guard's `Drop` covers errors and unwinding, the panic hook covers
//! panics on this thread, and SIGINT, SIGTERM and SIGHUP are turned into a
//! normal quit by the input loop.

use crate::error::AppError;
use crate::font::GlyphFont;
use crate::input::ExitReason;
use crate::settings::Settings;

/// Run one countdown session on the controlling terminal.
#[cfg(unix)]
pub fn run(settings: &Settings, font: GlyphFont) -> Result<ExitReason, AppError> {
    use std::sync::Arc;

    use crate::input::{self, FdKeys, INTERRUPTED};
    use crate::notify::{select_notifier, Notifier};
    use crate::terminal::{is_terminal, CbreakGuard, TerminalScreen};
    use crate::timer::Countdown;

    let fd = libc::STDIN_FILENO;
    if !is_terminal(fd) {
        return Err(AppError::NotATerminal);
    }

    let notifier: Arc<dyn Notifier> = Arc::from(select_notifier(settings.notify));
    let screen = TerminalScreen::stdout(Arc::new(font), settings.center);
    let countdown = Countdown::new(settings.total, settings.tick, screen, notifier);

    let mut guard = CbreakGuard::enter(fd)?;
    log::info!(
        "Starting {:?} countdown, tick {:?}",
        settings.total,
        settings.tick
    );
    countdown.start_pause();

    let outcome = input::run(
        &countdown,
        &mut FdKeys::stdin(),
        settings.poll_interval,
        &INTERRUPTED,
    );
    if outcome.is_err() {
        countdown.end();
    }

    let restored = guard.restore();
    let reason = outcome?;
    restored?;
    Ok(reason)
}

#[cfg(not(unix))]
pub fn run(_settings: &Settings, _font: GlyphFont) -> Result<ExitReason, AppError> {
    Err(AppError::Unsupported)
}
