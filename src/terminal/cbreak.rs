//! Cbreak terminal mode with guaranteed restoration.
//!
//! Cbreak turns off line buffering and echo so single keystrokes arrive
//! immediately, but leaves output processing and signal keys alone.

use std::io;
use std::os::unix::io::RawFd;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// Settings captured on entry, kept for the panic hook.
static SAVED_MODE: Mutex<Option<SavedMode>> = Mutex::new(None);

struct SavedMode {
    fd: RawFd,
    attrs: libc::termios,
    /// Thread that entered cbreak mode; only its panics restore the terminal.
    owner: ThreadId,
}

/// Take the saved mode if the calling thread is the one that entered cbreak.
fn take_saved_for_current_thread() -> Option<(RawFd, libc::termios)> {
    let mut saved = SAVED_MODE.lock().unwrap_or_else(PoisonError::into_inner);
    if saved.as_ref()?.owner != thread::current().id() {
        return None;
    }
    saved.take().map(|mode| (mode.fd, mode.attrs))
}

/// Comparable view of a terminal's mode flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSnapshot {
    pub input_flags: libc::tcflag_t,
    pub output_flags: libc::tcflag_t,
    pub control_flags: libc::tcflag_t,
    pub local_flags: libc::tcflag_t,
    pub control_chars: Vec<libc::cc_t>,
}

impl From<&libc::termios> for ModeSnapshot {
    fn from(t: &libc::termios) -> Self {
        Self {
            input_flags: t.c_iflag,
            output_flags: t.c_oflag,
            control_flags: t.c_cflag,
            local_flags: t.c_lflag,
            control_chars: t.c_cc.to_vec(),
        }
    }
}

/// Whether `fd` refers to a terminal.
pub fn is_terminal(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Read the current mode of the terminal behind `fd`.
pub fn current_mode(fd: RawFd) -> io::Result<ModeSnapshot> {
    get_attrs(fd).map(|t| ModeSnapshot::from(&t))
}

fn get_attrs(fd: RawFd) -> io::Result<libc::termios> {
    let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut attrs) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(attrs)
}

fn set_attrs(fd: RawFd, action: libc::c_int, attrs: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(fd, action, attrs) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Guard that keeps the terminal in cbreak mode until dropped.
pub struct CbreakGuard {
    fd: RawFd,
    original: libc::termios,
    active: bool,
}

impl CbreakGuard {
    /// Capture the current mode of `fd` and switch it to cbreak.
    ///
    /// # Errors
    /// Returns an error if `fd` is not a terminal or its mode can't be changed.
    pub fn enter(fd: RawFd) -> io::Result<Self> {
        let original = get_attrs(fd)?;

        install_panic_hook();
        *SAVED_MODE.lock().unwrap_or_else(PoisonError::into_inner) = Some(SavedMode {
            fd,
            attrs: original,
            owner: thread::current().id(),
        });

        let mut cbreak = original;
        cbreak.c_lflag &= !(libc::ICANON | libc::ECHO);
        cbreak.c_cc[libc::VMIN] = 1;
        cbreak.c_cc[libc::VTIME] = 0;

        if let Err(e) = set_attrs(fd, libc::TCSAFLUSH, &cbreak) {
            SAVED_MODE.lock().unwrap_or_else(PoisonError::into_inner).take();
            return Err(e);
        }
        log::debug!("Terminal on fd {} switched to cbreak mode", fd);

        Ok(Self {
            fd,
            original,
            active: true,
        })
    }

    /// Restore the captured mode now; dropping afterwards is a no-op.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            SAVED_MODE.lock().unwrap_or_else(PoisonError::into_inner).take();
            set_attrs(self.fd, libc::TCSADRAIN, &self.original)?;
            log::debug!("Terminal on fd {} restored", self.fd);
        }
        Ok(())
    }

    /// The mode captured on entry.
    pub fn original_mode(&self) -> ModeSnapshot {
        ModeSnapshot::from(&self.original)
    }
}

impl Drop for CbreakGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Install a panic hook that restores the saved terminal mode first, so the
/// panic message lands on a usable terminal.
///
/// Panics on other threads (the tick thread) leave the mode alone; the
/// session keeps reading keys in cbreak mode and restores on quit.
fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Some((fd, attrs)) = take_saved_for_current_thread() {
            let _ = set_attrs(fd, libc::TCSADRAIN, &attrs);
        }
        original_hook(panic_info);
    }));
}
