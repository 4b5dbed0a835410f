//! Keyboard input loop.
//!
//! Polls for a key without blocking and dispatches it to the countdown. When
//! nothing is ready the loop sleeps for the poll interval; a zero interval
//! turns it into a pure busy-poll that only yields the thread, which is
//! the most responsive setting and costs a full core.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::timer::{Countdown, Screen};

/// Set by the signal handler; the input loop ends the session when it sees it.
pub static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Route SIGINT, SIGTERM and SIGHUP into [`INTERRUPTED`].
///
/// Can only be installed once per process.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        INTERRUPTED.store(true, Ordering::SeqCst);
    })
}

/// What a key press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    StartPause,
    Reset,
    Quit,
    Ignore,
}

/// Map a raw input byte to its action.
pub fn action_for(byte: u8) -> KeyAction {
    match byte {
        b' ' => KeyAction::StartPause,
        b'r' => KeyAction::Reset,
        b'q' => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Result of one non-blocking poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPoll {
    Key(u8),
    /// Nothing ready.
    Idle,
    /// Input reached end-of-file.
    Closed,
}

/// Source of single key bytes.
pub trait KeySource {
    /// Check for a key without waiting.
    fn poll_key(&mut self) -> io::Result<KeyPoll>;
}

/// Why the input loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Interrupted,
    InputClosed,
}

/// Run the input loop until quit, interrupt or end of input.
///
/// The countdown is ended on every one of those paths. I/O errors from the
/// key source are returned without ending it; the caller's cleanup does that.
pub fn run<S: Screen>(
    countdown: &Countdown<S>,
    keys: &mut impl KeySource,
    poll_interval: Duration,
    interrupted: &AtomicBool,
) -> io::Result<ExitReason> {
    loop {
        if interrupted.load(Ordering::SeqCst) {
            log::info!("Interrupted");
            countdown.end();
            return Ok(ExitReason::Interrupted);
        }

        match keys.poll_key()? {
            KeyPoll::Key(byte) => match action_for(byte) {
                KeyAction::StartPause => countdown.start_pause(),
                KeyAction::Reset => countdown.reset(),
                KeyAction::Quit => {
                    countdown.end();
                    return Ok(ExitReason::Quit);
                }
                KeyAction::Ignore => {}
            },
            KeyPoll::Idle => {
                if poll_interval.is_zero() {
                    thread::yield_now();
                } else {
                    thread::sleep(poll_interval);
                }
            }
            KeyPoll::Closed => {
                log::info!("Input closed");
                countdown.end();
                return Ok(ExitReason::InputClosed);
            }
        }
    }
}

/// Non-blocking single-byte reads from a file descriptor (stdin by default).
///
/// crossterm's event reader expects raw mode and never reports end-of-file,
/// so the descriptor is polled directly to stay in cbreak mode.
#[cfg(unix)]
pub struct FdKeys {
    fd: std::os::unix::io::RawFd,
}

#[cfg(unix)]
impl FdKeys {
    pub fn stdin() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }

    pub fn new(fd: std::os::unix::io::RawFd) -> Self {
        Self { fd }
    }
}

#[cfg(unix)]
impl KeySource for FdKeys {
    fn poll_key(&mut self) -> io::Result<KeyPoll> {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };

        let ready = unsafe { libc::poll(&mut pfd, 1, 0) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(KeyPoll::Idle);
            }
            return Err(err);
        }
        if ready == 0 {
            return Ok(KeyPoll::Idle);
        }

        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(KeyPoll::Key(byte)),
            0 => Ok(KeyPoll::Closed),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(KeyPoll::Idle),
                    _ => Err(err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_keys() {
        assert_eq!(action_for(b' '), KeyAction::StartPause);
        assert_eq!(action_for(b'r'), KeyAction::Reset);
        assert_eq!(action_for(b'q'), KeyAction::Quit);
        assert_eq!(action_for(b'Q'), KeyAction::Ignore);
        assert_eq!(action_for(b'x'), KeyAction::Ignore);
        assert_eq!(action_for(b'\n'), KeyAction::Ignore);
    }

    #[cfg(unix)]
    #[test]
    fn test_fd_keys_reads_pipe() {
        use std::io::Write;
        use std::os::unix::io::{AsRawFd, FromRawFd};

        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let mut writer = unsafe { std::fs::File::from_raw_fd(fds[1]) };
        let reader = unsafe { std::fs::File::from_raw_fd(fds[0]) };
        let mut keys = FdKeys::new(reader.as_raw_fd());

        assert_eq!(keys.poll_key().unwrap(), KeyPoll::Idle);

        writer.write_all(b" q").unwrap();
        assert_eq!(keys.poll_key().unwrap(), KeyPoll::Key(b' '));
        assert_eq!(keys.poll_key().unwrap(), KeyPoll::Key(b'q'));
        assert_eq!(keys.poll_key().unwrap(), KeyPoll::Idle);

        drop(writer);
        assert_eq!(keys.poll_key().unwrap(), KeyPoll::Closed);
    }
}
