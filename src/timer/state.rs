//! Timer state and its transitions.

use std::time::Duration;

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
    Aborted,
}

impl Status {
    /// Status line shown under the clock.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "Initialize...",
            Status::Running => "Working...",
            Status::Paused => "Paused...",
            Status::Finished => "Finished!",
            Status::Aborted => "Aborted!",
        }
    }

    /// Key help shown under the status line.
    pub fn instructions(&self) -> &'static str {
        match self {
            Status::Idle => "space: start, q: quit, r: reset",
            Status::Running => "space: pause, q: quit, r: reset",
            Status::Paused => "space: resume, q: quit, r: reset",
            Status::Finished => "q: quit, r: reset",
            Status::Aborted => "Bye!",
        }
    }
}

/// What a redraw shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerView {
    /// Remaining whole seconds, clamped at zero.
    pub remaining_secs: u64,
    pub status: Status,
    pub instructions: &'static str,
}

impl TimerView {
    /// `MM:SS`, minutes zero-padded to two digits but otherwise unbounded.
    pub fn clock_text(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Format seconds as `MM:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Countdown state.
///
/// `remaining_ms` can dip below zero on the last tick; readers see it clamped.
/// `status`, `running` and `instructions` always change together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    total: Duration,
    remaining_ms: i64,
    running: bool,
    status: Status,
    instructions: &'static str,
}

impl TimerState {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining_ms: duration_ms(total),
            running: false,
            status: Status::Idle,
            instructions: Status::Idle.instructions(),
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Raw remaining time in milliseconds, possibly slightly negative.
    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    /// Remaining whole seconds for display, never negative.
    pub fn display_secs(&self) -> u64 {
        (self.remaining_ms.max(0) / 1000) as u64
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn view(&self) -> TimerView {
        TimerView {
            remaining_secs: self.display_secs(),
            status: self.status,
            instructions: self.instructions,
        }
    }

    fn set_status(&mut self, status: Status) {
        self.running = status == Status::Running;
        self.status = status;
        self.instructions = status.instructions();
    }

    /// Idle/Paused -> Running. Returns false if the transition doesn't apply.
    pub fn resume(&mut self) -> bool {
        match self.status {
            Status::Idle | Status::Paused => {
                self.set_status(Status::Running);
                true
            }
            _ => false,
        }
    }

    /// Running -> Paused. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.set_status(Status::Paused);
        true
    }

    /// Restore the full duration. A stopped timer goes back to Idle so the
    /// caller can start it again; a running one keeps running.
    pub fn rewind(&mut self) {
        self.remaining_ms = duration_ms(self.total);
        if !self.running {
            self.set_status(Status::Idle);
        }
    }

    /// Any state -> Aborted.
    pub fn abort(&mut self) {
        self.set_status(Status::Aborted);
    }

    /// Count down by one tick; Running -> Finished once zero is reached.
    ///
    /// Returns true when this tick finished the countdown.
    pub fn advance(&mut self, tick: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_ms -= duration_ms(tick);
        if self.remaining_ms <= 0 {
            self.set_status(Status::Finished);
            return true;
        }
        false
    }
}

fn duration_ms(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}
