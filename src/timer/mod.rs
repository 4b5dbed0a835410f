//! Countdown timer: state, transitions and the tick thread.

mod countdown;
mod state;

pub use countdown::{Countdown, Screen, TimerSnapshot};
pub use state::{format_clock, Status, TimerState, TimerView};
