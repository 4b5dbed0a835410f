//! Countdown controller shared by the tick thread and the input loop.
//!
//! All state lives behind one mutex together with the screen, so a redraw
//! always shows a consistent snapshot and frames never interleave. The tick
//! thread waits on a condvar between ticks; pause and end wake it early.

use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::state::{Status, TimerState, TimerView};
use crate::notify::{Notifier, NOTIFICATION_MESSAGE, NOTIFICATION_TITLE};

/// Destination for redraws.
pub trait Screen: Send + 'static {
    fn draw(&mut self, view: &TimerView) -> io::Result<()>;
}

/// Copy of the timer state for callers outside the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub remaining_ms: i64,
    pub running: bool,
    pub status: Status,
    /// Whether a tick thread is currently assigned.
    pub ticking: bool,
}

struct Inner<S> {
    timer: TimerState,
    screen: S,
    /// Bumped whenever the current tick thread is superseded.
    epoch: u64,
    /// Epoch of the live tick thread, if any.
    ticker: Option<u64>,
}

impl<S: Screen> Inner<S> {
    fn redraw(&mut self) {
        let view = self.timer.view();
        if let Err(e) = self.screen.draw(&view) {
            log::warn!("Redraw failed: {}", e);
        }
    }

    /// Retire the current tick thread; it exits on its next wake-up.
    fn retire_ticker(&mut self) {
        self.epoch += 1;
        self.ticker = None;
    }
}

struct Shared<S> {
    inner: Mutex<Inner<S>>,
    wake: Condvar,
}

impl<S> Shared<S> {
    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The timer state machine.
pub struct Countdown<S> {
    shared: Arc<Shared<S>>,
    tick: Duration,
    notifier: Arc<dyn Notifier>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<S: Screen> Countdown<S> {
    /// Create an idle countdown of `total`, ticking every `tick`.
    pub fn new(total: Duration, tick: Duration, screen: S, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    timer: TimerState::new(total),
                    screen,
                    epoch: 0,
                    ticker: None,
                }),
                wake: Condvar::new(),
            }),
            tick,
            notifier,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        let inner = self.shared.lock();
        TimerSnapshot {
            remaining_ms: inner.timer.remaining_ms(),
            running: inner.timer.is_running(),
            status: inner.timer.status(),
            ticking: inner.ticker.is_some(),
        }
    }

    /// Toggle between running and paused.
    ///
    /// Starting spawns a tick thread unless one is already live. Pausing
    /// redraws once so the paused frame shows up without waiting for a tick.
    /// Finished and aborted timers ignore this.
    pub fn start_pause(&self) {
        let mut inner = self.shared.lock();
        self.toggle_locked(&mut inner);
    }

    fn toggle_locked(&self, inner: &mut Inner<S>) {
        if inner.timer.resume() {
            log::debug!("Countdown running");
            self.spawn_ticker(inner);
        } else if inner.timer.pause() {
            log::debug!("Countdown paused at {}ms", inner.timer.remaining_ms());
            inner.retire_ticker();
            self.shared.wake.notify_all();
            inner.redraw();
        }
    }

    /// Restore the full duration.
    ///
    /// A running timer redraws right away; a paused, idle or finished one
    /// starts again. Aborted timers stay aborted.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        if inner.timer.status() == Status::Aborted {
            return;
        }
        inner.timer.rewind();
        log::debug!("Countdown reset to {:?}", inner.timer.total());
        if inner.timer.is_running() {
            inner.redraw();
        } else {
            self.toggle_locked(&mut inner);
        }
    }

    /// Abort the countdown, draw the farewell frame and wait for the tick
    /// thread to exit.
    pub fn end(&self) {
        {
            let mut inner = self.shared.lock();
            inner.timer.abort();
            inner.retire_ticker();
            self.shared.wake.notify_all();
            inner.redraw();
        }
        log::debug!("Countdown ended");
        self.wait();
    }

    /// Block until every tick thread spawned so far has exited.
    pub fn wait(&self) {
        let handles = {
            let mut guard = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        for handle in handles {
            if handle.join().is_err() {
                log::error!("Tick thread panicked");
            }
        }
    }

    fn spawn_ticker(&self, inner: &mut Inner<S>) {
        if inner.ticker.is_some() {
            return;
        }

        inner.epoch += 1;
        let epoch = inner.epoch;
        let shared = Arc::clone(&self.shared);
        let notifier = Arc::clone(&self.notifier);
        let tick = self.tick;

        let spawned = thread::Builder::new()
            .name("countdown-tick".to_string())
            .spawn(move || run_ticker(shared, epoch, tick, notifier));

        match spawned {
            Ok(handle) => {
                inner.ticker = Some(epoch);
                let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
                handles.retain(|h| !h.is_finished());
                handles.push(handle);
            }
            Err(e) => {
                log::error!("Failed to spawn tick thread: {}", e);
                inner.timer.pause();
                inner.redraw();
            }
        }
    }
}

/// Tick loop: draw, wait one tick, count down. Exits when its epoch is
/// retired or the countdown finishes.
fn run_ticker<S: Screen>(
    shared: Arc<Shared<S>>,
    epoch: u64,
    tick: Duration,
    notifier: Arc<dyn Notifier>,
) {
    log::debug!("Tick thread {} started", epoch);
    let mut inner = shared.lock();

    loop {
        if inner.epoch != epoch {
            log::debug!("Tick thread {} retired", epoch);
            return;
        }
        inner.redraw();

        inner = shared
            .wake
            .wait_timeout_while(inner, tick, |i| i.epoch == epoch)
            .map(|(guard, _)| guard)
            .unwrap_or_else(|e| e.into_inner().0);

        if inner.epoch != epoch {
            log::debug!("Tick thread {} retired", epoch);
            return;
        }

        if inner.timer.advance(tick) {
            inner.ticker = None;
            inner.redraw();
            drop(inner);
            log::info!("Countdown finished");

            if let Err(e) = notifier.notify(NOTIFICATION_TITLE, NOTIFICATION_MESSAGE) {
                log::warn!("Notification via {} failed: {}", notifier.name(), e);
            }
            return;
        }
    }
}

impl<S> Drop for Countdown<S> {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        inner.epoch += 1;
        inner.ticker = None;
        self.shared.wake.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<TimerView>>>);

    impl Screen for Recorder {
        fn draw(&mut self, view: &TimerView) -> io::Result<()> {
            self.0.lock().unwrap().push(view.clone());
            Ok(())
        }
    }

    fn countdown(total_ms: u64, tick_ms: u64) -> (Countdown<Recorder>, Recorder) {
        let recorder = Recorder::default();
        let countdown = Countdown::new(
            Duration::from_millis(total_ms),
            Duration::from_millis(tick_ms),
            recorder.clone(),
            Arc::new(NoopNotifier),
        );
        (countdown, recorder)
    }

    #[test]
    fn test_new_countdown_is_idle_without_ticker() {
        let (countdown, recorder) = countdown(1000, 100);
        let snap = countdown.snapshot();
        assert_eq!(snap.status, Status::Idle);
        assert!(!snap.running);
        assert!(!snap.ticking);
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_finished_start_pause_is_ignored() {
        let (countdown, _) = countdown(50, 10);
        countdown.start_pause();
        countdown.wait();
        assert_eq!(countdown.snapshot().status, Status::Finished);

        countdown.start_pause();
        let snap = countdown.snapshot();
        assert_eq!(snap.status, Status::Finished);
        assert!(!snap.ticking);
    }

    #[test]
    fn test_end_draws_farewell() {
        let (countdown, recorder) = countdown(10_000, 1000);
        countdown.start_pause();
        countdown.end();

        let views = recorder.0.lock().unwrap();
        let last = views.last().unwrap();
        assert_eq!(last.status, Status::Aborted);
        assert_eq!(last.instructions, "Bye!");
        assert!(!countdown.snapshot().ticking);
    }

    #[test]
    fn test_reset_after_end_is_ignored() {
        let (countdown, _) = countdown(10_000, 1000);
        countdown.end();
        countdown.reset();
        assert_eq!(countdown.snapshot().status, Status::Aborted);
    }
}
