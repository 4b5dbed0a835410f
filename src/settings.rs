//! Runtime settings resolved once at startup from flags and the config file.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;
use crate::config::Config;
use crate::font::FontSource;

/// Session length used when no time is requested.
pub const DEFAULT_MINUTES: u64 = 25;

/// Default tick interval.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Default sleep between key polls.
pub const DEFAULT_POLL_MS: u64 = 10;

/// Accepted tick intervals; matches the `--tick-ms` flag.
pub const TICK_MS_RANGE: RangeInclusive<u64> = 1..=60_000;

/// Accepted poll sleeps; matches the `--poll-ms` flag.
pub const POLL_MS_RANGE: RangeInclusive<u64> = 0..=1000;

/// File name looked up next to the executable.
pub const FONT_FILE_NAME: &str = "font.txt";

/// Everything a countdown session needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub total: Duration,
    pub tick: Duration,
    pub poll_interval: Duration,
    pub font: FontSource,
    pub center: bool,
    pub notify: bool,
}

impl Settings {
    /// Merge flags over the config file over built-in defaults.
    pub fn resolve(args: &Args, config: &Config) -> Self {
        let minutes = args.minutes.or(config.timer.minutes).unwrap_or(0);
        let seconds = args.seconds.or(config.timer.seconds).unwrap_or(0);
        let mut total_secs = minutes.saturating_mul(60).saturating_add(seconds);
        if total_secs == 0 {
            total_secs = DEFAULT_MINUTES * 60;
        }

        let tick_ms = args
            .tick_ms
            .or_else(|| {
                config
                    .timer
                    .tick_ms
                    .map(|ms| clamp_config("timer.tick_ms", ms, TICK_MS_RANGE))
            })
            .unwrap_or(DEFAULT_TICK_MS);
        let poll_ms = args
            .poll_ms
            .or_else(|| {
                config
                    .input
                    .poll_ms
                    .map(|ms| clamp_config("input.poll_ms", ms, POLL_MS_RANGE))
            })
            .unwrap_or(DEFAULT_POLL_MS);

        let font = match args.font.clone().or_else(|| config.display.font.clone()) {
            Some(path) => FontSource::Path(path),
            None => default_font_source(),
        };

        Self {
            total: Duration::from_secs(total_secs),
            tick: Duration::from_millis(tick_ms),
            poll_interval: Duration::from_millis(poll_ms),
            font,
            center: config.display.center && !args.nocenter,
            notify: config.notification.enabled && !args.disable_notification,
        }
    }
}

/// Clamp a config value into the range its command-line flag accepts.
fn clamp_config(key: &str, value: u64, range: RangeInclusive<u64>) -> u64 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        log::warn!(
            "Config {} = {} is outside {}..={}, using {}",
            key,
            value,
            range.start(),
            range.end(),
            clamped
        );
    }
    clamped
}

/// `font.txt` beside the executable if present, else the bundled font.
pub fn default_font_source() -> FontSource {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| font_beside(&exe))
        .map(FontSource::Path)
        .unwrap_or(FontSource::Bundled)
}

fn font_beside(exe: &Path) -> Option<PathBuf> {
    let candidate = exe.parent()?.join(FONT_FILE_NAME);
    candidate.is_file().then_some(candidate)
}
