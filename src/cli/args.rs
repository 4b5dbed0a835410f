//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

/// Countdown timer with big block digits, centered in your terminal
#[derive(Parser, Debug)]
#[command(name = "tty-countdown")]
#[command(version, about = "Fancy countdown timer for the terminal", long_about = None)]
#[command(after_help = "KEYS (while running):
    space  Start / pause / resume
    r      Reset to the full duration
    q      Quit

If the requested time is zero, a 25-minute session is started.")]
pub struct Args {
    /// Number of minutes
    #[arg(short, long)]
    pub minutes: Option<u64>,

    /// Number of seconds
    #[arg(short, long)]
    pub seconds: Option<u64>,

    /// Custom font file (default: font.txt next to the executable, or the built-in font)
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Do not center the timer (more efficient)
    #[arg(short, long)]
    pub nocenter: bool,

    /// Do not show a desktop notification when the timer finishes
    #[arg(short, long)]
    pub disable_notification: bool,

    /// Tick interval in milliseconds (e.g. 200 for a smoother countdown)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=60_000))]
    pub tick_ms: Option<u64>,

    /// Sleep between key polls in milliseconds (0 = busy-poll)
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=1000))]
    pub poll_ms: Option<u64>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
