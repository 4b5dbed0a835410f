use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Env, Target};

use tty_countdown::cli::Args;
use tty_countdown::config::Config;
use tty_countdown::error::AppError;
use tty_countdown::font::GlyphFont;
use tty_countdown::input;
use tty_countdown::session;
use tty_countdown::settings::Settings;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Error: failed to open log file: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(args, &config);
    log::debug!("Settings: {:?}", settings);

    // Font problems are fatal before the terminal is touched
    let font = GlyphFont::load(&settings.font)?;
    log::info!("Loaded font from {}", settings.font);

    if let Err(e) = input::setup_ctrlc_handler() {
        log::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    let reason = session::run(&settings, font)?;
    log::info!("Session ended: {:?}", reason);
    Ok(())
}

/// Logs go to stderr by default; with `--log-file` they go to the file so the
/// full-screen display stays clean.
fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
        }
    }
    Ok(())
}
