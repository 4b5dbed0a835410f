//! Desktop notification when a countdown completes.
//!
//! The notifier is picked once at startup: a command-line notifier when the
//! platform tool is on `PATH`, otherwise a no-op.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Title of the completion notification.
pub const NOTIFICATION_TITLE: &str = "tty-countdown";

/// Body of the completion notification.
pub const NOTIFICATION_MESSAGE: &str = "Time's up!";

/// Errors from sending a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' exited with code {code:?}")]
    Failed { program: String, code: Option<i32> },
}

/// Something that can show a desktop notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Notifier that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _title: &str, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Notifier backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: PathBuf,
    style: CommandStyle,
}

/// How title and message are passed to the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStyle {
    /// `notify-send <title> <message>`
    NotifySend,
    /// `osascript -e 'display notification ...'`
    AppleScript,
}

impl CommandNotifier {
    pub fn new(program: impl Into<PathBuf>, style: CommandStyle) -> Self {
        Self {
            program: program.into(),
            style,
        }
    }

    /// Arguments for one notification.
    pub fn args(&self, title: &str, message: &str) -> Vec<String> {
        match self.style {
            CommandStyle::NotifySend => vec![title.to_string(), message.to_string()],
            CommandStyle::AppleScript => vec![
                "-e".to_string(),
                format!(
                    "display notification \"{}\" with title \"{}\"",
                    applescript_escape(message),
                    applescript_escape(title)
                ),
            ],
        }
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let program = self.program.display().to_string();
        let status = Command::new(&self.program)
            .args(self.args(title, message))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NotifyError::Spawn {
                program: program.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(NotifyError::Failed {
                program,
                code: status.code(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("command")
    }
}

fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Pick the notifier for this platform.
pub fn select_notifier(enabled: bool) -> Box<dyn Notifier> {
    if !enabled {
        log::info!("Desktop notification disabled");
        return Box::new(NoopNotifier);
    }

    let (tool, style) = if cfg!(target_os = "macos") {
        ("osascript", CommandStyle::AppleScript)
    } else {
        ("notify-send", CommandStyle::NotifySend)
    };

    match std::env::var_os("PATH").and_then(|path| find_in_path(tool, &path)) {
        Some(program) => {
            log::info!("Desktop notification via {}", program.display());
            Box::new(CommandNotifier::new(program, style))
        }
        None => {
            log::info!("'{}' not found on PATH, desktop notification disabled", tool);
            Box::new(NoopNotifier)
        }
    }
}

/// Find an executable file named `program` in a `PATH`-style list.
pub fn find_in_path(program: &str, path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
