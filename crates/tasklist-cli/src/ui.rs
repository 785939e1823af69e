use std::io::{BufRead, IsTerminal, Write};
use std::sync::OnceLock;

use tasklist_client::notify::{Notification, NotificationKind, Notifier};

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub notifications: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stdout().is_terminal();
    let table_color = is_tty
        && flags.format == OutputFormat::Table
        && !flags.quiet
        && std::env::var_os("NO_COLOR").is_none();

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        table_color,
        notifications: !flags.quiet,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        notifications: true,
        term_width: None,
    })
}

/// Prints notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    #[must_use]
    pub fn from_prefs() -> Self {
        Self {
            enabled: prefs().notifications,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        if !self.enabled {
            return;
        }
        let marker = match notification.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Failure => "✗",
        };
        eprintln!("{marker} {notification}");
    }
}

/// Ask a yes/no question on stderr and read the answer from stdin.
///
/// Anything but `y`/`yes` (case-insensitive) is a no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
