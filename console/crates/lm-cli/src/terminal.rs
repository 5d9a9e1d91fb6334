use crate::{Navigator, Notifier, Route};

use std::io::{BufRead, Write};

use log::debug;

/// Notices on stderr, confirmations on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        eprintln!("ok: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{} [y/N] ", prompt);
        if std::io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// A one-shot command has no views to switch; only a trip to the login
/// view is worth telling the operator about.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        match route {
            Route::Login => {
                eprintln!("Not signed in. Run `lm login --email <email> --password <password>`.")
            }
            other => debug!("Navigate to {}", other.as_str()),
        }
    }
}
