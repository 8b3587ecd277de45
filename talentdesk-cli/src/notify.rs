//! Non-blocking user notifications (the dashboard's toasts)

use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

pub trait Notifier: Debug + Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints confirmations to stdout and errors to stderr
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    pub ansi: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            severity,
            title,
            description,
        } = notification;

        match (severity, self.ansi) {
            (Severity::Info, true) => println!("\x1b[32m✔ {title}\x1b[0m: {description}"),
            (Severity::Info, false) => println!("✔ {title}: {description}"),
            (Severity::Error, true) => eprintln!("\x1b[31m✘ {title}\x1b[0m: {description}"),
            (Severity::Error, false) => eprintln!("✘ {title}: {description}"),
        }
    }
}
