//! Operator-facing progress log.
//!
//! A process-wide logger renders leveled entries to stderr (stdout is kept
//! free for `--json` reports). Subscribers receive a copy of every entry,
//! which is how tests observe the counts a run reports.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Terminal rendering.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes entries to stderr and fans them out to subscribers.
pub struct Logger {
    quiet: AtomicBool,
    subscribers: Mutex<Vec<Sender<LogEntry>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Suppress Info and Success entries on stderr. Subscribers still get them.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn log(&self, entry: LogEntry) {
        let quiet = self.quiet.load(Ordering::Relaxed);
        if !quiet || matches!(entry.level, LogLevel::Warning | LogLevel::Error) {
            eprintln!("{}", entry.render());
        }

        // Disconnected receivers are pruned on the next send
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(entry.clone()).is_ok());
        }
    }

    /// Receive every entry logged from now on. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<LogEntry> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes() {
        assert_eq!(LogEntry::info("hello").render(), "    hello");
        assert_eq!(LogEntry::success("done").render(), "   ✓ done");
        assert_eq!(
            LogEntry::error("bad").with_indent(1).render(),
            "      ❌ bad"
        );
    }

    #[test]
    fn test_subscriber_receives_entries() {
        let logger = Logger::new();
        logger.set_quiet(true);
        let rx = logger.subscribe();

        logger.log(LogEntry::info("one"));
        logger.log(LogEntry::warning("two"));

        let got: Vec<LogEntry> = rx.try_iter().collect();
        assert_eq!(got, vec![LogEntry::info("one"), LogEntry::warning("two")]);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let logger = Logger::new();
        drop(logger.subscribe());
        logger.log(LogEntry::info("x"));
        assert!(logger.subscribers.lock().unwrap().is_empty());
    }
}
