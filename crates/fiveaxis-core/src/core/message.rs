//! Progress messages
//!
//! Messages carry a severity and a local timestamp. [`TracingReporter`]
//! forwards them into the `tracing` pipeline for headless use.

use super::Reporter;
use chrono::{DateTime, Local};
use std::fmt;

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageLevel {
    /// Normal progress
    Info,
    /// Degraded result, calibration continues
    Warning,
    /// Rejected request
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single progress message
#[derive(Debug, Clone)]
pub struct Message {
    /// Severity
    pub level: MessageLevel,
    /// Human-readable text
    pub text: String,
    /// When the message was created
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Create a message stamped with the current local time
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    /// Informational message
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    /// Warning message
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    /// Error message
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.level,
            self.text
        )
    }
}

/// Reporter that writes every message to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, message: Message) {
        match message.level {
            MessageLevel::Info => tracing::info!("{}", message.text),
            MessageLevel::Warning => tracing::warn!("{}", message.text),
            MessageLevel::Error => tracing::error!("{}", message.text),
        }
    }
}
