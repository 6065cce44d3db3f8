//! User-facing notifications
//!
//! Every operation ends in exactly one [`Notice`]. Front ends implement
//! [`Notifier`] to display them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::command::Outcome;
use crate::session::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Dialog title for this severity
    pub fn title(self) -> &'static str {
        match self {
            Severity::Info => "Success",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn from_error(err: &SessionError) -> Self {
        Self {
            severity: err.severity(),
            message: err.to_string(),
        }
    }

    pub fn from_result(result: &Result<Outcome, SessionError>) -> Self {
        match result {
            Ok(outcome) => Notice::info(outcome.message()),
            Err(err) => Notice::from_error(err),
        }
    }

    pub fn title(&self) -> &'static str {
        self.severity.title()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title(), self.message)
    }
}

/// Display surface for notices
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Collects notices in order
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}
