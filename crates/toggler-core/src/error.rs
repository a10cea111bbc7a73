//! Error kinds surfaced to the user.
//!
//! Every toggle detects and validates before editing, so an `Err` from a toggle means the
//! buffer was left untouched. The one exception is [`ToggleError::Warning`], which never
//! aborts a toggle: it rides along in [`ToggleOutcome::warnings`](crate::ToggleOutcome) when a
//! language had to fall back or the formatter could not run.

use thiserror::Error;

/// Errors produced by toggle commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("{0}")]
    /// Invalid user action or configuration (cursor not in a word, bad setting, ...).
    User(String),

    #[error("{0}")]
    /// Non-fatal. The edit still happens.
    Warning(String),

    #[error("{0}")]
    /// Anything else. Terminal for the current invocation.
    Unexpected(String),
}

impl ToggleError {
    /// Shorthand for [`ToggleError::User`].
    pub fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }

    /// Shorthand for [`ToggleError::Warning`].
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning(message.into())
    }

    /// Shorthand for [`ToggleError::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Convert into the message a host should display.
    pub fn notification(&self) -> Notification {
        match self {
            Self::User(message) => Notification {
                severity: Severity::Error,
                message: message.clone(),
            },
            Self::Warning(message) => Notification {
                severity: Severity::Warning,
                message: message.clone(),
            },
            Self::Unexpected(message) => Notification {
                severity: Severity::Error,
                message: format!("Unexpected error: {message}"),
            },
        }
    }
}

impl From<regex::Error> for ToggleError {
    fn from(err: regex::Error) -> Self {
        Self::Unexpected(format!("regex compile error: {err}"))
    }
}

impl From<onig::Error> for ToggleError {
    fn from(err: onig::Error) -> Self {
        Self::Unexpected(format!("regex compile error: {err}"))
    }
}

/// How loudly a host should present a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error-level message.
    Error,
    /// Warning-level message.
    Warning,
}

/// A user-facing message produced from a [`ToggleError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message severity.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

/// Result alias used throughout the crate.
pub type ToggleResult<T> = Result<T, ToggleError>;

/// Messages shared by several toggle families.
pub(crate) mod messages {
    pub const CURSOR_NOT_IN_WORD: &str = "Cursor must be located within a word!";
    pub const MULTI_LINE_SELECTION: &str =
        "Cannot process multi-line selection! However, multi-line cursors are supported.";
    pub const MUST_SELECT_TEXT: &str = "Must select a section of text!";
    pub const NO_SELECTIONS: &str = "No selections found!";
}
