//! Feedback messages shown after a mutation.

use serde::{Deserialize, Serialize};

/// Fallback text when the server rejects a request without a usable detail.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Text shown when a signup request fails before a reply is read.
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";

/// Text shown when a removal request fails before a reply is read.
pub const REMOVAL_FAILED: &str = "Failed to remove participant. Please try again.";

/// Text shown in place of the list when loading activities fails.
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

/// Severity of a feedback message, doubling as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Returns the CSS class name for this severity.
    pub fn as_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// The state of the message area as it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageView {
    /// The last message shown, if any.
    pub message: Option<Message>,
    /// Whether the area is hidden.
    pub hidden: bool,
}

impl MessageView {
    /// An area that has never shown anything.
    pub fn empty() -> Self {
        Self {
            message: None,
            hidden: true,
        }
    }

    /// Returns the message if the area is currently visible.
    pub fn visible(&self) -> Option<&Message> {
        if self.hidden {
            None
        } else {
            self.message.as_ref()
        }
    }

    /// Returns the CSS class list of the area.
    pub fn class_list(&self) -> String {
        let mut classes = Vec::with_capacity(2);
        if let Some(ref message) = self.message {
            classes.push(message.severity.as_class());
        }
        if self.hidden {
            classes.push("hidden");
        }
        classes.join(" ")
    }
}
