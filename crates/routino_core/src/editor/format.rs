//! Rich-text formatting commands delegated to the host.
//!
//! The core never executes formatting itself; it validates the command and
//! hands it to a `FormattingCapability`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Formatting command offered by the toolbar and shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    UnorderedList,
    OrderedList,
    InsertImage(String),
    CreateLink(String),
}

impl FormatCommand {
    /// Maps Ctrl/Cmd shortcuts (`b`, `i`, `u`) to commands.
    pub fn from_shortcut(key: char, ctrl_or_meta: bool) -> Option<Self> {
        if !ctrl_or_meta {
            return None;
        }
        match key {
            'b' => Some(Self::Bold),
            'i' => Some(Self::Italic),
            'u' => Some(Self::Underline),
            _ => None,
        }
    }

    /// Stable command name understood by hosts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::UnorderedList => "insertUnorderedList",
            Self::OrderedList => "insertOrderedList",
            Self::InsertImage(_) => "insertImage",
            Self::CreateLink(_) => "createLink",
        }
    }

    /// Rejects link/image commands without a URL.
    pub fn validate(&self) -> Result<(), FormatError> {
        match self {
            Self::InsertImage(url) | Self::CreateLink(url) if url.trim().is_empty() => {
                Err(FormatError::EmptyUrl(self.name()))
            }
            _ => Ok(()),
        }
    }
}

/// Host capability that executes formatting commands.
pub trait FormattingCapability {
    fn apply(&mut self, command: &FormatCommand) -> Result<(), FormatError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Link/image command issued with a blank URL.
    EmptyUrl(&'static str),
    /// Host refused or failed to apply the command.
    Rejected(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl(command) => write!(f, "`{command}` requires a non-empty url"),
            Self::Rejected(message) => write!(f, "formatting rejected by host: {message}"),
        }
    }
}

impl Error for FormatError {}
