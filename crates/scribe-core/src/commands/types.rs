//! Command invocation type definitions
//!
//! Hosts pass loosely structured argument values with every command
//! invocation. These types give that boundary an explicit shape: an
//! invocation is an ordered sequence of arguments, each of which may carry a
//! target path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A fixed intent tag identifying which backend or UI action a message requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Add a file to the code context
    #[serde(rename = "include")]
    Include,
    /// Remove a file from the code context
    #[serde(rename = "exclude")]
    Exclude,
    /// Reset the backend conversation
    #[serde(rename = "clear_conversation")]
    ClearConversation,
    /// Wipe the UI chat history
    #[serde(rename = "erase chat history")]
    EraseChatHistory,
}

impl Intent {
    /// The wire spelling of this intent, as matched by the receiving side
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::ClearConversation => "clear_conversation",
            // Spelled with spaces; the UI layer matches on this exact token.
            Self::EraseChatHistory => "erase chat history",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One host-supplied invocation argument
///
/// Hosts are free to pass arbitrary structured values; the router only ever
/// reads an optional `path` field out of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArgument {
    /// Target path carried by this argument, if any
    pub path: Option<PathBuf>,
}

impl CommandArgument {
    /// Create an argument carrying a path
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Create an empty argument
    pub fn empty() -> Self {
        Self { path: None }
    }

    /// Extract an argument from an arbitrary host value
    ///
    /// Reads the `"path"` string field if the value is an object that has
    /// one; anything else becomes an empty argument.
    pub fn from_json(value: &Value) -> Self {
        let path = value
            .get("path")
            .and_then(Value::as_str)
            .map(PathBuf::from);
        Self { path }
    }
}

/// An ordered sequence of arguments supplied with a single command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Arguments in host order
    pub arguments: Vec<CommandArgument>,
}

impl CommandInvocation {
    /// Create an invocation with no arguments
    pub fn empty() -> Self {
        Self {
            arguments: Vec::new(),
        }
    }

    /// Create an invocation from a list of arguments
    pub fn new(arguments: Vec<CommandArgument>) -> Self {
        Self { arguments }
    }

    /// Create an invocation carrying a single path argument
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            arguments: vec![CommandArgument::path(path)],
        }
    }

    /// Create an invocation from raw host values
    pub fn from_json_args(values: &[Value]) -> Self {
        Self {
            arguments: values.iter().map(CommandArgument::from_json).collect(),
        }
    }

    /// The path carried by the first argument, if any
    pub fn first_path(&self) -> Option<&Path> {
        self.arguments.first()?.path.as_deref()
    }

    /// Parse a slash-command line into a command name and an invocation
    ///
    /// Format: /command-name arg1 arg2 ...
    ///
    /// Each argument is treated as a path argument; quoting is respected so
    /// paths with spaces survive.
    pub fn parse(input: &str) -> Option<(String, Self)> {
        let input = input.trim();

        if !Self::is_slash_command(input) {
            return None;
        }

        let parts: Vec<&str> = input[1..].splitn(2, char::is_whitespace).collect();

        let command_name = parts.first()?.to_string();
        if command_name.is_empty() {
            return None;
        }

        let arguments = if parts.len() > 1 {
            let words = shell_words::split(parts[1])
                .unwrap_or_else(|_| parts[1].split_whitespace().map(String::from).collect());
            words.into_iter().map(CommandArgument::path).collect()
        } else {
            Vec::new()
        };

        Some((command_name, Self { arguments }))
    }

    /// Check if this looks like a slash command
    pub fn is_slash_command(input: &str) -> bool {
        let input = input.trim();
        input.starts_with('/')
            && input.len() > 1
            && input.chars().nth(1).is_some_and(|c| c.is_alphabetic())
    }
}
