//! Host editor context
//!
//! The host supplies the currently active document explicitly with every
//! command invocation instead of exposing it as ambient global state.

use std::path::{Path, PathBuf};

/// A snapshot of the host editor state at invocation time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorContext {
    /// The file backing the currently active editor, if any
    active_document: Option<PathBuf>,
}

impl EditorContext {
    /// Create an empty context (no active editor)
    pub fn empty() -> Self {
        Self {
            active_document: None,
        }
    }

    /// Create a context with an active document
    pub fn with_active_document(path: impl Into<PathBuf>) -> Self {
        Self {
            active_document: Some(path.into()),
        }
    }

    /// The active document's backing file, if any
    pub fn active_document(&self) -> Option<&Path> {
        self.active_document.as_deref()
    }
}
