//! Scribe Core Library
//!
//! This crate provides the core functionality for the Scribe editor bridge,
//! including command routing, session streaming, code context management,
//! and configuration.

pub mod commands;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod runner;
pub mod session;
pub mod stream;

// Re-export commonly used types
pub use commands::{CommandArgument, CommandInvocation, CommandRouter, Intent};
pub use config::{Config, LoggingConfig};
pub use context::{CodeContext, CodeFeature};
pub use editor::EditorContext;
pub use error::{ScribeError, ScribeResult};
pub use runner::Runner;
pub use session::{BackupManager, Conversation, ConversationMessage, MessageRole, Session};
pub use stream::{SessionStream, StreamChannel, StreamMessage, UiNotifier, WebviewChannel};
