//! Command routing
//!
//! This module is the entry point for user-triggered commands. A host (an
//! editor extension or the interactive CLI) hands the router a
//! [`CommandInvocation`]; the router resolves the target path and forwards a
//! fixed [`Intent`] to the session stream or the UI notification channel.

pub mod router;
pub mod types;

pub use router::CommandRouter;
pub use types::{CommandArgument, CommandInvocation, Intent};
