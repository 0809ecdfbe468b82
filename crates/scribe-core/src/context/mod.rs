//! Code context management
//!
//! Tracks which files (or line intervals of files) the user has pulled into
//! the working context, and resolves the path arguments that get there:
//! plain files, interval paths like `src/lib.rs:1-40`, directories, and glob
//! patterns.

pub mod code_context;
pub mod interval;
pub mod paths;

pub use code_context::{CodeContext, CodeFeature};
pub use interval::{parse_intervals, Interval};
