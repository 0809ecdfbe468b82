//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe - editor-to-agent bridge with an interactive session")]
#[command(
    long_about = r#"Scribe - editor-to-agent bridge with an interactive session

USAGE:
  scribe                         # Start an interactive session
  scribe "your prompt"           # Send one prompt and exit

SESSION COMMANDS:
  /include <path>                # Add a file, directory, glob, or interval to the context
  /exclude <path>                # Remove from the context
  /context                       # Show the included files
  /backup                        # Back up the included files
  /clear                         # Clear the conversation
  /restart                       # Reset the responder
  /quit                          # Exit

For detailed help: scribe --help"#
)]
#[command(version)]
pub struct Cli {
    /// Prompt to send (omit for an interactive session)
    pub prompt: Option<String>,

    /// Working directory for the session
    #[arg(long)]
    pub working_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}
