//! Scribe CLI application
//!
//! An interactive terminal frontend for the Scribe editor bridge: slash
//! commands manage the code context and conversation, plain text streams a
//! response.

mod args;
mod console;
mod repl;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

use scribe_core::{Config, ScribeResult};

use args::Cli;
use repl::Repl;

#[tokio::main]
async fn main() -> ScribeResult<()> {
    let cli = Cli::parse();

    let config = match &cli.config_file {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    init_logging(&config, cli.verbose)?;

    let cwd = match cli.working_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    tracing::debug!(cwd = %cwd.display(), "starting session");

    let mut repl = Repl::new(&config, cwd);
    match cli.prompt {
        Some(prompt) => {
            repl.run_once(&prompt).await;
            Ok(())
        }
        None => repl.run().await,
    }
}

/// Initialize the tracing subscriber from the logging configuration
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces debug.
/// Console output goes to stderr when `log_to_console` is on; `log_to_file`
/// appends to the configured log file.
fn init_logging(config: &Config, verbose: bool) -> ScribeResult<()> {
    let logging = &config.logging;
    let level = if verbose {
        "debug"
    } else {
        logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = match logging.effective_log_file() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            Some(Arc::new(file))
        }
        None => None,
    };

    let writer = match (logging.log_to_console, log_file) {
        (true, Some(file)) => BoxMakeWriter::new(std::io::stderr.and(file)),
        (true, None) => BoxMakeWriter::new(std::io::stderr),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (false, None) => BoxMakeWriter::new(std::io::sink),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);
    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.init(),
    }
    Ok(())
}
