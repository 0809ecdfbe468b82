//! Interactive session loop
//!
//! Owns the session, the router, and the runner. Slash commands go through
//! the command router onto the session stream; everything else is a prompt
//! for the runner. The session consumes its own stream traffic after every
//! dispatch, so commands apply in order without a background consumer racing
//! the prompt.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use scribe_core::{
    CodeContext, CommandInvocation, CommandRouter, Config, EditorContext, Runner, ScribeResult,
    Session, SessionStream, WebviewChannel,
};

use crate::console;

/// Pause between streamed response chunks
const CHUNK_DELAY: Duration = Duration::from_millis(15);

/// The interactive session and its collaborators
pub struct Repl {
    router: CommandRouter,
    session: Session,
    runner: Runner,
    stream: Arc<SessionStream>,
    intents: tokio::sync::broadcast::Receiver<scribe_core::StreamMessage>,
    cwd: PathBuf,
}

impl Repl {
    /// Build a session from configuration
    pub fn new(config: &Config, cwd: PathBuf) -> Self {
        let stream = Arc::new(SessionStream::new(config.stream_capacity));
        let webview = Arc::new(WebviewChannel::default());

        // Printer tasks mirror both channels to the terminal.
        tokio::spawn(console::print_stream(stream.subscribe()));
        tokio::spawn(console::print_stream(webview.subscribe()));

        let intents = stream.subscribe();
        let router = CommandRouter::new(stream.clone(), webview);
        let code_context =
            CodeContext::with_ignore_patterns(config.file_exclude_glob_list.iter().cloned());
        let session = Session::with_code_context(cwd.clone(), stream.clone(), code_context);

        Self {
            router,
            session,
            runner: Runner::new(CHUNK_DELAY),
            stream,
            intents,
            cwd,
        }
    }

    /// Run the interactive loop until EOF or `/quit`
    pub async fn run(&mut self) -> ScribeResult<()> {
        println!(
            "{} {}",
            "scribe".bold(),
            format!("session in {}", self.cwd.display()).dimmed()
        );

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            print!("{} ", ">".cyan());
            let _ = std::io::stdout().flush();

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line == "/quit" || line == "/exit" {
                break;
            }

            self.handle_line(&line).await;
        }

        Ok(())
    }

    /// Send one prompt and stream the response
    pub async fn run_once(&mut self, prompt: &str) {
        self.handle_line(prompt).await;
        // Let the printer task drain before the process exits.
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    async fn handle_line(&mut self, line: &str) {
        if let Some((name, invocation)) = CommandInvocation::parse(line) {
            self.dispatch_command(&name, &invocation);
        } else {
            self.session.conversation_mut().add_user(line);
            self.runner.respond(line, &self.stream).await;
        }
        self.apply_pending_intents();
    }

    fn dispatch_command(&mut self, name: &str, invocation: &CommandInvocation) {
        // The CLI has no active editor; paths must come from arguments.
        let editor = EditorContext::empty();

        match name {
            "include" => self.router.include(invocation, &editor),
            "exclude" => self.router.exclude(invocation, &editor),
            "clear" => self.router.clear_conversation(invocation),
            "erase-history" => self.router.erase_chat_history(),
            "context" => self.print_context(),
            "backup" => {
                if let Err(error) = self.session.backup_code_context() {
                    println!("{}", error.to_string().red());
                }
            }
            "restart" => self.runner.restart(&self.stream),
            other => {
                println!("{}", format!("Unknown command: /{other}").red());
            }
        }
    }

    fn print_context(&self) {
        if self.session.code_context().is_empty() {
            println!("{}", "Included files: None".yellow());
            return;
        }
        println!("{}", "Included files:".blue());
        print!("{}", self.session.code_context().display_tree(&self.cwd));
    }

    fn apply_pending_intents(&mut self) {
        use tokio::sync::broadcast::error::TryRecvError;

        loop {
            match self.intents.try_recv() {
                Ok(message) => self.session.handle_message(&message),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }
}
