//! Console output for stream messages

use colored::Colorize;
use std::io::Write;

use scribe_core::{Intent, StreamMessage};

/// Format one stream message for the terminal
///
/// Returns `None` for messages the console has nothing to show for.
pub fn format_message(message: &StreamMessage) -> Option<String> {
    match message {
        StreamMessage::Intent { intent, target } => {
            let target = target
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            Some(
                format!("[{} {}]", intent.as_str(), target)
                    .dimmed()
                    .to_string(),
            )
        }
        StreamMessage::Notice(text) => Some(text.yellow().to_string()),
        // Response text is printed inline by the delta printer.
        StreamMessage::StreamStart | StreamMessage::TextDelta(_) | StreamMessage::StreamEnd => {
            None
        }
    }
}

/// Print a streamed response chunk without a trailing newline
pub fn print_delta(chunk: &str) {
    print!("{}", chunk.green());
    let _ = std::io::stdout().flush();
}

/// Print the session-stream message traffic as it arrives
pub async fn print_stream(
    mut receiver: tokio::sync::broadcast::Receiver<StreamMessage>,
) {
    while let Ok(message) = receiver.recv().await {
        match &message {
            StreamMessage::TextDelta(chunk) => print_delta(chunk),
            StreamMessage::StreamEnd => println!(),
            // Intents are applied by the session loop; only surface the
            // UI-facing ones.
            StreamMessage::Intent {
                intent: Intent::EraseChatHistory,
                ..
            } => println!("{}", "Chat history erased".yellow()),
            other => {
                if let Some(line) = format_message(other) {
                    println!("{line}");
                }
            }
        }
    }
}
