//! Backend session
//!
//! A session owns the code context and the conversation, and applies the
//! intents dispatched by the command router. Outcomes worth showing to the
//! user go out on the session stream as notices.

pub mod backup;
pub mod conversation;

pub use backup::BackupManager;
pub use conversation::{Conversation, ConversationMessage, MessageRole};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::commands::Intent;
use crate::context::CodeContext;
use crate::error::ScribeResult;
use crate::stream::{SessionStream, StreamMessage};

/// A backend session: code context plus conversation state
pub struct Session {
    /// Session ID
    id: Uuid,
    /// Working directory relative paths resolve against
    cwd: PathBuf,
    /// Included files
    code_context: CodeContext,
    /// Conversation history
    conversation: Conversation,
    /// Outbound stream for notices
    stream: Arc<SessionStream>,
}

impl Session {
    /// Create a new session rooted at `cwd`
    pub fn new(cwd: impl Into<PathBuf>, stream: Arc<SessionStream>) -> Self {
        Self {
            id: Uuid::new_v4(),
            cwd: cwd.into(),
            code_context: CodeContext::new(),
            conversation: Conversation::new(),
            stream,
        }
    }

    /// Create a session with a preconfigured code context
    pub fn with_code_context(
        cwd: impl Into<PathBuf>,
        stream: Arc<SessionStream>,
        code_context: CodeContext,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cwd: cwd.into(),
            code_context,
            conversation: Conversation::new(),
            stream,
        }
    }

    /// Session ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Working directory
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The session's code context
    pub fn code_context(&self) -> &CodeContext {
        &self.code_context
    }

    /// The session's conversation
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Mutable access to the conversation
    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    /// Apply one dispatched intent
    ///
    /// Include and exclude without a target are silent no-ops; the router
    /// normally never sends them that way, but hosts talk to the stream
    /// directly too. `EraseChatHistory` belongs to the UI layer and is
    /// ignored here.
    pub fn apply(&mut self, intent: Intent, target: Option<&Path>) {
        match intent {
            Intent::Include => {
                if let Some(path) = target {
                    self.apply_include(path);
                }
            }
            Intent::Exclude => {
                if let Some(path) = target {
                    self.apply_exclude(path);
                }
            }
            Intent::ClearConversation => {
                self.conversation.clear();
                self.notify("Conversation cleared");
            }
            Intent::EraseChatHistory => {
                tracing::debug!(session = %self.id, "ignoring UI-layer intent");
            }
        }
    }

    /// Consume an incoming stream message, applying intents and ignoring the rest
    pub fn handle_message(&mut self, message: &StreamMessage) {
        match message {
            StreamMessage::Intent { intent, target } => self.apply(*intent, target.as_deref()),
            other => {
                tracing::trace!(kind = other.message_type(), "ignoring non-intent message");
            }
        }
    }

    fn apply_include(&mut self, path: &Path) {
        let cwd = self.cwd.clone();
        match self.code_context.include(path, &cwd) {
            Ok(included) if included.is_empty() => {
                self.notify(format!("No files matched {}", path.display()));
            }
            Ok(included) => {
                self.notify(format!("Included {} file(s)", included.len()));
            }
            Err(error) => {
                tracing::warn!(session = %self.id, %error, "include failed");
                self.notify(error.to_string());
            }
        }
    }

    fn apply_exclude(&mut self, path: &Path) {
        let cwd = self.cwd.clone();
        match self.code_context.exclude(path, &cwd) {
            Ok(excluded) => {
                self.notify(format!("Excluded {} file(s)", excluded.len()));
            }
            Err(error) => {
                tracing::warn!(session = %self.id, %error, "exclude failed");
                self.notify(error.to_string());
            }
        }
    }

    /// Back up the included files before they are modified
    ///
    /// Mirrors every file in the code context into the workspace backup
    /// directory and reports the count as a notice.
    pub fn backup_code_context(&self) -> ScribeResult<Vec<PathBuf>> {
        let manager = BackupManager::for_workspace(&self.cwd);
        let created = manager.backup_files(&self.code_context, &self.cwd)?;
        self.notify(format!("Backed up {} file(s)", created.len()));
        Ok(created)
    }

    fn notify(&self, text: impl Into<String>) {
        self.stream.publish(StreamMessage::notice(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn session_in_temp_workspace() -> (TempDir, Session, Arc<SessionStream>) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();
        let stream = Arc::new(SessionStream::new(16));
        let session = Session::new(dir.path(), stream.clone());
        (dir, session, stream)
    }

    #[test]
    fn test_apply_include_and_exclude() {
        let (dir, mut session, _stream) = session_in_temp_workspace();

        session.apply(Intent::Include, Some(Path::new("a.rs")));
        assert!(session.code_context().contains(&dir.path().join("a.rs")));

        session.apply(Intent::Exclude, Some(Path::new("a.rs")));
        assert!(session.code_context().is_empty());
    }

    #[test]
    fn test_apply_include_without_target_is_noop() {
        let (_dir, mut session, stream) = session_in_temp_workspace();
        let mut subscriber = stream.subscribe();

        session.apply(Intent::Include, None);

        assert!(session.code_context().is_empty());
        assert!(subscriber.try_recv().is_err());
    }

    #[test]
    fn test_apply_clear_conversation() {
        let (_dir, mut session, stream) = session_in_temp_workspace();
        let mut subscriber = stream.subscribe();

        session.conversation_mut().add_user("hello");
        session.apply(Intent::ClearConversation, None);

        assert!(session.conversation().is_empty());
        assert_eq!(
            subscriber.try_recv().unwrap(),
            StreamMessage::Notice("Conversation cleared".into())
        );
    }

    #[test]
    fn test_apply_erase_chat_history_is_ignored() {
        let (_dir, mut session, stream) = session_in_temp_workspace();
        let mut subscriber = stream.subscribe();

        session.conversation_mut().add_user("hello");
        session.apply(Intent::EraseChatHistory, None);

        assert_eq!(session.conversation().len(), 1);
        assert!(subscriber.try_recv().is_err());
    }

    #[test]
    fn test_include_failure_sends_notice() {
        let (_dir, mut session, stream) = session_in_temp_workspace();
        let mut subscriber = stream.subscribe();

        session.apply(Intent::Include, Some(Path::new("missing.rs")));

        match subscriber.try_recv().unwrap() {
            StreamMessage::Notice(text) => assert!(text.contains("missing.rs")),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_backup_code_context() {
        let (dir, mut session, stream) = session_in_temp_workspace();
        let mut subscriber = stream.subscribe();

        session.apply(Intent::Include, Some(Path::new("a.rs")));
        let _ = subscriber.try_recv();

        let created = session.backup_code_context().unwrap();
        assert_eq!(created.len(), 1);
        assert!(dir
            .path()
            .join(backup::DEFAULT_BACKUP_DIR)
            .join("a.rs.backup")
            .is_file());
        assert_eq!(
            subscriber.try_recv().unwrap(),
            StreamMessage::Notice("Backed up 1 file(s)".into())
        );
    }

    #[test]
    fn test_handle_message_applies_intents_only() {
        let (dir, mut session, _stream) = session_in_temp_workspace();

        session.handle_message(&StreamMessage::TextDelta("x".into()));
        assert!(session.code_context().is_empty());

        session.handle_message(&StreamMessage::Intent {
            intent: Intent::Include,
            target: Some(PathBuf::from("a.rs")),
        });
        assert!(session.code_context().contains(&dir.path().join("a.rs")));
    }
}
