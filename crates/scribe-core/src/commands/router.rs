//! Command router
//!
//! Resolves a target path from command arguments or the host editor context,
//! then forwards one of the fixed intents to the session stream or the UI
//! notification channel.
//!
//! The router is stateless between calls: each operation is a one-shot
//! transformation from invocation to outbound message. It exposes no failure
//! path of its own; an invocation that resolves no target is a silent no-op,
//! and delivery problems belong to the channels it sends into.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::editor::EditorContext;
use crate::stream::{StreamChannel, UiNotifier};

use super::types::{CommandInvocation, Intent};

/// Routes fixed command intents to the session stream and the UI channel
pub struct CommandRouter {
    /// Outbound backend channel
    channel: Arc<dyn StreamChannel>,
    /// UI notification channel
    notifier: Arc<dyn UiNotifier>,
}

impl CommandRouter {
    /// Create a new command router
    pub fn new(channel: Arc<dyn StreamChannel>, notifier: Arc<dyn UiNotifier>) -> Self {
        Self { channel, notifier }
    }

    /// Resolve the target path for an invocation
    ///
    /// The first argument's path wins if present; otherwise the active
    /// document from the editor context is used. Absence is a valid, silent
    /// outcome, never an error.
    pub fn resolve_path(
        invocation: &CommandInvocation,
        editor: &EditorContext,
    ) -> Option<PathBuf> {
        invocation
            .first_path()
            .or_else(|| editor.active_document())
            .map(Path::to_path_buf)
    }

    /// Send `include` for the resolved path
    ///
    /// Does nothing when no path resolves.
    pub fn include(&self, invocation: &CommandInvocation, editor: &EditorContext) {
        self.send_with_target(Intent::Include, invocation, editor);
    }

    /// Send `exclude` for the resolved path
    ///
    /// Does nothing when no path resolves.
    pub fn exclude(&self, invocation: &CommandInvocation, editor: &EditorContext) {
        self.send_with_target(Intent::Exclude, invocation, editor);
    }

    /// Send `clear_conversation`, ignoring all arguments
    pub fn clear_conversation(&self, _invocation: &CommandInvocation) {
        tracing::debug!(intent = %Intent::ClearConversation, "dispatching command");
        self.channel
            .send_stream_message(None, Intent::ClearConversation);
    }

    /// Send `erase chat history` through the UI channel, ignoring all arguments
    pub fn erase_chat_history(&self) {
        tracing::debug!(intent = %Intent::EraseChatHistory, "dispatching command");
        self.notifier.send_message(None, Intent::EraseChatHistory);
    }

    fn send_with_target(
        &self,
        intent: Intent,
        invocation: &CommandInvocation,
        editor: &EditorContext,
    ) {
        match Self::resolve_path(invocation, editor) {
            Some(path) => {
                tracing::debug!(intent = %intent, path = %path.display(), "dispatching command");
                self.channel.send_stream_message(Some(&path), intent);
            }
            None => {
                tracing::debug!(intent = %intent, "no target resolved, skipping dispatch");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::types::CommandArgument;
    use std::sync::Mutex;

    /// Records every send for later assertions
    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<(Option<PathBuf>, Intent)>>,
    }

    impl RecordingChannel {
        fn sent(&self) -> Vec<(Option<PathBuf>, Intent)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl StreamChannel for RecordingChannel {
        fn send_stream_message(&self, target: Option<&Path>, intent: Intent) {
            self.sent
                .lock()
                .unwrap()
                .push((target.map(Path::to_path_buf), intent));
        }
    }

    impl UiNotifier for RecordingChannel {
        fn send_message(&self, target: Option<&Path>, intent: Intent) {
            self.sent
                .lock()
                .unwrap()
                .push((target.map(Path::to_path_buf), intent));
        }
    }

    fn router_with_recorders() -> (CommandRouter, Arc<RecordingChannel>, Arc<RecordingChannel>) {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = Arc::new(RecordingChannel::default());
        let router = CommandRouter::new(channel.clone(), notifier.clone());
        (router, channel, notifier)
    }

    #[test]
    fn test_resolve_path_prefers_argument() {
        let invocation = CommandInvocation::with_path("/a/b.py");
        let editor = EditorContext::with_active_document("/ignored.rs");

        let resolved = CommandRouter::resolve_path(&invocation, &editor);
        assert_eq!(resolved, Some(PathBuf::from("/a/b.py")));
    }

    #[test]
    fn test_resolve_path_falls_back_to_editor() {
        let invocation = CommandInvocation::empty();
        let editor = EditorContext::with_active_document("/active.rs");

        let resolved = CommandRouter::resolve_path(&invocation, &editor);
        assert_eq!(resolved, Some(PathBuf::from("/active.rs")));
    }

    #[test]
    fn test_resolve_path_empty_argument_falls_back() {
        let invocation = CommandInvocation::new(vec![CommandArgument::empty()]);
        let editor = EditorContext::with_active_document("/active.rs");

        let resolved = CommandRouter::resolve_path(&invocation, &editor);
        assert_eq!(resolved, Some(PathBuf::from("/active.rs")));
    }

    #[test]
    fn test_resolve_path_absent() {
        let invocation = CommandInvocation::empty();
        let editor = EditorContext::empty();

        assert_eq!(CommandRouter::resolve_path(&invocation, &editor), None);
    }

    #[test]
    fn test_include_sends_resolved_path() {
        let (router, channel, notifier) = router_with_recorders();

        router.include(
            &CommandInvocation::with_path("/a/b.py"),
            &EditorContext::empty(),
        );

        assert_eq!(
            channel.sent(),
            vec![(Some(PathBuf::from("/a/b.py")), Intent::Include)]
        );
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_include_without_target_sends_nothing() {
        let (router, channel, notifier) = router_with_recorders();

        router.include(&CommandInvocation::empty(), &EditorContext::empty());

        assert!(channel.sent().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_exclude_sends_resolved_path() {
        let (router, channel, _) = router_with_recorders();

        router.exclude(
            &CommandInvocation::empty(),
            &EditorContext::with_active_document("/active.rs"),
        );

        assert_eq!(
            channel.sent(),
            vec![(Some(PathBuf::from("/active.rs")), Intent::Exclude)]
        );
    }

    #[test]
    fn test_clear_conversation_ignores_arguments() {
        let (router, channel, _) = router_with_recorders();

        router.clear_conversation(&CommandInvocation::with_path("/ignored.rs"));

        assert_eq!(channel.sent(), vec![(None, Intent::ClearConversation)]);
    }

    #[test]
    fn test_erase_chat_history_uses_notifier_only() {
        let (router, channel, notifier) = router_with_recorders();

        router.erase_chat_history();

        assert!(channel.sent().is_empty());
        assert_eq!(notifier.sent(), vec![(None, Intent::EraseChatHistory)]);
    }
}
