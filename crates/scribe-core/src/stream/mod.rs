//! Session stream and UI notification channels
//!
//! This module provides the broadcast-based channels that connect the command
//! router, the session, the runner, and any number of frontends. Publishers
//! never block and never fail; a message published with no subscribers is
//! simply dropped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use crate::commands::Intent;

/// A message on the session stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamMessage {
    /// A dispatched command intent
    Intent {
        intent: Intent,
        target: Option<PathBuf>,
    },

    /// Start of a streamed response
    StreamStart,

    /// One chunk of streamed response text
    TextDelta(String),

    /// End of a streamed response
    StreamEnd,

    /// Informational text for the frontend
    Notice(String),
}

impl StreamMessage {
    /// Create an intent message
    pub fn intent(intent: Intent, target: Option<&Path>) -> Self {
        Self::Intent {
            intent,
            target: target.map(Path::to_path_buf),
        }
    }

    /// Create a notice message
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }

    /// Get the message type name
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Intent { .. } => "intent",
            Self::StreamStart => "stream_start",
            Self::TextDelta(_) => "text_delta",
            Self::StreamEnd => "stream_end",
            Self::Notice(_) => "notice",
        }
    }
}

/// An outbound backend channel accepting (target, intent) pairs
pub trait StreamChannel: Send + Sync {
    /// Send an intent to the backend session, fire-and-forget
    fn send_stream_message(&self, target: Option<&Path>, intent: Intent);
}

/// A UI notification channel accepting (target, intent) pairs
pub trait UiNotifier: Send + Sync {
    /// Send an intent to the frontend, fire-and-forget
    fn send_message(&self, target: Option<&Path>, intent: Intent);
}

/// Broadcast channel carrying the session's message traffic
///
/// Each subscriber receives a copy of every published message. Messages
/// published before subscribing are not received.
#[derive(Debug)]
pub struct SessionStream {
    sender: broadcast::Sender<StreamMessage>,
    capacity: usize,
}

impl SessionStream {
    /// Create a new session stream with the specified capacity
    ///
    /// The capacity determines how many messages can be buffered before
    /// slow subscribers start losing messages.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Publish a message to all subscribers
    ///
    /// Returns the number of active receivers that will receive this
    /// message, 0 if there are none.
    pub fn publish(&self, message: StreamMessage) -> usize {
        self.sender.send(message).unwrap_or(0)
    }

    /// Subscribe to the stream
    pub fn subscribe(&self) -> broadcast::Receiver<StreamMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SessionStream {
    /// Create a default stream with capacity of 256 messages
    fn default() -> Self {
        Self::new(256)
    }
}

impl Clone for SessionStream {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            capacity: self.capacity,
        }
    }
}

impl StreamChannel for SessionStream {
    fn send_stream_message(&self, target: Option<&Path>, intent: Intent) {
        self.publish(StreamMessage::intent(intent, target));
    }
}

/// Broadcast channel carrying notifications to the webview frontend
///
/// Same shape as [`SessionStream`], kept separate so UI-only traffic never
/// reaches the backend session.
#[derive(Debug)]
pub struct WebviewChannel {
    sender: broadcast::Sender<StreamMessage>,
}

impl WebviewChannel {
    /// Create a new webview channel with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a message to all subscribers
    pub fn publish(&self, message: StreamMessage) -> usize {
        self.sender.send(message).unwrap_or(0)
    }

    /// Subscribe to the channel
    pub fn subscribe(&self) -> broadcast::Receiver<StreamMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for WebviewChannel {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Clone for WebviewChannel {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl UiNotifier for WebviewChannel {
    fn send_message(&self, target: Option<&Path>, intent: Intent) {
        self.publish(StreamMessage::intent(intent, target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stream_basic() {
        let stream = SessionStream::new(16);
        let mut subscriber = stream.subscribe();

        let sent = stream.publish(StreamMessage::notice("hello"));
        assert_eq!(sent, 1);

        let message = subscriber.recv().await.unwrap();
        assert_eq!(message, StreamMessage::Notice("hello".into()));
    }

    #[tokio::test]
    async fn test_stream_no_subscribers() {
        let stream = SessionStream::new(16);
        assert_eq!(stream.publish(StreamMessage::StreamStart), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let stream = SessionStream::new(16);
        let mut sub1 = stream.subscribe();
        let mut sub2 = stream.subscribe();

        stream.publish(StreamMessage::StreamEnd);

        assert_eq!(sub1.recv().await.unwrap(), StreamMessage::StreamEnd);
        assert_eq!(sub2.recv().await.unwrap(), StreamMessage::StreamEnd);
    }

    #[tokio::test]
    async fn test_send_stream_message() {
        let stream = SessionStream::new(16);
        let mut subscriber = stream.subscribe();

        stream.send_stream_message(Some(Path::new("/a/b.py")), Intent::Include);

        match subscriber.recv().await.unwrap() {
            StreamMessage::Intent { intent, target } => {
                assert_eq!(intent, Intent::Include);
                assert_eq!(target, Some(PathBuf::from("/a/b.py")));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_webview_channel_send_message() {
        let channel = WebviewChannel::default();
        let mut subscriber = channel.subscribe();

        channel.send_message(None, Intent::EraseChatHistory);

        match subscriber.recv().await.unwrap() {
            StreamMessage::Intent { intent, target } => {
                assert_eq!(intent, Intent::EraseChatHistory);
                assert_eq!(target, None);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clone_shares_channel() {
        let stream = SessionStream::new(16);
        let clone = stream.clone();
        let mut subscriber = stream.subscribe();

        clone.publish(StreamMessage::StreamStart);
        assert_eq!(subscriber.recv().await.unwrap(), StreamMessage::StreamStart);
    }

    #[test]
    fn test_message_type_names() {
        assert_eq!(
            StreamMessage::intent(Intent::Exclude, None).message_type(),
            "intent"
        );
        assert_eq!(StreamMessage::StreamStart.message_type(), "stream_start");
        assert_eq!(
            StreamMessage::TextDelta("x".into()).message_type(),
            "text_delta"
        );
        assert_eq!(StreamMessage::StreamEnd.message_type(), "stream_end");
        assert_eq!(StreamMessage::notice("n").message_type(), "notice");
    }

    #[test]
    fn test_subscriber_count() {
        let stream = SessionStream::default();
        assert_eq!(stream.subscriber_count(), 0);
        let _sub = stream.subscribe();
        assert_eq!(stream.subscriber_count(), 1);
    }
}
