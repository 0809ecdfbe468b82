//! Streaming responder
//!
//! Streams a response over the session stream one chunk at a time, framed by
//! `StreamStart`/`StreamEnd` messages. An interrupt can arrive from another
//! task at any point and ends the stream after the current chunk.
//!
//! The response itself is a placeholder echo; the framing and interrupt
//! semantics are the part frontends depend on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::stream::{SessionStream, StreamMessage};

/// Streams responses and honors interrupts between chunks
pub struct Runner {
    interrupted: AtomicBool,
    /// Pause between chunks, zero for no pacing
    chunk_delay: Duration,
}

impl Runner {
    /// Create a runner with the given chunk pacing
    pub fn new(chunk_delay: Duration) -> Self {
        Self {
            interrupted: AtomicBool::new(false),
            chunk_delay,
        }
    }

    /// Stream a response to `input` on the session stream
    ///
    /// Publishes `StreamStart`, then one `TextDelta` per chunk, then
    /// `StreamEnd`. When interrupted mid-stream the remaining chunks are
    /// dropped but `StreamEnd` is still published, so subscribers always see
    /// a closed frame. The interrupt flag resets when it fires.
    pub async fn respond(&self, input: &str, stream: &SessionStream) {
        let response = format!("Responding to {input}");

        stream.publish(StreamMessage::StreamStart);
        for chunk in response.chars() {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                tracing::debug!("response interrupted");
                break;
            }
            stream.publish(StreamMessage::TextDelta(chunk.to_string()));
            if !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }
        }
        stream.publish(StreamMessage::StreamEnd);
    }

    /// Interrupt the in-flight response, if any
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Reset the runner and announce the restart on the stream
    ///
    /// Clears a pending interrupt so the next response streams in full.
    pub fn restart(&self, stream: &SessionStream) {
        self.interrupted.store(false, Ordering::SeqCst);
        stream.publish(StreamMessage::notice("Restarting"));
    }
}

impl Default for Runner {
    /// Create a runner with no chunk pacing
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
