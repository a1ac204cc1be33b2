//! Assistant conversation: transcript plus the pending answer

use crate::error::{Result, SynapseError};
use crate::ops::{AnswerRequest, AssistantAnswer, OperationSlot, SlotCloser};
use std::sync::Arc;
use std::time::Duration;
use synapse_types::{ChatTranscript, Message};
use tracing::debug;

pub struct Conversation {
    transcript: ChatTranscript,
    answers: OperationSlot<String>,
    answerer: Arc<AssistantAnswer>,
}

impl Conversation {
    pub fn new(answer_delay: Duration) -> Self {
        Self {
            transcript: ChatTranscript::new(),
            answers: OperationSlot::new("assistant"),
            answerer: Arc::new(AssistantAnswer::new(answer_delay)),
        }
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// An answer is on its way
    pub fn is_loading(&self) -> bool {
        self.answers.is_running()
    }

    /// Post a user message and start the assistant's answer
    pub fn send(&mut self, text: &str) -> Result<()> {
        self.send_with_context(text, None)
    }

    /// Like [`send`](Self::send), passing file names found by a search along
    pub fn send_with_context(&mut self, text: &str, supporting: Option<Vec<String>>) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynapseError::ValidationRejected("Message is required".to_string()));
        }
        if self.is_loading() {
            return Err(SynapseError::AlreadyRunning("assistant".to_string()));
        }

        let request = AnswerRequest {
            prompt: text.to_string(),
            supporting,
        };
        self.answers.start(Arc::clone(&self.answerer), request)?;
        self.transcript.push(Message::user(text));
        debug!("Awaiting answer ({} messages)", self.transcript.len());
        Ok(())
    }

    /// Wait for the pending answer and append it.
    ///
    /// `None` when nothing was pending or the answer was discarded.
    pub async fn await_reply(&mut self) -> Option<Result<&Message>> {
        match self.answers.settle().await? {
            Ok(body) => Some(Ok(self.transcript.push(Message::assistant(body)))),
            Err(e) => Some(Err(e)),
        }
    }

    /// Abandon the pending answer; the transcript is kept
    pub fn close(&mut self) {
        self.answers.invalidate();
    }

    pub fn closer(&self) -> SlotCloser {
        self.answers.closer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_types::Role;

    fn conversation() -> Conversation {
        Conversation::new(Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_and_reply() {
        let mut chat = conversation();
        chat.send("  What is in Q4?  ").unwrap();
        assert!(chat.is_loading());
        assert_eq!(chat.transcript().len(), 1);

        let reply = chat.await_reply().await.unwrap().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.text.starts_with("I've analyzed your query: \"What is in Q4?\"."));
        assert!(!chat.is_loading());
        assert_eq!(chat.transcript().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_and_concurrent_sends_rejected() {
        let mut chat = conversation();
        assert!(matches!(chat.send("   "), Err(SynapseError::ValidationRejected(_))));
        assert!(chat.transcript().is_empty());

        chat.send("first").unwrap();
        assert!(matches!(chat.send("second"), Err(SynapseError::AlreadyRunning(_))));
        assert_eq!(chat.transcript().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_conversation_discards_answer() {
        let mut chat = conversation();
        chat.send("hello").unwrap();
        chat.close();

        assert!(chat.await_reply().await.is_none());
        assert_eq!(chat.transcript().len(), 1);

        // Input is accepted again once the old answer is abandoned
        chat.send("again").unwrap();
        assert!(chat.await_reply().await.is_some());
    }
}
