//! Shared conversation session
//!
//! The service keeps one session for its whole lifetime: every request
//! appends a turn to the same history, so later prompts can reference
//! earlier lists ("now only phones under R$2000"). There is no per-client
//! isolation; callers share one conversation thread. The HTTP layer
//! serializes access with a mutex.

use crate::error::Result;
use crate::providers::{Message, Provider};
use std::sync::Arc;

/// Conversation session bound to a model provider
///
/// Owns the turn history and forwards it in full on every call. History
/// only grows; the session is never reset while the process runs.
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    history: Vec<Message>,
}

impl ChatSession {
    /// Creates a new session with an empty history
    ///
    /// # Arguments
    ///
    /// * `provider` - The model backend completing each turn
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            history: Vec::new(),
        }
    }

    /// Sends a prompt as the next turn and returns the model's reply text
    ///
    /// The user turn and the model's reply are both recorded in history.
    /// If the provider call fails the user turn is rolled back, so a
    /// failed request does not leave a dangling turn in the conversation.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The user's topic prompt
    ///
    /// # Errors
    ///
    /// Returns error if the provider call fails
    pub async fn send(&mut self, prompt: &str) -> Result<String> {
        self.history.push(Message::user(prompt));

        match self.provider.complete(&self.history).await {
            Ok(reply) => {
                self.history.push(Message::model(reply.clone()));
                tracing::debug!("Session now holds {} turns", self.history.len());
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    /// Returns the recorded conversation history, oldest first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Returns the number of recorded turns
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }
}
