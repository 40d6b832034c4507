//! Base provider trait and common types for Toplist
//!
//! This module defines the Provider trait the model backend implements,
//! along with the message type used for conversation history.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message structure for conversation
///
/// Represents a single turn in the conversation with the model.
/// Gemini's role vocabulary is `user` and `model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (user, model)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Arguments
    ///
    /// * `content` - The message content
    ///
    /// # Examples
    ///
    /// ```
    /// use toplist::providers::Message;
    ///
    /// let msg = Message::user("celulares mais vendidos");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new model message
    ///
    /// # Arguments
    ///
    /// * `content` - The message content
    ///
    /// # Examples
    ///
    /// ```
    /// use toplist::providers::Message;
    ///
    /// let msg = Message::model("{\"title\": \"Top 10\"}");
    /// assert_eq!(msg.role, "model");
    /// ```
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            content: content.into(),
        }
    }
}

/// Provider trait for generative model backends
///
/// The trait provides a common interface for completing a conversation
/// and returning the model's reply text. Implementations are expected to
/// carry their own fixed system instruction.
///
/// # Examples
///
/// ```
/// use toplist::providers::{Message, Provider};
/// use toplist::error::Result;
/// use async_trait::async_trait;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl Provider for MyProvider {
///     async fn complete(&self, _messages: &[Message]) -> Result<String> {
///         Ok("{}".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation with the given message history
    ///
    /// # Arguments
    ///
    /// * `messages` - Full conversation history, oldest first
    ///
    /// # Returns
    ///
    /// Returns the text of the model's reply
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response carries no text
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}
