//! Gemini provider implementation for Toplist
//!
//! This module implements the Provider trait against the Generative
//! Language REST API (`models/{model}:generateContent`). The full session
//! history is sent on every call together with the fixed curator system
//! instruction, so conversational context lives entirely client-side.

use crate::config::GeminiConfig;
use crate::error::{Result, ToplistError};
use crate::providers::{Message, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base for the Generative Language API
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini API provider
///
/// Connects to the Generative Language API to generate list responses.
/// The system instruction is fixed at construction time and repeated on
/// every request.
///
/// # Examples
///
/// ```
/// use toplist::config::GeminiConfig;
/// use toplist::providers::GeminiProvider;
///
/// let config = GeminiConfig {
///     model: "gemini-2.0-flash".to_string(),
///     api_key: Some("test-key".to_string()),
///     api_base: None,
/// };
/// let provider = GeminiProvider::new(config, "You are a list curator.");
/// assert!(provider.is_ok());
/// ```
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
    system_instruction: String,
}

/// Request structure for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

/// One content block (a conversation turn or the system instruction)
#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// Text part of a content block
#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Response structure from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration containing model, key and base URL
    /// * `system_instruction` - Persona/ruleset sent with every request
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or HTTP client
    /// initialization fails
    pub fn new(config: GeminiConfig, system_instruction: impl Into<String>) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ToplistError::MissingCredentials("GOOGLE_API_KEY".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("toplist/0.1.0")
            .build()
            .map_err(|e| ToplistError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = config
            .api_base
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        tracing::info!(
            "Initialized Gemini provider: model={}, api_base={}",
            config.model,
            api_base
        );

        Ok(Self {
            client,
            api_key,
            model: config.model,
            api_base,
            system_instruction: system_instruction.into(),
        })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the generateContent endpoint URL (without the key parameter)
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Convert session history to the wire format
    fn convert_messages(&self, messages: &[Message]) -> Vec<Content> {
        messages
            .iter()
            .map(|m| Content {
                role: m.role.clone(),
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            })
            .collect()
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let request = GenerateContentRequest {
            contents: self.convert_messages(messages),
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![Part {
                    text: self.system_instruction.clone(),
                }],
            }),
        };

        tracing::debug!(
            "Sending Gemini request: model={}, {} turns",
            self.model,
            request.contents.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                ToplistError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(ToplistError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            ToplistError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_reply_text(parsed)
    }
}

/// Pull the first text part out of the first candidate
///
/// A response with no candidates or no text parts is a provider error;
/// the caller has nothing to parse in that case.
fn extract_reply_text(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            ToplistError::Provider("Gemini returned no text in the response candidates".to_string())
                .into()
        })
}
