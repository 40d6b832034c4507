//! Configuration management for Toplist
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, ToplistError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Toplist
///
/// This structure holds all configuration needed for the service,
/// including HTTP server settings, the model provider, and the
/// search enrichment backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Model provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Search enrichment configuration
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by the CORS layer
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Model provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for list generation
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key for the Generative Language API
    ///
    /// Usually supplied via the `GOOGLE_API_KEY` environment variable
    /// rather than the config file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Optional API base URL (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the `generateContent` endpoint,
    /// which allows tests to point the provider at a mock server.
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: None,
            api_base: None,
        }
    }
}

/// Search enrichment configuration
///
/// Credentials for the Google Custom Search JSON API. When either
/// credential is absent the service starts without enrichment and
/// returns listings unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API key for the Custom Search API
    #[serde(default)]
    pub api_key: Option<String>,

    /// Programmable Search Engine identifier (the `cx` parameter)
    #[serde(default)]
    pub cse_id: Option<String>,

    /// Optional API base URL (useful for tests and local mocks)
    #[serde(default)]
    pub api_base: Option<String>,

    /// Number of image results requested per item (1-10)
    #[serde(default = "default_image_results")]
    pub image_results: u8,
}

fn default_image_results() -> u8 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cse_id: None,
            api_base: None,
            image_results: default_image_results(),
        }
    }
}

impl Config {
    /// Load configuration from a file with environment and CLI overrides
    ///
    /// Loads the YAML file at `path` if it exists, otherwise starts from
    /// defaults. Environment variables are applied on top of the file
    /// values, and CLI arguments are applied last.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line arguments
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Load configuration from a YAML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or contains invalid YAML
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ToplistError::Config(format!("Failed to read {}: {}", path, e)))?;
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| ToplistError::Config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// `GOOGLE_API_KEY` feeds both the model provider and the search
    /// client, matching how the hosting environment provisions a single
    /// Google Cloud key for both APIs.
    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("GOOGLE_API_KEY") {
            if !api_key.is_empty() {
                self.provider.gemini.api_key = Some(api_key.clone());
                self.search.api_key = Some(api_key);
            }
        }

        if let Ok(cse_id) = std::env::var("GOOGLE_CSE_ID") {
            if !cse_id.is_empty() {
                self.search.cse_id = Some(cse_id);
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        if let Ok(model) = std::env::var("TOPLIST_GEMINI_MODEL") {
            if !model.is_empty() {
                self.provider.gemini.model = model;
            }
        }

        if let Ok(origins) = std::env::var("TOPLIST_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                self.server.allowed_origins = origins;
            }
        }
    }

    /// Apply CLI argument overrides
    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    /// Validate the configuration
    ///
    /// The model API key is required since the service cannot answer any
    /// request without it. Search credentials are intentionally optional;
    /// their absence disables enrichment rather than startup.
    ///
    /// # Errors
    ///
    /// Returns error if a required value is missing or out of range
    pub fn validate(&self) -> Result<()> {
        if self.provider.gemini.model.is_empty() {
            return Err(ToplistError::Config("Gemini model must not be empty".to_string()).into());
        }

        if self
            .provider
            .gemini
            .api_key
            .as_deref()
            .map_or(true, str::is_empty)
        {
            return Err(ToplistError::Config(
                "Gemini API key is required (set GOOGLE_API_KEY or provider.gemini.api_key)"
                    .to_string(),
            )
            .into());
        }

        if self.search.image_results == 0 || self.search.image_results > 10 {
            return Err(ToplistError::Config(format!(
                "search.image_results must be between 1 and 10, got {}",
                self.search.image_results
            ))
            .into());
        }

        if self.server.allowed_origins.is_empty() {
            return Err(
                ToplistError::Config("At least one allowed origin is required".to_string()).into(),
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
            search: SearchConfig::default(),
        }
    }
}
