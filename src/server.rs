//! HTTP server for the list API
//!
//! Exposes a liveness route and the chat route that drives the whole
//! pipeline: session turn, listing parse, enrichment, double-encoded
//! response. The shared session sits behind a mutex so concurrent
//! requests take their conversation turns one at a time instead of
//! interleaving on the shared history.

use crate::config::Config;
use crate::enrich::enrich_items;
use crate::error::{Result, ToplistError};
use crate::listing::parse_listing;
use crate::prompts::CURATOR_INSTRUCTION;
use crate::providers::GeminiProvider;
use crate::search::{GoogleSearchClient, SearchClient};
use crate::session::ChatSession;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
pub struct AppState {
    /// The single process-wide conversation session
    pub session: Mutex<ChatSession>,
    /// Search backend; `None` disables enrichment entirely
    pub search: Option<Arc<dyn SearchClient>>,
    /// Image candidates requested per item
    pub image_results: u8,
}

/// Request body for the chat route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text topic prompt
    pub prompt: String,
}

/// Response body for the chat route
///
/// `response` carries the enriched listing as a JSON-encoded string,
/// so the payload is double-encoded on the wire. The frontend consumes
/// it that way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response body for the liveness route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub message: String,
}

/// Build application state from configuration
///
/// The model provider is required; a failure to construct the search
/// client only logs a warning and disables enrichment, because an
/// unenriched listing is still a valid response.
pub fn build_state(config: &Config) -> Result<AppState> {
    let provider = GeminiProvider::new(config.provider.gemini.clone(), CURATOR_INSTRUCTION)?;
    let session = ChatSession::new(Arc::new(provider));

    let search: Option<Arc<dyn SearchClient>> =
        match GoogleSearchClient::new(config.search.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!("Search client unavailable, enrichment disabled: {}", e);
                None
            }
        };

    Ok(AppState {
        session: Mutex::new(session),
        search,
        image_results: config.search.image_results,
    })
}

/// Build the router with CORS and tracing layers
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `allowed_origins` - Exact origins allowed by the CORS layer
///
/// # Errors
///
/// Returns error if an allowed origin is not a valid header value
pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                ToplistError::Config(format!("Invalid allowed origin {}: {}", origin, e))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    let state = Arc::new(build_state(&config)?);
    let app = router(state, &config.server.allowed_origins)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ToplistError::Server(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ToplistError::Server(format!("Server error: {}", e)))?;
    Ok(())
}

/// Liveness route
async fn root() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Toplist API is running!".to_string(),
    })
}

/// Chat route: one conversation turn plus enrichment
///
/// The session lock is held across the model call, so conversation
/// turns from concurrent callers are strictly ordered. Enrichment runs
/// outside the lock; it only touches the per-request listing value.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatResponse>, (StatusCode, String)> {
    tracing::info!("Processing prompt: {}", request.prompt);

    let reply = {
        let mut session = state.session.lock().await;
        session.send(&request.prompt).await.map_err(|e| {
            tracing::error!("Model call failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
    };

    let mut listing = parse_listing(&reply).map_err(|e| {
        tracing::error!("Failed to parse model reply: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    match listing.get_mut("items").and_then(Value::as_array_mut) {
        Some(items) => match &state.search {
            Some(search) => enrich_items(search.as_ref(), items, state.image_results).await,
            None => tracing::debug!("No search client configured, skipping enrichment"),
        },
        None => tracing::debug!("Model reply has no items array, skipping enrichment"),
    }

    let encoded = serde_json::to_string(&listing).map_err(|e| {
        tracing::error!("Failed to serialize listing: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(ChatResponse { response: encoded }))
}
