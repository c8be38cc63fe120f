//! HTTP surface and the request dispatcher.
//!
//! A single `POST /summarize` route: a URL input runs the summarize path and
//! replaces the session context, anything else is answered as a follow-up
//! from the cached summary. Upstream failures never leak detail to the
//! client; they are logged and mapped to an opaque 500.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::llm::LlmClient;
use crate::session::SessionState;
use crate::{agent, classify, followup, scraper, topic};

/// Shared state behind every request
pub struct AppState {
    config: Config,
    llm: LlmClient,
    http: reqwest::Client,
    session: Mutex<SessionState>,
}

impl AppState {
    /// Assemble state from pre-built collaborators (test isolation hook)
    pub fn new(config: Config, llm: LlmClient, http: reqwest::Client) -> Self {
        Self {
            config,
            llm,
            http,
            session: Mutex::new(SessionState::new()),
        }
    }

    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let llm = LlmClient::from_config(&config)?;
        let http = scraper::build_client(&config.fetch.user_agent)?;
        Ok(Self::new(config, llm, http))
    }

    // Lock scopes never span an await; a poisoned lock only means another
    // request panicked mid-mutation, so the state is still usable.
    fn lock_session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Build the application router from configuration
pub fn app(config: Config) -> anyhow::Result<Router> {
    let state = Arc::new(AppState::from_config(config)?);
    Ok(router(state))
}

/// Build the router over existing shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summarize", post(summarize_or_answer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub main_topic: String,
}

#[derive(Debug, Serialize)]
pub struct FollowupResponse {
    pub question: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
}

impl ErrorResponse {
    fn bad_request(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// The single entry point: summarize a URL or answer a follow-up question
async fn summarize_or_answer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputRequest>,
) -> Result<Response, ErrorResponse> {
    let input = request.input.trim().to_string();

    // 1) URL -> summarize (replaces the session context)
    if let Some(url) = classify::find_url(&input) {
        return summarize_url(&state, url).await;
    }

    // 2) Not a URL -> answer from the cached summary
    let context = {
        let session = state.lock_session();
        session
            .summary()
            .map(|summary| (summary.to_string(), session.turns().cloned().collect::<Vec<_>>()))
    };

    if let Some((summary, turns)) = context {
        info!("answering follow-up question: {}", input);
        let response = followup::answer(&state.llm, &summary, &turns, &input)
            .await
            .map_err(|e| {
                error!("follow-up failed: {e}");
                ErrorResponse::internal("follow-up failed")
            })?;

        state.lock_session().append_turn(input.clone(), response.clone());

        return Ok(Json(FollowupResponse {
            question: input,
            response,
        })
        .into_response());
    }

    // 3) No summary context yet
    Err(ErrorResponse::bad_request(
        "No context available. Please provide a URL first.",
    ))
}

/// Fetch, summarize, and label a page, then install it as the new context.
///
/// The session is only written after every upstream step succeeded, so a
/// failure leaves the previous context intact.
async fn summarize_url(state: &AppState, url: &str) -> Result<Response, ErrorResponse> {
    info!("summarizing url: {}", url);
    let content = scraper::fetch_content(&state.http, url).await.map_err(|e| {
        error!("fetch failed for {url}: {e}");
        ErrorResponse::internal("summarization failed")
    })?;

    let summary = agent::summarize(&state.llm, &content.text, state.config.fetch.max_content_chars)
        .await
        .map_err(|e| {
            error!("summarization failed for {url}: {e}");
            ErrorResponse::internal("summarization failed")
        })?;

    info!("creating topic from summary");
    let main_topic = topic::topic_from_summary(&state.llm, &summary)
        .await
        .map_err(|e| {
            error!("topic extraction failed for {url}: {e}");
            ErrorResponse::internal("summarization failed")
        })?;

    state.lock_session().set_summary(summary.clone());

    Ok(Json(SummaryResponse {
        summary,
        main_topic,
    })
    .into_response())
}
