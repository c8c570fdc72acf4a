//! HTTP routes and handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use newsbrief_core::Preferences;
use newsbrief_providers::{
    FeedAdapter, FeedConnector, FeedCredentials, FileTokenStore, MemoryTokenStore, TokenStore,
};
use newsbrief_services::{
    KeywordSummarizer, Mailer, PhrasebookTranslator, StubMailer, Summarizer, Translator,
};

use crate::callback::{run_callback, CallbackParams};
use crate::config::{ServerConfig, STATE_COOKIE_NAME};
use crate::digest::render_digest;
use crate::error::{ServerError, ServerResult};
use crate::session::{clear_state_cookie, cookie_value, state_cookie, Identity};
use crate::users::{MemoryUserStore, UserStore};

/// User id used for feed fetches when no identity is present.
const ANONYMOUS_USER: &str = "anonymous";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<FeedAdapter>,
    pub summarizer: Arc<dyn Summarizer>,
    pub translator: Arc<dyn Translator>,
    pub mailer: Arc<dyn Mailer>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Builds the state from a server configuration with the stub service
    /// backends.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::open(path)?),
            None => Arc::new(MemoryTokenStore::new()),
        };

        let connector = Arc::new(FeedConnector::new(config.provider_config(), store)?);

        Ok(Self {
            adapter: Arc::new(FeedAdapter::new(connector)),
            summarizer: Arc::new(KeywordSummarizer::new()),
            translator: Arc::new(PhrasebookTranslator::new()),
            mailer: Arc::new(StubMailer::new()),
            users: Arc::new(MemoryUserStore::new()),
        })
    }

    /// Convenience for tests and ephemeral deployments: in-memory stores,
    /// stub services.
    pub fn in_memory(credentials: FeedCredentials, redirect_uri: &str) -> ServerResult<Self> {
        Self::from_config(&ServerConfig::new(credentials, redirect_uri))
    }

    fn connector(&self) -> &Arc<FeedConnector> {
        self.adapter.connector()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/feed", get(auth_initiate).post(auth_manage))
        .route("/api/auth/feed/callback", get(auth_callback))
        .route("/api/news", get(news))
        .route("/api/summary", post(summary))
        .route("/api/translate", post(translate))
        .route("/api/digest", post(digest))
        .route(
            "/api/preferences",
            get(get_preferences).put(put_preferences),
        )
        .with_state(state)
}

/// GET /api/auth/feed
///
/// Starts the authorization flow and parks the CSRF state in the cookie.
async fn auth_initiate(
    State(state): State<AppState>,
    identity: Identity,
) -> ServerResult<Response> {
    let request = state.connector().initiate_auth(&identity.user_id);

    Ok((
        AppendHeaders([(SET_COOKIE, state_cookie(&request.state))]),
        Json(json!({ "authUrl": request.auth_url })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
}

/// GET /api/auth/feed/callback
///
/// The provider's redirect target. Every response clears the state cookie,
/// success or error.
async fn auth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    headers: axum::http::HeaderMap,
) -> Response {
    let stored_state = cookie_value(&headers, STATE_COOKIE_NAME);
    let identity = Identity::from_headers(&headers);

    let result = run_callback(
        state.connector(),
        &state.users,
        CallbackParams {
            code: query.code,
            state: query.state,
        },
        stored_state,
        identity,
    )
    .await;

    let clear = AppendHeaders([(SET_COOKIE, clear_state_cookie())]);
    match result {
        Ok(target) => (clear, Redirect::to(target)).into_response(),
        Err(e) => (clear, e).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct ManageRequest {
    #[serde(default)]
    action: Option<String>,
}

/// POST /api/auth/feed
///
/// Connection status check, or disconnect when the body says so.
async fn auth_manage(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<ManageRequest>,
) -> ServerResult<Json<serde_json::Value>> {
    if request.action.as_deref() == Some("disconnect") {
        state.connector().disconnect(&identity.user_id)?;
        return Ok(Json(json!({ "success": true, "connected": false })));
    }

    Ok(Json(json!({
        "connected": state.connector().is_connected(&identity.user_id),
        "userId": identity.user_id,
    })))
}

/// GET /api/news
///
/// Articles for the caller. Anonymous and disconnected callers get the
/// fixture set; this endpoint never hard-fails.
async fn news(State(state): State<AppState>, headers: axum::http::HeaderMap) -> Response {
    let user_id = Identity::from_headers(&headers)
        .map(|identity| identity.user_id)
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());

    let articles = state.adapter.fetch_articles(&user_id).await;
    Json(articles).into_response()
}

#[derive(Debug, Deserialize)]
struct SummaryRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// POST /api/summary
async fn summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> ServerResult<Json<serde_json::Value>> {
    if request.title.trim().is_empty() || request.content.trim().is_empty() {
        return Err(ServerError::MissingParameters);
    }

    let summary = state
        .summarizer
        .summarize(&request.title, &request.content)
        .await?;
    Ok(Json(json!({ "summary": summary })))
}

#[derive(Debug, Deserialize)]
struct TranslateRequest {
    #[serde(default)]
    text: String,
    #[serde(default = "default_target_language")]
    target_language: String,
}

fn default_target_language() -> String {
    "en".to_string()
}

/// POST /api/translate
async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Json<serde_json::Value> {
    let text = state
        .translator
        .translate(&request.text, &request.target_language)
        .await;
    Json(json!({ "text": text }))
}

#[derive(Debug, Deserialize)]
struct DigestRequest {
    email: String,
    #[serde(default)]
    article_ids: Vec<String>,
    #[serde(default)]
    include_summaries: bool,
}

/// POST /api/digest
///
/// Mails the caller a digest of their current articles. An empty id list
/// means everything.
async fn digest(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<DigestRequest>,
) -> ServerResult<Json<serde_json::Value>> {
    let mut articles = state.adapter.fetch_articles(&identity.user_id).await;
    if !request.article_ids.is_empty() {
        articles.retain(|article| request.article_ids.contains(&article.id));
    }

    if request.include_summaries {
        for article in &mut articles {
            let summary = state
                .summarizer
                .summarize(&article.title, &article.content)
                .await?;
            article.summary = Some(summary);
        }
    }

    let html = render_digest(&articles);
    let delivery = state
        .mailer
        .send(&request.email, "Your News Digest", &html)
        .await?;

    Ok(Json(json!({ "success": true, "message": delivery.message })))
}

/// GET /api/preferences
async fn get_preferences(
    State(state): State<AppState>,
    identity: Identity,
) -> Json<Preferences> {
    let user = state.users.get_or_create(&identity.user_id, &identity.email);
    Json(user.preferences)
}

/// PUT /api/preferences
async fn put_preferences(
    State(state): State<AppState>,
    identity: Identity,
    Json(preferences): Json<Preferences>,
) -> ServerResult<Json<Preferences>> {
    state.users.get_or_create(&identity.user_id, &identity.email);
    let user = state
        .users
        .update_preferences(&identity.user_id, preferences)
        .ok_or(ServerError::NotAuthenticated)?;
    Ok(Json(user.preferences))
}
