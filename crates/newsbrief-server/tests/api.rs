//! End-to-end tests of the HTTP surface against an in-process server.

use std::sync::Arc;

use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;

use newsbrief_providers::{
    FeedAdapter, FeedConnector, FeedCredentials, InoreaderConfig, MemoryTokenStore,
};
use newsbrief_server::{router, AppState, MemoryUserStore};
use newsbrief_services::{KeywordSummarizer, PhrasebookTranslator, StubMailer};

/// Serves a fake provider token endpoint that accepts any code.
async fn spawn_token_endpoint() -> String {
    let router = Router::new().route(
        "/token",
        post(|Form(_params): Form<HashMap<String, String>>| async {
            Json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600,
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/token")
}

/// Boots the application with in-memory stores and the fake token endpoint.
async fn spawn_app() -> String {
    let token_url = spawn_token_endpoint().await;

    let config = InoreaderConfig::new(
        FeedCredentials::new("test-client", "test-secret"),
        "http://localhost:3000/api/auth/feed/callback",
    )
    .with_token_url(token_url);

    let connector = Arc::new(
        FeedConnector::new(config, Arc::new(MemoryTokenStore::new())).unwrap(),
    );
    let state = AppState {
        adapter: Arc::new(FeedAdapter::new(connector)),
        summarizer: Arc::new(KeywordSummarizer::new()),
        translator: Arc::new(PhrasebookTranslator::new()),
        mailer: Arc::new(StubMailer::new()),
        users: Arc::new(MemoryUserStore::new()),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn authed(request: reqwest::RequestBuilder, user_id: &str) -> reqwest::RequestBuilder {
    request
        .header("authorization", format!("Bearer {user_id}"))
        .header("x-user-email", format!("{user_id}@example.com"))
}

/// Pulls the state value out of the Set-Cookie header.
fn state_from_cookie(response: &reqwest::Response) -> String {
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    let (_, rest) = cookie.split_once("inoreader_auth_state=").unwrap();
    rest.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn anonymous_news_serves_fixtures() {
    let base = spawn_app().await;

    let response = client().get(format!("{base}/api/news")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let articles: Vec<Value> = response.json().await.unwrap();
    assert_eq!(articles.len(), 8);
    assert_eq!(articles[0]["id"], "news-0");
    // camelCase wire format
    assert!(articles[0].get("imageUrl").is_some());
    assert!(articles[0]["categories"].as_array().unwrap().len() <= 3);
}

#[tokio::test]
async fn auth_initiation_requires_identity() {
    let base = spawn_app().await;

    let response = client()
        .get(format!("{base}/api/auth/feed"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn auth_initiation_returns_url_and_cookie() {
    let base = spawn_app().await;

    let response = authed(client().get(format!("{base}/api/auth/feed")), "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let state = state_from_cookie(&response);
    assert!(!state.is_empty());

    let body: Value = response.json().await.unwrap();
    let auth_url = body["authUrl"].as_str().unwrap();
    assert!(auth_url.starts_with("https://www.inoreader.com/oauth2/auth?"));
    assert!(auth_url.contains("response_type=code"));
}

#[tokio::test]
async fn full_connect_flow() {
    let base = spawn_app().await;
    let http = client();

    // initiate and capture the state cookie
    let response = authed(http.get(format!("{base}/api/auth/feed")), "u1")
        .send()
        .await
        .unwrap();
    let state = state_from_cookie(&response);

    // provider redirects back; the browser sends the cookie along
    let response = authed(
        http.get(format!("{base}/api/auth/feed/callback"))
            .query(&[("code", "auth-code"), ("state", state.as_str())])
            .header("cookie", format!("inoreader_auth_state={state}")),
        "u1",
    )
    .send()
    .await
    .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/profile/connections"
    );
    // the state cookie is cleared on the way out
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("inoreader_auth_state=;"));
    assert!(cookie.contains("Max-Age=0"));

    // connection status now reports connected
    let response = authed(http.post(format!("{base}/api/auth/feed")), "u1")
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["connected"], true);

    // disconnect, twice; both succeed
    for _ in 0..2 {
        let response = authed(http.post(format!("{base}/api/auth/feed")), "u1")
            .json(&json!({ "action": "disconnect" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["connected"], false);
    }
}

#[tokio::test]
async fn callback_rejects_mismatched_state() {
    let base = spawn_app().await;
    let http = client();

    let response = authed(http.get(format!("{base}/api/auth/feed")), "u1")
        .send()
        .await
        .unwrap();
    let state = state_from_cookie(&response);

    let response = authed(
        http.get(format!("{base}/api/auth/feed/callback"))
            .query(&[("code", "auth-code"), ("state", state.as_str())])
            .header("cookie", "inoreader_auth_state=tampered"),
        "u1",
    )
    .send()
    .await
    .unwrap();

    assert_eq!(response.status(), 400);
    // cookie still cleared on error
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid authorization state");

    // the account is not connected
    let response = authed(http.post(format!("{base}/api/auth/feed")), "u1")
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["connected"], false);
}

#[tokio::test]
async fn callback_without_params_is_400() {
    let base = spawn_app().await;

    let response = client()
        .get(format!("{base}/api/auth/feed/callback"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing required parameters");
}

#[tokio::test]
async fn summary_endpoint_validates_and_summarizes() {
    let base = spawn_app().await;
    let http = client();

    let response = http
        .post(format!("{base}/api/summary"))
        .json(&json!({ "title": "Quantum Computing Leap", "content": "body" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["summary"].as_str().unwrap().contains("quantum"));

    let response = http
        .post(format!("{base}/api/summary"))
        .json(&json!({ "title": "", "content": "body" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn translate_endpoint_degrades_to_input() {
    let base = spawn_app().await;
    let http = client();

    let response = http
        .post(format!("{base}/api/translate"))
        .json(&json!({ "text": "ニュース要約", "target_language": "en" }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["text"], "News Summary");

    let response = http
        .post(format!("{base}/api/translate"))
        .json(&json!({ "text": "plain text" }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["text"], "plain text");
}

#[tokio::test]
async fn digest_endpoint_validates_email() {
    let base = spawn_app().await;
    let http = client();

    let response = authed(http.post(format!("{base}/api/digest")), "u1")
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = authed(http.post(format!("{base}/api/digest")), "u1")
        .json(&json!({
            "email": "u1@example.com",
            "article_ids": ["news-0", "news-1"],
            "include_summaries": true,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("u1@example.com"));
}

#[tokio::test]
async fn preferences_roundtrip() {
    let base = spawn_app().await;
    let http = client();

    let response = authed(http.get(format!("{base}/api/preferences")), "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let prefs: Value = response.json().await.unwrap();
    assert_eq!(prefs["emailDigest"], false);
    assert_eq!(prefs["theme"], "light");

    let response = authed(http.put(format!("{base}/api/preferences")), "u1")
        .json(&json!({
            "categories": ["technology"],
            "sources": ["Wired"],
            "emailDigest": true,
            "theme": "dark",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = authed(http.get(format!("{base}/api/preferences")), "u1")
        .send()
        .await
        .unwrap();
    let prefs: Value = response.json().await.unwrap();
    assert_eq!(prefs["emailDigest"], true);
    assert_eq!(prefs["theme"], "dark");
    assert_eq!(prefs["categories"][0], "technology");
}

#[tokio::test]
async fn preferences_require_identity() {
    let base = spawn_app().await;

    let response = client()
        .get(format!("{base}/api/preferences"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}
