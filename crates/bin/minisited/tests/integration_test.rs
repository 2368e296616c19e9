//! End-to-end tests for the full minisited stack.
//!
//! Each test wires the complete application (real reqwest sources, real
//! services, real axum router) against a `wiremock` upstream standing in for
//! the blog API and the asset host, and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use minisite_adapter_http_axum::router;
use minisite_adapter_http_axum::state::AppState;
use minisite_adapter_remote_reqwest::{
    RemoteBlogSource, RemoteClient, RemoteClockSource, RemoteConfig, RemotePokemonSource,
};
use minisite_app::services::blog_service::BlogService;
use minisite_app::services::pokemon_service::PokemonService;
use minisite_app::services::time_service::TimeService;
use minisite_domain::strategy::{FailurePolicy, LoadStrategy, PageSettings};

/// Build a fully-wired router against `upstream`, pre-rendering static pages
/// the way the daemon does at startup.
async fn app(upstream: &MockServer, pages: PageSettings) -> axum::Router {
    let client = RemoteClient::new(&RemoteConfig {
        api_base_url: upstream.uri(),
        asset_base_url: upstream.uri(),
        timeout_ms: 2_000,
    })
    .expect("client should build");

    let blog_service = BlogService::new(RemoteBlogSource::new(client.clone()), pages, pages);
    let pokemon_service = PokemonService::new(RemotePokemonSource::new(client.clone()), pages);
    let time_service = TimeService::new(RemoteClockSource::new(client), pages);

    blog_service.prerender().await;
    pokemon_service.prerender().await;
    time_service.prerender().await;

    router::build(AppState::new(blog_service, pokemon_service, time_service))
}

fn static_pages() -> PageSettings {
    PageSettings::new(LoadStrategy::STATIC, FailurePolicy::Clear)
}

fn on_request_pages() -> PageSettings {
    PageSettings::new(LoadStrategy::OnRequest, FailurePolicy::Clear)
}

async fn mount_json(upstream: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(upstream)
        .await;
}

async fn mount_status(upstream: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status))
        .mount(upstream)
        .await;
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = String::from_utf8(
        resp.into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap();
    (status, body)
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let upstream = MockServer::start().await;
    let (status, body) = get(app(&upstream, on_request_pages()).await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

// ---------------------------------------------------------------------------
// Blog pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_blogs_from_wrapped_payload() {
    let upstream = MockServer::start().await;
    mount_json(
        &upstream,
        "/blog-posts",
        json!({"blog_posts": [{"id": 1, "title": "A", "content": "..."}]}),
    )
    .await;

    let (status, body) = get(app(&upstream, on_request_pages()).await, "/blogs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<a href="/blogs/1">A</a>"#));
}

#[tokio::test]
async fn should_render_placeholder_when_blog_api_fails() {
    let upstream = MockServer::start().await;
    mount_status(&upstream, "/blog-posts", 500).await;

    let (status, body) = get(app(&upstream, on_request_pages()).await, "/blogs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No blogs found."));
}

#[tokio::test]
async fn should_serve_prerendered_blog_without_refetching() {
    let upstream = MockServer::start().await;
    mount_json(
        &upstream,
        "/blog-posts",
        json!({"blog_posts": [{"id": 4, "title": "Cached", "content": "from startup"}]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/blog-posts/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 4, "title": "Cached", "content": "from startup"})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app(&upstream, static_pages()).await;
    let (status, body) = get(app.clone(), "/blogs/4").await;
    let (_, again) = get(app, "/blogs/4").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("from startup"));
    assert_eq!(body, again);
}

#[tokio::test]
async fn should_render_blog_error_when_detail_fetch_fails() {
    let upstream = MockServer::start().await;
    mount_status(&upstream, "/blog-posts/5", 503).await;

    let (_, body) = get(app(&upstream, on_request_pages()).await, "/blogs/5").await;

    assert!(body.contains("Error: Failed to fetch blog with id 5"));
}

#[tokio::test]
async fn should_render_blog_not_found_when_detail_is_null() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog-posts/6"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&upstream)
        .await;

    let (status, body) = get(app(&upstream, on_request_pages()).await, "/blogs/6").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Blog not found"));
}

// ---------------------------------------------------------------------------
// Pokémon pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_pokemon_detail_from_asset_host() {
    let upstream = MockServer::start().await;
    mount_json(
        &upstream,
        "/pokemon-main/pokemon/25.json",
        json!({
            "id": 25,
            "name": "Pikachu",
            "image": "images/pikachu.jpg",
            "type": ["Electric"],
            "stats": [{"name": "speed", "value": 90}]
        }),
    )
    .await;

    let (status, body) = get(app(&upstream, on_request_pages()).await, "/pokemon/25").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Pikachu</h1>"));
    assert!(body.contains(&format!("{}/pokemon-main/images/pikachu.jpg", upstream.uri())));
    assert!(body.contains("Type: Electric"));
    assert!(body.contains("<td>speed</td><td>90</td>"));
}

#[tokio::test]
async fn should_render_pokemon_not_found_when_asset_is_missing() {
    let upstream = MockServer::start().await;
    mount_status(&upstream, "/pokemon-main/pokemon/9999.json", 404).await;

    let (status, body) = get(app(&upstream, on_request_pages()).await, "/pokemon/9999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Pokemon not found"));
}

#[tokio::test]
async fn should_render_pokemon_error_with_status_reason() {
    let upstream = MockServer::start().await;
    mount_status(&upstream, "/pokemon-main/pokemon/7.json", 500).await;

    let (_, body) = get(app(&upstream, on_request_pages()).await, "/pokemon/7").await;

    assert!(body.contains("Error: Failed to fetch data: Internal Server Error"));
}

#[tokio::test]
async fn should_not_call_upstream_when_pokemon_id_is_invalid() {
    let upstream = MockServer::start().await;

    let (status, body) = get(app(&upstream, on_request_pages()).await, "/pokemon/pika").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Pokemon not found"));
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_time_generated_at_startup() {
    let upstream = MockServer::start().await;
    mount_json(&upstream, "/current-time", json!({"time": "12:00:01"})).await;

    let (status, body) = get(app(&upstream, static_pages()).await, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("12:00:01"));
}

#[tokio::test]
async fn should_render_time_placeholder_when_clock_is_down() {
    let upstream = MockServer::start().await;
    mount_status(&upstream, "/current-time", 500).await;

    let (_, body) = get(app(&upstream, static_pages()).await, "/").await;

    assert!(body.contains("Laatst bekende tijd wordt geladen..."));
}
