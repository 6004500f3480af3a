mod common;

use std::sync::Arc;

use axum::{Router, routing::get};
use axum_test::TestServer;

use link_rotator::api::handlers::redirect::redirect_handler;
use link_rotator::infrastructure::cache::{MemoryCache, RotationCache, cursor_key, snapshot_key};

use common::{FakeLinkRepository, MockConnectInfoLayer, create_test_state, seed_link};

fn redirect_server(state: link_rotator::AppState) -> TestServer {
    let app = Router::new()
        .route("/r/{key}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_round_robin_wraps() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    seed_link(&repo, "promo", &["https://a.example", "https://b.example", "https://c.example"])
        .await;

    let (state, _rx) = create_test_state(repo, cache.clone(), 100);
    let server = redirect_server(state);

    let mut served = Vec::new();
    for _ in 0..4 {
        let response = server.get("/r/promo").await;
        assert_eq!(response.status_code(), 302);
        served.push(response.header("location").to_str().unwrap().to_string());
    }

    assert_eq!(
        served,
        vec![
            "https://a.example",
            "https://b.example",
            "https://c.example",
            "https://a.example",
        ]
    );

    // Fourth hit served position 0 again, so the stored cursor points at 1.
    let cursor = cache.get(&cursor_key("promo")).await.unwrap();
    assert_eq!(cursor.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_redirect_populates_snapshot_on_miss() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    seed_link(&repo, "promo", &["https://a.example"]).await;

    let (state, _rx) = create_test_state(repo, cache.clone(), 100);
    let server = redirect_server(state);

    assert!(cache.get(&snapshot_key("promo")).await.unwrap().is_none());

    let response = server.get("/r/promo").await;
    assert_eq!(response.status_code(), 302);

    assert!(cache.get(&snapshot_key("promo")).await.unwrap().is_some());
}

#[tokio::test]
async fn test_redirect_unknown_key_not_found() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let (state, _rx) = create_test_state(repo, cache, 100);
    let server = redirect_server(state);

    let response = server.get("/r/missing").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_inactive_link_not_found() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let id = seed_link(&repo, "paused", &["https://a.example"]).await;

    let (state, _rx) = create_test_state(repo.clone(), cache, 100);

    state
        .link_service
        .update(
            id,
            link_rotator::domain::entities::LinkUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let server = redirect_server(state);

    server.get("/r/paused").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_stale_cursor_serves_first_destination() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    seed_link(&repo, "promo", &["https://a.example", "https://b.example"]).await;

    // A cursor left over from a larger destination set.
    cache.set(&cursor_key("promo"), "7", 3600).await.unwrap();

    let (state, _rx) = create_test_state(repo, cache.clone(), 100);
    let server = redirect_server(state);

    let response = server.get("/r/promo").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://a.example");

    // The stale value still advances modulo the current set size, so the
    // stored cursor lands back inside [0, 2).
    let cursor = cache.get(&cursor_key("promo")).await.unwrap();
    assert_eq!(cursor.as_deref(), Some("0"));
}

#[tokio::test]
async fn test_redirect_sends_click_event_with_metadata() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let id = seed_link(&repo, "track", &["https://a.example"]).await;

    let (state, mut rx) = create_test_state(repo, cache, 100);
    let server = redirect_server(state);

    let response = server
        .get("/r/track")
        .add_header("User-Agent", "TestBot/1.0")
        .add_header("Referer", "https://social.example/post")
        .await;

    assert_eq!(response.status_code(), 302);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.link_id, id);
    assert_eq!(event.destination_url, "https://a.example");
    assert_eq!(event.ip_address, Some("127.0.0.1".to_string()));
    assert_eq!(event.user_agent, Some("TestBot/1.0".to_string()));
    assert_eq!(event.referer, Some("https://social.example/post".to_string()));
}

#[tokio::test]
async fn test_redirect_succeeds_when_click_queue_full() {
    let repo = Arc::new(FakeLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let id = seed_link(&repo, "busy", &["https://a.example"]).await;

    let (state, _rx) = create_test_state(repo, cache, 1);

    // Saturate the queue; nothing drains it.
    state
        .click_sender
        .try_send(link_rotator::domain::click_event::ClickEvent::new(
            id,
            1,
            "https://a.example".to_string(),
            None,
            None,
            None,
        ))
        .unwrap();

    let server = redirect_server(state);

    let response = server.get("/r/busy").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://a.example");
}
