use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tldw_core::{
    Endpoint, Location, Session, SummarizerApi, TldwClient, TldwError, controller::NO_ANSWER,
};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Backend {
    summarize_bodies: Arc<Mutex<Vec<Value>>>,
    chat_bodies: Arc<Mutex<Vec<Value>>>,
}

async fn summarize(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.summarize_bodies.lock().unwrap().push(body.clone());

    let url = body["url"].as_str().unwrap_or_default();
    if !url.contains("youtube.com") && !url.contains("youtu.be") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid url" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "error": "",
            "video_id": "abc123",
            "title": "Ownership in Rust",
            "thumbnail_url": "https://i.ytimg.com/vi/abc123/maxresdefault.jpg",
            "aspect_ratio": 1.7777,
            "webpage_url": "https://www.youtube.com/watch?v=abc123",
            "summary": {
                "word": "Ownership",
                "sentence": "Every value has one owner.",
                "paragraph": "Moves, borrows and lifetimes.",
                "wikipedia": "https://en.wikipedia.org/wiki/Rust_(programming_language)"
            }
        })),
    )
}

async fn chat(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.chat_bodies.lock().unwrap().push(body.clone());

    match body["question"].as_str() {
        Some("fail") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "no transcript" })),
        ),
        Some("silent") => (StatusCode::OK, Json(json!({ "success": true }))),
        _ => (
            StatusCode::OK,
            Json(json!({ "success": true, "answer": "It is about *ownership*." })),
        ),
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn not_json() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
}

async fn spawn_backend() -> (Endpoint, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/summarize", post(summarize))
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoint = Endpoint::custom(&format!("http://{addr}")).unwrap();
    (endpoint, backend)
}

#[tokio::test]
async fn summarize_posts_raw_url_and_decodes_success() {
    let (endpoint, backend) = spawn_backend().await;
    let client = TldwClient::new(endpoint);

    let reply = client.summarize("https://youtu.be/abc123").await.unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.body.video_id(), Some("abc123"));
    let loaded = reply.body.into_loaded().unwrap();
    assert_eq!(loaded.info.title, "Ownership in Rust");
    assert_eq!(loaded.summary.word, "Ownership");

    let bodies = backend.summarize_bodies.lock().unwrap();
    assert_eq!(bodies.as_slice(), &[json!({ "url": "https://youtu.be/abc123" })]);
}

#[tokio::test]
async fn error_status_still_yields_body() {
    let (endpoint, _backend) = spawn_backend().await;
    let client = TldwClient::new(endpoint);

    let reply = client.summarize("not a link").await.unwrap();

    assert_eq!(reply.status, 400);
    assert!(!reply.is_success());
    assert_eq!(reply.body.error_message(), Some("invalid url"));
}

#[tokio::test]
async fn chat_sends_video_id_and_question() {
    let (endpoint, backend) = spawn_backend().await;
    let client = TldwClient::new(endpoint);

    let reply = client.ask("abc123", "What is a move?").await.unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.body.answer(), Some("It is about *ownership*."));
    let bodies = backend.chat_bodies.lock().unwrap();
    assert_eq!(
        bodies.as_slice(),
        &[json!({ "video_id": "abc123", "question": "What is a move?" })]
    );
}

#[tokio::test]
async fn health_check() {
    let (endpoint, _backend) = spawn_backend().await;
    let client = TldwClient::new(endpoint);

    let reply = client.health().await.unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.body.status, "healthy");
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let app = Router::new().route("/api/summarize", post(not_json));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = TldwClient::new(Endpoint::custom(&format!("http://{addr}")).unwrap());
    let err = client.summarize("https://youtu.be/abc123").await.unwrap_err();
    assert!(matches!(err, TldwError::JsonError(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TldwClient::new(Endpoint::custom(&format!("http://{addr}")).unwrap());
    let err = client.summarize("https://youtu.be/abc123").await.unwrap_err();
    assert!(matches!(err, TldwError::ApiError(_)));
}

#[tokio::test]
async fn session_against_http_backend() {
    let (endpoint, backend) = spawn_backend().await;
    let mut session = Session::new(TldwClient::new(endpoint), Location::parse("/?v=abc123"));

    session.open().await;
    let controller = session.controller();
    assert_eq!(
        backend.summarize_bodies.lock().unwrap().as_slice(),
        &[json!({ "url": "https://www.youtube.com/watch?v=abc123" })]
    );
    assert_eq!(controller.results().map(|v| v.info.title.as_str()), Some("Ownership in Rust"));

    session.ask("fail").await;
    let controller = session.controller();
    assert_eq!(controller.followup().error.as_deref(), Some("no transcript"));
    assert!(controller.results().is_some());

    session.ask("silent").await;
    assert_eq!(session.controller().visible_answer(), Some(NO_ANSWER));

    session.submit("bad").await;
    assert_eq!(session.controller().error(), Some("invalid url"));
    assert!(session.controller().loaded().is_none());
}
