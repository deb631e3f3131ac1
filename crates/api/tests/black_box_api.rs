use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::json;

use chirpy_api::app::{AppState, build_app};
use chirpy_api::config::Platform;
use chirpy_api::middleware::HitCounter;
use chirpy_core::{ChirpId, UserId};
use chirpy_store::InMemoryStore;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    // Kept alive for the server's lifetime; dropping it deletes the dir.
    _asset_root: tempfile::TempDir,
}

impl TestServer {
    async fn spawn(platform: Platform) -> Self {
        // Build the app (same router as prod) over an in-memory store and a
        // scratch static root, bound to an ephemeral port.
        let asset_root = tempfile::tempdir().expect("failed to create asset root");
        std::fs::write(
            asset_root.path().join("index.html"),
            "<html><body>Welcome to Chirpy</body></html>",
        )
        .expect("failed to write index.html");

        let app = build_app(
            AppState {
                store: Arc::new(InMemoryStore::new()),
                hits: HitCounter::new(),
                platform,
            },
            asset_root.path(),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            _asset_root: asset_root,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_user(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/users", base_url))
        .json(&json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn healthz_responds_ok() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/admin/healthz", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn create_user_returns_the_new_user() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let user = create_user(&client, &srv.base_url, "walt@breakingbad.com").await;

    assert_eq!(user["email"], "walt@breakingbad.com");
    user["id"]
        .as_str()
        .unwrap()
        .parse::<UserId>()
        .expect("id should be a uuid");
    user["created_at"]
        .as_str()
        .unwrap()
        .parse::<DateTime<Utc>>()
        .expect("created_at should be rfc3339");
}

#[tokio::test]
async fn duplicate_email_is_an_internal_error() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    create_user(&client, &srv.base_url, "walt@breakingbad.com").await;

    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .json(&json!({ "email": "walt@breakingbad.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn malformed_json_shares_the_internal_error_path() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    // Decode errors are deliberately not distinguished from internal errors.
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn chirp_with_banned_word_is_cleaned() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let user = create_user(&client, &srv.base_url, "walt@breakingbad.com").await;

    let res = client
        .post(format!("{}/api/chirps", srv.base_url))
        .json(&json!({
            "body": "This is a kerfuffle opinion I need to share with the world",
            "user_id": user["id"],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let chirp: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        chirp["body"],
        "This is a **** opinion I need to share with the world"
    );
    assert_eq!(chirp["user_id"], user["id"]);
}

#[tokio::test]
async fn chirp_over_140_bytes_is_rejected_before_the_store() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let user = create_user(&client, &srv.base_url, "walt@breakingbad.com").await;

    let res = client
        .post(format!("{}/api/chirps", srv.base_url))
        .json(&json!({ "body": "a".repeat(141), "user_id": user["id"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Chirp is too long" }));

    // Nothing reached the store.
    let res = client
        .get(format!("{}/api/chirps", srv.base_url))
        .send()
        .await
        .unwrap();
    let chirps: serde_json::Value = res.json().await.unwrap();
    assert_eq!(chirps.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_user_id_is_a_bad_request() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/chirps", srv.base_url))
        .json(&json!({ "body": "hello", "user_id": "not-a-uuid" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid user ID" }));
}

#[tokio::test]
async fn chirp_for_unknown_user_is_an_internal_error() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/chirps", srv.base_url))
        .json(&json!({ "body": "hello", "user_id": UserId::new().to_string() }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn chirps_list_in_creation_order_and_fetch_by_id() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let user = create_user(&client, &srv.base_url, "walt@breakingbad.com").await;

    let mut ids = Vec::new();
    for body in ["first chirp", "second chirp"] {
        let res = client
            .post(format!("{}/api/chirps", srv.base_url))
            .json(&json!({ "body": body, "user_id": user["id"] }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let chirp: serde_json::Value = res.json().await.unwrap();
        ids.push(chirp["id"].as_str().unwrap().to_string());
    }

    let res = client
        .get(format!("{}/api/chirps", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let chirps: serde_json::Value = res.json().await.unwrap();
    let listed: Vec<&str> = chirps
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, ids);

    let res = client
        .get(format!("{}/api/chirps/{}", srv.base_url, ids[0]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let chirp: serde_json::Value = res.json().await.unwrap();
    assert_eq!(chirp["body"], "first chirp");
}

#[tokio::test]
async fn unknown_chirp_id_is_not_found() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/chirps/{}", srv.base_url, ChirpId::new()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Chirp not found" }));
}

#[tokio::test]
async fn malformed_chirp_id_is_a_bad_request() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/chirps/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid chirp ID" }));
}

#[tokio::test]
async fn metrics_reflects_static_file_traffic() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();

    // API traffic does not count.
    client
        .get(format!("{}/admin/healthz", srv.base_url))
        .send()
        .await
        .unwrap();

    for _ in 0..3 {
        let res = client
            .get(format!("{}/app/index.html", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(format!("{}/admin/metrics", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Chirpy has been visited 3 times!"), "{html}");
}

#[tokio::test]
async fn missing_static_file_still_counts_as_a_hit() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/app/no-such-file.html", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let html = client
        .get(format!("{}/admin/metrics", srv.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Chirpy has been visited 1 times!"), "{html}");
}

#[tokio::test]
async fn reset_is_forbidden_outside_dev() {
    let srv = TestServer::spawn(Platform::Prod).await;

    let client = reqwest::Client::new();
    let user = create_user(&client, &srv.base_url, "walt@breakingbad.com").await;

    let res = client
        .post(format!("{}/admin/reset", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Store state survived the rejected reset.
    let res = client
        .post(format!("{}/api/chirps", srv.base_url))
        .json(&json!({ "body": "still here", "user_id": user["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn dev_reset_clears_users_and_counter() {
    let srv = TestServer::spawn(Platform::Dev).await;

    let client = reqwest::Client::new();
    let user = create_user(&client, &srv.base_url, "walt@breakingbad.com").await;
    client
        .post(format!("{}/api/chirps", srv.base_url))
        .json(&json!({ "body": "soon gone", "user_id": user["id"] }))
        .send()
        .await
        .unwrap();
    client
        .get(format!("{}/app/index.html", srv.base_url))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/admin/reset", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");

    let chirps: serde_json::Value = client
        .get(format!("{}/api/chirps", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(chirps.as_array().unwrap().len(), 0);

    let html = client
        .get(format!("{}/admin/metrics", srv.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Chirpy has been visited 0 times!"), "{html}");
}
