//! End-to-end tests for the menu HTTP API
//! Run: cargo test -p menu-server --test menu_api

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use menu_server::core::{Config, ServerState, build_router};

const BOUNDARY: &str = "menu-test-boundary";

struct TestApp {
    app: Router,
    uploads_dir: std::path::PathBuf,
    _tmp: tempfile::TempDir,
}

async fn test_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();

    TestApp {
        app: build_router(state),
        uploads_dir: config.uploads_dir(),
        _tmp: tmp,
    }
}

impl TestApp {
    async fn request(&self, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

/// Build a multipart POST /api/menu request by hand
fn multipart_create(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, filename, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/menu")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn liveness_endpoint_answers_plain_text() {
    let env = test_app().await;

    let response = env
        .app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Menu server is running");
}

#[tokio::test]
async fn create_search_delete_with_attachment_lifecycle() {
    let env = test_app().await;

    // Create with an attached image
    let (status, json) = env
        .request(multipart_create(
            &[("name", "Tacos"), ("price", "5"), ("description", "Spicy")],
            &[("image", "tacos.jpg", b"fake jpeg bytes")],
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let menu = &json["menu"];
    assert_eq!(menu["name"], "Tacos");
    assert_eq!(menu["price"], 5.0);
    assert_eq!(menu["description"], "Spicy");
    assert_eq!(menu["model"], "");

    let id = menu["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("menu_item:"));

    // image reference matches /uploads/<token>.<ext>
    let image = menu["image"].as_str().unwrap().to_string();
    assert!(image.starts_with("/uploads/"));
    assert!(image.ends_with(".jpg"));
    let file_name = image.strip_prefix("/uploads/").unwrap();
    assert!(env.uploads_dir.join(file_name).exists());

    // stored file is retrievable under the static prefix
    let response = env
        .app
        .clone()
        .oneshot(Request::builder().uri(&image).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"fake jpeg bytes");

    // case-insensitive search finds exactly that record
    let (status, json) = env.get("/api/menu?search=tacos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"].as_str().unwrap(), id);

    // Delete removes record and its file
    let (status, json) = env.delete(&format!("/api/menu/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deletedItem"]["name"], "Tacos");
    assert!(!env.uploads_dir.join(file_name).exists());

    let response = env
        .app
        .clone()
        .oneshot(Request::builder().uri(&image).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // gone from listings
    let (status, json) = env.get("/api/menu").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_missing_required_field_returns_400() {
    let env = test_app().await;

    let (status, json) = env
        .request(multipart_create(
            &[("name", "Tacos"), ("description", "Spicy")],
            &[],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "E0002");

    // no record persisted
    let (_, json) = env.get("/api/menu").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_and_search_route_semantics() {
    let env = test_app().await;

    for (name, price) in [("Margherita Pizza", "9.5"), ("Calzone", "7")] {
        let (status, _) = env
            .request(multipart_create(
                &[("name", name), ("price", price), ("description", "Italian")],
                &[],
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // empty search matches all
    let (status, json) = env.get("/api/menu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    // /api/search requires the query parameter
    let (status, json) = env.get("/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "E0002");

    // present-but-empty query matches all
    let (status, json) = env.get("/api/search?query=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    // substring match, case-insensitive
    let (status, json) = env.get("/api/search?query=PIZZA").await;
    assert_eq!(status, StatusCode::OK);
    let hits = json.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Margherita Pizza");

    let (_, json) = env.get("/api/search?query=sushi").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_distinguishes_unknown_from_malformed_ids() {
    let env = test_app().await;

    let (status, _) = env
        .request(multipart_create(
            &[("name", "Tacos"), ("price", "5"), ("description", "Spicy")],
            &[],
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // well-formed but unknown id: 404
    let (status, json) = env.delete("/api/menu/menu_item:doesnotexist00000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "E0003");

    // malformed id: 400, distinct from not-found
    let (status, json) = env.delete("/api/menu/product:abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "E0002");

    // record set unchanged by both failures
    let (_, json) = env.get("/api/menu").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}
