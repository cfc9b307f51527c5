//! Integration tests for HTTP API endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::fixtures::{multipart_body, pdf_bytes};
use common::TestServer;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Helper to make JSON requests.
async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    caller: Option<Uuid>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(id) = caller {
        builder = builder.header("x-caller-id", id.to_string());
    }

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Helper to make multipart requests.
async fn multipart_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
    caller: Option<Uuid>,
) -> (StatusCode, Value) {
    let (content_type, body) = multipart_body(fields, file);
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", content_type);

    if let Some(id) = caller {
        builder = builder.header("x-caller-id", id.to_string());
    }

    let request = builder.body(Body::from(body)).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Register a user and return their id.
async fn register_user(server: &TestServer, email: &str) -> Uuid {
    let (status, body) = json_request(
        &server.router,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Test User",
            "email": email,
            "password": "Passw0rdX"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    Uuid::parse_str(body["user_id"].as_str().unwrap()).unwrap()
}

/// Create a sheet through the API and return the response body.
async fn create_sheet(server: &TestServer, owner: Uuid, title: &str, genre: &str) -> Value {
    let owner_str = owner.to_string();
    let pdf = pdf_bytes();
    let (status, body) = multipart_request(
        &server.router,
        "POST",
        "/api/sheets",
        &[
            ("owner_id", owner_str.as_str()),
            ("title", title),
            ("artist", "Test Artist"),
            ("genre", genre),
            ("instrument", "Piano"),
        ],
        Some(("score.pdf", "application/pdf", &pdf)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create sheet failed: {body}");
    body
}

#[tokio::test]
async fn health_check_works() {
    let server = TestServer::new().await;
    let (status, body) = json_request(&server.router, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn user_registration_and_fetch() {
    let server = TestServer::new().await;
    let user_id = register_user(&server, "alice@example.com").await;

    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/api/users/{user_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["name"], "Test User");
    // The password hash must never appear in a view.
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() {
    let server = TestServer::new().await;
    register_user(&server, "taken@example.com").await;

    let (status, body) = json_request(
        &server.router,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Other",
            "email": "taken@example.com",
            "password": "Passw0rdX"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn weak_password_maps_to_bad_request() {
    let server = TestServer::new().await;
    let (status, body) = json_request(
        &server.router,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Weak",
            "email": "weak@example.com",
            "password": "short"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_failed");
}

#[tokio::test]
async fn sheet_create_fetch_and_download() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;

    let created = create_sheet(&server, owner, "Moonlight Sonata", "Classical").await;
    let sheet_id = created["sheet_id"].as_str().unwrap();
    assert_eq!(created["owner_id"], owner.to_string());
    assert!(created["pdf_size_display"].as_str().unwrap().ends_with("KB"));

    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/api/sheets/{sheet_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Moonlight Sonata");
    assert_eq!(body["owner_id"], owner.to_string());

    // Raw download returns the original bytes and content type.
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/sheets/{sheet_id}/pdf"))
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), pdf_bytes().as_slice());
}

#[tokio::test]
async fn sheet_create_rejects_non_pdf() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;
    let owner_str = owner.to_string();

    let (status, body) = multipart_request(
        &server.router,
        "POST",
        "/api/sheets",
        &[
            ("owner_id", owner_str.as_str()),
            ("title", "Bogus"),
            ("artist", "Nobody"),
            ("genre", "None"),
            ("instrument", "None"),
        ],
        Some(("notes.txt", "text/plain", b"just some text")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_failed");
}

#[tokio::test]
async fn oversize_pdf_rejected_against_configured_limit() {
    let server = TestServer::with_config(|c| c.files.max_pdf_size_bytes = 64).await;
    let owner = register_user(&server, "owner@example.com").await;
    let owner_str = owner.to_string();

    let mut big = b"%PDF-1.4 ".to_vec();
    big.resize(256, b'x');

    let (status, body) = multipart_request(
        &server.router,
        "POST",
        "/api/sheets",
        &[
            ("owner_id", owner_str.as_str()),
            ("title", "Big"),
            ("artist", "Nobody"),
            ("genre", "None"),
            ("instrument", "None"),
        ],
        Some(("big.pdf", "application/pdf", &big)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("too large"));
}

#[tokio::test]
async fn missing_sheet_maps_to_not_found() {
    let server = TestServer::new().await;
    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/api/sheets/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn sheet_update_and_delete() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;
    let created = create_sheet(&server, owner, "Etude", "Classical").await;
    let sheet_id = created["sheet_id"].as_str().unwrap().to_string();

    let (status, body) = json_request(
        &server.router,
        "PUT",
        &format!("/api/sheets/{sheet_id}"),
        Some(json!({ "title": "Etude Op. 10" })),
        Some(owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Etude Op. 10");
    assert_eq!(body["artist"], "Test Artist");

    let (status, _) = json_request(
        &server.router,
        "DELETE",
        &format!("/api/sheets/{sheet_id}"),
        None,
        Some(owner),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = json_request(
        &server.router,
        "GET",
        &format!("/api/sheets/{sheet_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_replacement_revalidates() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;
    let created = create_sheet(&server, owner, "Waltz", "Classical").await;
    let sheet_id = created["sheet_id"].as_str().unwrap().to_string();

    // A bad replacement is rejected and the original survives.
    let (status, _) = multipart_request(
        &server.router,
        "PUT",
        &format!("/api/sheets/{sheet_id}/file"),
        &[],
        Some(("evil.exe", "application/octet-stream", b"MZ...")),
        Some(owner),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = multipart_request(
        &server.router,
        "PUT",
        &format!("/api/sheets/{sheet_id}/file"),
        &[],
        Some(("waltz-v2.pdf", "application/pdf", b"%PDF-1.7 new edition")),
        Some(owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pdf_filename"], "waltz-v2.pdf");
}

#[tokio::test]
async fn favorites_flow_over_http() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;
    let fan = register_user(&server, "fan@example.com").await;
    let created = create_sheet(&server, owner, "Prelude", "Baroque").await;
    let sheet_id = created["sheet_id"].as_str().unwrap().to_string();

    let (status, _) = json_request(
        &server.router,
        "POST",
        &format!("/api/sheets/{sheet_id}/favorites?user_id={fan}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/api/sheets/{sheet_id}/is-favorite?user_id={fan}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_favorite"], true);

    // The owner cannot un-favorite their own sheet.
    let (status, body) = json_request(
        &server.router,
        "DELETE",
        &format!("/api/sheets/{sheet_id}/favorites?user_id={owner}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_operation");

    let (status, _) = json_request(
        &server.router,
        "DELETE",
        &format!("/api/sheets/{sheet_id}/favorites?user_id={fan}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/api/sheets/users/{fan}/favorites"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn owner_enforcement_gates_mutations_when_enabled() {
    let server = TestServer::with_config(|c| c.authorization.enforce_owner = true).await;
    let owner = register_user(&server, "owner@example.com").await;
    let stranger = register_user(&server, "stranger@example.com").await;
    let created = create_sheet(&server, owner, "Gymnopedie", "Classical").await;
    let sheet_id = created["sheet_id"].as_str().unwrap().to_string();

    let update = json!({ "title": "Renamed" });

    let (status, body) = json_request(
        &server.router,
        "PUT",
        &format!("/api/sheets/{sheet_id}"),
        Some(update.clone()),
        Some(stranger),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = json_request(
        &server.router,
        "PUT",
        &format!("/api/sheets/{sheet_id}"),
        Some(update.clone()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = json_request(
        &server.router,
        "PUT",
        &format!("/api/sheets/{sheet_id}"),
        Some(update),
        Some(owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
}

#[tokio::test]
async fn malformed_caller_header_is_bad_request() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;
    let created = create_sheet(&server, owner, "Aria", "Baroque").await;
    let sheet_id = created["sheet_id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/sheets/{sheet_id}"))
        .header("x-caller-id", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_reflects_owned_and_favorites() {
    let server = TestServer::new().await;
    let alice = register_user(&server, "alice@example.com").await;
    let bob = register_user(&server, "bob@example.com").await;

    create_sheet(&server, alice, "Mine", "Folk").await;
    let theirs = create_sheet(&server, bob, "Theirs", "Folk").await;
    let theirs_id = theirs["sheet_id"].as_str().unwrap();

    let (status, _) = json_request(
        &server.router,
        "POST",
        &format!("/api/sheets/{theirs_id}/favorites?user_id={alice}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/api/users/{alice}/profile"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owned_sheets"].as_array().unwrap().len(), 1);
    assert_eq!(body["owned_sheets"][0]["title"], "Mine");
    assert_eq!(body["favorite_sheets"].as_array().unwrap().len(), 1);
    assert_eq!(body["favorite_sheets"][0]["title"], "Theirs");
}

#[tokio::test]
async fn standalone_file_roundtrip() {
    let server = TestServer::new().await;
    let pdf = pdf_bytes();

    let (status, body) = multipart_request(
        &server.router,
        "POST",
        "/api/files",
        &[],
        Some(("upload.pdf", "application/pdf", &pdf)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["key"], "upload.pdf");
    assert_eq!(body["size"], pdf.len() as u64);

    let (status, body) = json_request(&server.router, "GET", "/api/files", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["upload.pdf"]));

    let request = Request::builder()
        .method("GET")
        .uri("/api/files/upload.pdf")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), pdf.as_slice());

    let (status, _) = json_request(
        &server.router,
        "DELETE",
        "/api/files/upload.pdf",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = json_request(&server.router, "GET", "/api/files/upload.pdf", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn traversal_filename_rejected_on_upload() {
    let server = TestServer::new().await;
    let pdf = pdf_bytes();

    let (status, _) = multipart_request(
        &server.router,
        "POST",
        "/api/files",
        &[],
        Some(("../escape.pdf", "application/pdf", &pdf)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_user_with_owned_sheets_is_conflict() {
    let server = TestServer::new().await;
    let owner = register_user(&server, "owner@example.com").await;
    create_sheet(&server, owner, "Keeper", "Folk").await;

    let (status, body) = json_request(
        &server.router,
        "DELETE",
        &format!("/api/users/{owner}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_operation");
}
