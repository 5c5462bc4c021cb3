mod common;

use axum::http::StatusCode;
use common::{setup_app, MultipartBody};
use http_body_util::BodyExt;
use serde_json::json;

const UNKNOWN_ID: &str = "507f1f77bcf86cd799439011";

fn ada() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "age": 36,
        "phone": "555-0100"
    })
}

#[tokio::test]
async fn test_create_user_handler() {
    let app = setup_app().await;
    let (status, body) = app.send("POST", "/api/user", Some(ada())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User created successfully"));
    assert_eq!(body["data"]["email"], json!("ada@example.com"));
    assert_eq!(body["data"]["role"], json!("user"));
    assert_eq!(body["data"]["_id"].as_str().unwrap().len(), 24);
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = setup_app().await;
    let (status, body) = app
        .send("POST", "/api/user", Some(json!({ "name": "Ada", "email": "ada@example.com" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Missing required fields"));
    assert_eq!(body["error"]["code"], json!(400));
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = setup_app().await;
    let mut user = ada();
    user["email"] = json!("not-an-email");
    let (status, body) = app.send("POST", "/api/user", Some(user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed"));
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = setup_app().await;
    app.create("user", ada()).await;

    let (status, body) = app.send("POST", "/api/user", Some(ada())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("User with this email already exists"));
    assert_eq!(body["error"], json!({ "code": 409, "details": "Duplicate email" }));
}

#[tokio::test]
async fn test_list_and_get_user_handler() {
    let app = setup_app().await;
    let id = app.create("user", ada()).await;

    let (status, body) = app.send("GET", "/api/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Users fetched successfully"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app.send("GET", &format!("/api/user/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User fetched successfully"));
    assert_eq!(body["data"]["_id"], json!(id));
}

#[tokio::test]
async fn test_user_malformed_and_unknown_id() {
    let app = setup_app().await;
    for method in ["GET", "PUT", "DELETE"] {
        let body = (method == "PUT").then(|| json!({ "name": "X" }));
        let (status, json) = app.send(method, "/api/user/not-an-id", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} malformed", method);
        assert_eq!(json["message"], json!("Invalid user ID format"));

        let (status, json) = app.send(method, &format!("/api/user/{}", UNKNOWN_ID), body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} unknown", method);
        assert_eq!(json["message"], json!("User not found"));
        assert_eq!(json["error"]["details"], json!("No user with given ID"));
    }
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = setup_app().await;
    let id = app.create("user", ada()).await;

    let (status, body) = app
        .send("PUT", &format!("/api/user/{}", id), Some(json!({ "phone": "555-0199" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User updated successfully"));
    assert_eq!(body["data"]["phone"], json!("555-0199"));
    assert_eq!(body["data"]["name"], json!("Ada Lovelace"));
    assert_eq!(body["data"]["age"], json!(36));
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts() {
    let app = setup_app().await;
    app.create("user", ada()).await;
    let mut grace = ada();
    grace["email"] = json!("grace@example.com");
    let id = app.create("user", grace).await;

    let (status, _) = app
        .send("PUT", &format!("/api/user/{}", id), Some(json!({ "email": "ada@example.com" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = setup_app().await;
    let id = app.create("user", ada()).await;
    let uri = format!("/api/user/{}", id);

    let (status, body) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User deleted successfully"));
    assert_eq!(body["data"]["email"], json!("ada@example.com"));

    let (status, _) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_multipart_create_with_image() {
    let app = setup_app().await;
    let body = MultipartBody::new()
        .text("name", "Ada Lovelace")
        .text("email", "ada@example.com")
        .text("age", "36")
        .text("phone", "555-0100")
        .file("image", "portrait.png", "image/png", b"\x89PNG\r\n\x1a\nportrait")
        .finish();

    let (status, json) = app.send_multipart("POST", "/api/user", body).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    assert_eq!(json["data"]["age"], json!(36));
    let image = json["data"]["image"].as_str().unwrap().to_string();
    assert!(image.ends_with(".png"));

    let (status, content_type, bytes) = app.get_raw(&format!("/uploads/{}", image)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(bytes, b"\x89PNG\r\n\x1a\nportrait");
}

#[tokio::test]
async fn test_multipart_rejects_non_image_upload() {
    let app = setup_app().await;
    let body = MultipartBody::new()
        .text("name", "Ada Lovelace")
        .text("email", "ada@example.com")
        .text("age", "36")
        .text("phone", "555-0100")
        .file("image", "notes.txt", "text/plain", b"hello")
        .finish();

    let (status, json) = app.send_multipart("POST", "/api/user", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], json!("Invalid upload"));
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_malformed_json_body_is_enveloped() {
    let app = setup_app().await;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/user")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{oops"))
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["success"], json!(false));
}

#[tokio::test]
async fn test_large_age_is_accepted() {
    let app = setup_app().await;
    let mut user = ada();
    user["age"] = json!(207);
    let (status, body) = app.send("POST", "/api/user", Some(user)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["age"], json!(207));
}
