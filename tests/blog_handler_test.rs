mod common;

use axum::http::StatusCode;
use common::{setup_app, MultipartBody};
use serde_json::json;

const UNKNOWN_ID: &str = "507f1f77bcf86cd799439011";

#[tokio::test]
async fn test_create_blog_with_missing_category() {
    let app = setup_app().await;
    let (status, body) = app
        .send(
            "POST",
            "/api/blog",
            Some(json!({ "name": "Hello", "description": "First post", "categoryId": UNKNOWN_ID })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Category not found"));
    assert_eq!(body["error"]["details"], json!("No category with provided ID"));
}

#[tokio::test]
async fn test_create_blog_with_malformed_category_id() {
    let app = setup_app().await;
    let (status, body) = app
        .send(
            "POST",
            "/api/blog",
            Some(json!({ "name": "Hello", "description": "First post", "categoryId": "abc" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid category ID format"));
}

#[tokio::test]
async fn test_create_blog_missing_fields() {
    let app = setup_app().await;
    let (status, body) = app.send("POST", "/api/blog", Some(json!({ "name": "Hello" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Missing required fields"));
    assert_eq!(body["error"]["details"], json!("Name, description, and categoryId are required"));
}

#[tokio::test]
async fn test_blog_list_and_get_expand_category() {
    let app = setup_app().await;
    let category_id = app.create("category", json!({ "name": "Travel", "description": "Trips" })).await;
    let blog_id = app
        .create("blog", json!({ "name": "  Lisbon  ", "description": "Tiles", "categoryId": category_id }))
        .await;

    let (status, body) = app.send("GET", "/api/blog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Blogs fetched successfully"));
    let blog = &body["data"][0];
    assert_eq!(blog["name"], json!("Lisbon"));
    assert_eq!(blog["categoryId"]["_id"], json!(category_id));
    assert_eq!(blog["categoryId"]["slug"], json!("travel"));

    let (status, body) = app.send("GET", &format!("/api/blog/{}", blog_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["categoryId"]["name"], json!("Travel"));
}

#[tokio::test]
async fn test_blog_with_deleted_category_expands_to_null() {
    let app = setup_app().await;
    let category_id = app.create("category", json!({ "name": "Travel", "description": "Trips" })).await;
    let blog_id = app
        .create("blog", json!({ "name": "Lisbon", "description": "Tiles", "categoryId": category_id }))
        .await;

    let (status, _) = app.send("DELETE", &format!("/api/category/{}", category_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send("GET", &format!("/api/blog/{}", blog_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["categoryId"].is_null());
}

#[tokio::test]
async fn test_update_blog_returns_raw_record() {
    let app = setup_app().await;
    let category_id = app.create("category", json!({ "name": "Travel", "description": "Trips" })).await;
    let blog_id = app
        .create("blog", json!({ "name": "Lisbon", "description": "Tiles", "categoryId": category_id }))
        .await;

    let (status, body) = app
        .send("PUT", &format!("/api/blog/{}", blog_id), Some(json!({ "description": "Tiles and tarts" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Blog updated successfully"));
    assert_eq!(body["data"]["description"], json!("Tiles and tarts"));
    assert_eq!(body["data"]["categoryId"], json!(category_id));

    let (status, _) = app
        .send("PUT", &format!("/api/blog/{}", blog_id), Some(json!({ "categoryId": "nope" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blog_malformed_and_unknown_id() {
    let app = setup_app().await;
    let (status, body) = app.send("GET", "/api/blog/xyz", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid blog ID format"));

    let (status, body) = app.send("DELETE", &format!("/api/blog/{}", UNKNOWN_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Blog not found"));
}

#[tokio::test]
async fn test_multipart_blog_with_image() {
    let app = setup_app().await;
    let category_id = app.create("category", json!({ "name": "Travel", "description": "Trips" })).await;
    let body = MultipartBody::new()
        .text("name", "Lisbon")
        .text("description", "Tiles")
        .text("categoryId", &category_id)
        .file("image", "tram.jpg", "image/jpeg", b"\xff\xd8\xff\xe0tram")
        .finish();

    let (status, json) = app.send_multipart("POST", "/api/blog", body).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    let image = json["data"]["image"].as_str().unwrap();
    assert!(image.ends_with(".jpg"));
    assert!(app.upload_dir.path().join(image).exists());
}
