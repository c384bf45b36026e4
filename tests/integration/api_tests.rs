//! API integration tests
//!
//! Drive the router in-process, one request at a time.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_api::{config::AppConfig, create_router, repository::Repository, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default(), Repository::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create(app: &Router, payload: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"]
        .as_str()
        .expect("No book ID")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_reports_server_and_shelf() {
    let app = app();
    create(&app, book("Buku A", 10, 1, false)).await;

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["books"], 1);
    assert_eq!(body["host"], "0.0.0.0");
    assert_eq!(body["port"], 9000);
}

#[tokio::test]
async fn test_flag_query_must_be_exactly_one() {
    let app = app();
    create(&app, book("Selesai", 10, 10, false)).await;

    let (_, body) = send(&app, Method::GET, "/books?finished=%201", None).await;
    assert_eq!(body["data"]["books"], json!([]));

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(book("Buku A", 100, 25, false))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    assert_eq!(body["data"]["bookId"].as_str().unwrap().len(), 16);
}

#[tokio::test]
async fn test_create_book_without_name() {
    let app = app();

    let mut payload = book("", 100, 25, false);
    let (status, body) = send(&app, Method::POST, "/books", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    payload.as_object_mut().unwrap().remove("name");
    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_create_book_read_page_over_page_count() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(book("Buku A", 80, 90, false))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_books_projection_and_order() {
    let app = app();
    let first = create(&app, book("Satu", 10, 0, false)).await;
    let second = create(&app, book("Dua", 10, 0, false)).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["id"], first.as_str());
    assert_eq!(books[1]["id"], second.as_str());
    assert_eq!(
        books[0],
        json!({ "id": first, "name": "Satu", "publisher": "Dicoding Indonesia" })
    );
}

#[tokio::test]
async fn test_list_books_filters() {
    let app = app();
    create(&app, book("Belajar Dicoding", 100, 100, false)).await;
    create(&app, book("Rust Programming", 100, 10, true)).await;
    create(&app, book("Kisah dicoding", 100, 0, false)).await;

    let names = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = send(&app, Method::GET, "/books?name=DICODING", None).await;
    assert_eq!(names(&body), vec!["Belajar Dicoding", "Kisah dicoding"]);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(names(&body), vec!["Belajar Dicoding"]);

    let (_, body) = send(&app, Method::GET, "/books?finished=0", None).await;
    assert_eq!(names(&body), vec!["Rust Programming", "Kisah dicoding"]);

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(names(&body), vec!["Rust Programming"]);

    // name takes precedence over the other criteria
    let (_, body) = send(&app, Method::GET, "/books?name=rust&finished=1", None).await;
    assert_eq!(names(&body), vec!["Rust Programming"]);
}

#[tokio::test]
async fn test_get_book() {
    let app = app();
    let id = create(&app, book("Buku A", 100, 25, true)).await;

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let stored = &body["data"]["book"];
    assert_eq!(stored["id"], id.as_str());
    assert_eq!(stored["name"], "Buku A");
    assert_eq!(stored["year"], 2010);
    assert_eq!(stored["author"], "John Doe");
    assert_eq!(stored["pageCount"], 100);
    assert_eq!(stored["readPage"], 25);
    assert_eq!(stored["finished"], false);
    assert_eq!(stored["reading"], true);
    assert_eq!(stored["insertedAt"], stored["updatedAt"]);
}

#[tokio::test]
async fn test_untyped_fields_pass_through() {
    let app = app();
    let mut payload = book("Buku A", 100, 25, false);
    payload["year"] = json!("2010");
    payload["author"] = json!(42);
    payload["publisher"] = json!(null);

    let id = create(&app, payload).await;

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["book"]["year"], "2010");
    assert_eq!(body["data"]["book"]["author"], 42);
    assert_eq!(body["data"]["book"]["publisher"], Value::Null);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(
        body["data"]["books"][0],
        json!({ "id": id, "name": "Buku A", "publisher": null })
    );
}

#[tokio::test]
async fn test_get_book_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/xxxxx", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_get_marks_fully_read_book() {
    let app = app();
    let id = create(&app, book("Buku A", 100, 10, true)).await;

    let (status, _) = send(&app, Method::PUT, &format!("/books/{}", id), Some(book("Buku A", 100, 100, true))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"], json!([]));

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["finished"], true);
    assert_eq!(body["data"]["book"]["reading"], false);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, book("Buku A", 100, 25, false)).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(book("Buku A Revisi", 200, 150, true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let stored = &after["data"]["book"];
    assert_eq!(stored["name"], "Buku A Revisi");
    assert_eq!(stored["pageCount"], 200);
    assert_eq!(stored["readPage"], 150);
    assert_eq!(stored["insertedAt"], before["data"]["book"]["insertedAt"]);
    assert_ne!(stored["updatedAt"], before["data"]["book"]["updatedAt"]);
}

#[tokio::test]
async fn test_update_book_failures() {
    let app = app();
    let id = create(&app, book("Buku A", 100, 25, false)).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::PUT, "/books/xxxxx", Some(book("Buku", 1, 1, false))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    let (status, body) = send(&app, Method::PUT, &uri, Some(book("", 100, 25, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (status, body) = send(&app, Method::PUT, &uri, Some(book("Buku A", 100, 101, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["book"]["name"], "Buku A");
    assert_eq!(body["data"]["book"]["readPage"], 25);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let a = create(&app, book("Book A", 100, 100, false)).await;
    let b = create(&app, book("Book B", 100, 50, false)).await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", a), None).await;
    assert_eq!(body["data"]["book"]["finished"], true);
    let (_, body) = send(&app, Method::GET, &format!("/books/{}", b), None).await;
    assert_eq!(body["data"]["book"]["finished"], false);

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", a), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Book B");

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", a), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}
