use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use todolist_core::db::open_db_in_memory;
use todolist_server::{router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/todos",
        Some(json!({ "title": "Buy milk", "description": "2%" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["description"], "2%");
    let id = created["id"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let (status, listed) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/todos/{id}"),
        Some(json!({ "title": "Buy milk", "description": "whole" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({ "id": id, "title": "Buy milk", "description": "whole" })
    );

    let (status, confirmation) = send(&app, Method::DELETE, &format!("/todos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmation, json!({ "message": "Todo deleted successfully" }));

    let (status, listed) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));

    let (status, body) = send(&app, Method::DELETE, &format!("/todos/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Todo not found" }));
}

#[tokio::test]
async fn create_without_title_is_a_server_error_and_not_listed() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/todos",
        Some(json!({ "description": "no title" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Error creating todo" }));

    let (_, listed) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_without_description_stores_empty_string() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/todos", Some(json!({ "title": "t" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["description"], "");
}

#[tokio::test]
async fn update_unknown_id_is_not_found_and_creates_nothing() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/todos/{missing}"),
        Some(json!({ "title": "ghost", "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Todo not found" }));

    let (_, listed) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_id_is_a_server_error() {
    let app = app();

    let (status, body) = send(&app, Method::DELETE, "/todos/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Server error" }));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/todos/not-a-uuid",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn listing_keeps_every_created_item_with_distinct_ids() {
    let app = app();

    let mut ids = Vec::new();
    for n in 0..5 {
        let (status, created) = send(
            &app,
            Method::POST,
            "/todos",
            Some(json!({ "title": format!("item {n}"), "description": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let (_, listed) = send(&app, Method::GET, "/todos", None).await;
    let listed_ids: Vec<String> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed_ids, ids);

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/todos")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn file_backed_store_survives_new_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api.sqlite3");
    let connection_string = path.to_str().unwrap().to_string();

    let first = router(AppState::open(&connection_string).unwrap());
    let (status, created) = send(
        &first,
        Method::POST,
        "/todos",
        Some(json!({ "title": "durable", "description": "row" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    drop(first);

    let second = router(AppState::open(&connection_string).unwrap());
    let (_, listed) = send(&second, Method::GET, "/todos", None).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn unreadable_bodies_get_message_bodies() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/todos", None).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body, json!({ "message": "Error creating todo" }));

    let (status, body) = send(&app, Method::POST, "/todos", Some(json!({ "title": 5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "message": "Error creating todo" }));

    let (_, created) = send(&app, Method::POST, "/todos", Some(json!({ "title": "t" }))).await;
    let id = created["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/todos/{id}"),
        Some(json!({ "description": ["not", "text"] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "message": "Server error" }));

    let (_, listed) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_all_succeed_and_last_write_wins() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/todos", Some(json!({ "title": "t" }))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let writers: Vec<_> = (0..32)
        .map(|n| {
            let app = app.clone();
            let uri = format!("/todos/{id}");
            tokio::spawn(async move {
                send(&app, Method::PUT, &uri, Some(json!({ "title": format!("t{n}") }))).await
            })
        })
        .collect();

    let mut titles = Vec::new();
    for writer in writers {
        let (status, updated) = writer.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        titles.push(updated["title"].as_str().unwrap().to_string());
    }

    let (_, listed) = send(&app, Method::GET, "/todos", None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    let final_title = listed[0]["title"].as_str().unwrap();
    assert!(titles.iter().any(|title| title == final_title));
    assert_eq!(listed[0]["description"], "");
}
