use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use hhub_server::Server;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    Server::builder()
        .database_url("sqlite::memory:")
        .seed(true)
        .build()
        .await
        .expect("server")
        .router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json") };
    (status, value)
}

#[tokio::test]
async fn index_serves_html() {
    let app = app().await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert_eq!(&bytes[..], b"<h1>Code challenge</h1>");
}

#[tokio::test]
async fn health_reports_up() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn list_heroes_omits_powers() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/heroes", None).await;

    assert_eq!(status, StatusCode::OK);
    let heroes = body.as_array().expect("array");
    assert_eq!(heroes.len(), 10);
    assert_eq!(heroes[0], json!({ "id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel" }));
    assert!(heroes.iter().all(|hero| hero.get("powers").is_none()));
}

#[tokio::test]
async fn get_hero_includes_derived_powers() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/heroes/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["super_name"], "Ms. Marvel");
    let powers = body["powers"].as_array().expect("powers");
    assert_eq!(powers.len(), 2);
    assert_eq!(
        powers[0],
        json!({ "id": 1, "name": "super strength", "description": "gives the wielder super-human strengths" })
    );
    assert!(powers.iter().all(|power| power.get("hero_powers").is_none()));
}

#[tokio::test]
async fn unknown_hero_is_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/heroes/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Hero not found" }));
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/heroes/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["Invalid request"] }));
}

#[tokio::test]
async fn list_and_get_powers() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/powers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(4));

    let (status, body) = send(&app, Method::GET, "/powers/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "flight");

    let (status, body) = send(&app, Method::GET, "/powers/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Power not found" }));
}

#[tokio::test]
async fn short_description_is_422_and_not_stored() {
    let app = app().await;
    let (_, before) = send(&app, Method::GET, "/powers/1", None).await;

    let (status, body) =
        send(&app, Method::PATCH, "/powers/1", Some(json!({ "description": "short" }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Description must be at least 20 characters long"] }));
    let (_, after) = send(&app, Method::GET, "/powers/1", None).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn long_description_is_saved_and_echoed() {
    let app = app().await;
    let description = "Valid Updated Description that is long enough";

    let (status, body) =
        send(&app, Method::PATCH, "/powers/1", Some(json!({ "description": description }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "super strength", "description": description }));
    let (_, stored) = send(&app, Method::GET, "/powers/1", None).await;
    assert_eq!(stored["description"], description);
}

#[tokio::test]
async fn patch_without_description_is_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::PATCH, "/powers/1", Some(json!({ "name": "x" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["Invalid request"] }));
}

#[tokio::test]
async fn patch_unknown_power_is_404() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/powers/999",
        Some(json!({ "description": "long enough to pass the rule" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Power not found" }));
}

#[tokio::test]
async fn patch_with_null_description_is_400() {
    let app = app().await;
    let (status, body) =
        send(&app, Method::PATCH, "/powers/1", Some(json!({ "description": null }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["Invalid request"] }));
}

#[tokio::test]
async fn patch_unknown_power_is_404_even_with_unparseable_body() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/powers/999")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/powers/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_hero_power_returns_nested_view() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/hero_powers",
        Some(json!({ "strength": "Average", "hero_id": 1, "power_id": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["strength"], "Average");
    assert_eq!(body["hero_id"], 1);
    assert_eq!(body["power_id"], 1);
    assert_eq!(body["hero"], json!({ "id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel" }));
    assert_eq!(body["power"]["name"], "super strength");
    assert!(body["hero"].get("hero_powers").is_none());

    let (_, hero) = send(&app, Method::GET, "/heroes/1", None).await;
    assert_eq!(hero["powers"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn invalid_strength_is_422() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/hero_powers",
        Some(json!({ "strength": "Medium", "hero_id": 1, "power_id": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Strength must be 'Strong', 'Weak', or 'Average'"] }));
}

#[tokio::test]
async fn unknown_hero_on_create_is_422() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/hero_powers",
        Some(json!({ "strength": "Strong", "hero_id": 999, "power_id": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Hero not found"] }));
}

#[tokio::test]
async fn unknown_power_on_create_is_422() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/hero_powers",
        Some(json!({ "strength": "Strong", "hero_id": 1, "power_id": 999 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Power not found"] }));
}

#[tokio::test]
async fn missing_strength_is_422_before_ids_are_checked() {
    let app = app().await;

    let (status, body) =
        send(&app, Method::POST, "/hero_powers", Some(json!({ "hero_id": 1, "power_id": 1 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Strength must be 'Strong', 'Weak', or 'Average'"] }));

    let (status, _) = send(&app, Method::POST, "/hero_powers", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_ids_or_bad_json_are_400() {
    let app = app().await;

    let (status, body) =
        send(&app, Method::POST, "/hero_powers", Some(json!({ "strength": "Strong" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["Invalid request"] }));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/hero_powers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_docs_are_served() {
    let app = app().await;
    let response = app
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}
