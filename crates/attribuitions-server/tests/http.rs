//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use attribuitions_commands::Registry;
use attribuitions_core::Storage;
use attribuitions_server::{attribuitions_router, AppState};

fn test_app() -> (Router, AppState) {
    let storage = Storage::open_in_memory().expect("Failed to open database");
    let state = AppState::new(Arc::new(storage), Arc::new(Registry::new()));
    (attribuitions_router(state.clone()), state)
}

fn request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn get_json(app: &Router, uri: &str, body: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request(Method::GET, uri, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_options_preflight() {
    let (app, _) = test_app();

    let response = app
        .oneshot(request(Method::OPTIONS, "/listTypes", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn test_list_types() {
    let (app, _) = test_app();

    let envelope = get_json(&app, "/listTypes", "").await;

    assert_eq!(envelope["status"], "success");
    let types = envelope["data"].as_array().unwrap();
    assert_eq!(types.len(), 11);
    assert!(types.iter().any(|t| t["name"] == "Music"));
}

#[tokio::test]
async fn test_unknown_command_is_not_found() {
    let (app, _) = test_app();

    let response = app
        .oneshot(request(Method::GET, "/frobnicate", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert_eq!(body_bytes(response).await, b"Not Found");
}

#[tokio::test]
async fn test_body_is_payload() {
    let (app, state) = test_app();

    let envelope = get_json(&app, "/addType", r#"{"name":"API"}"#).await;
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"], "done");

    assert_eq!(state.storage().count_types().unwrap(), 12);
    let listed = get_json(&app, "/listTypes", "").await;
    assert!(listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["name"] == "API"));
}

#[tokio::test]
async fn test_search_through_body() {
    let (app, _) = test_app();

    let credit = r#"{"name":"Forest Theme","filename":"forest.ogg","author":"Ze","link":"http://none","licence":"MIT","type":"Music"}"#;
    assert_eq!(
        get_json(&app, "/addAttribuition", credit).await["status"],
        "success"
    );

    let found = get_json(&app, "/listAttribuitions", r#"{"text":"forest"}"#).await;
    let rows = found["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["author"], "Ze");
    assert_eq!(rows[0]["licenceUrl"], "https://opensource.org/license/mit/");

    let missed = get_json(&app, "/listAttribuitions", r#"{"text":"desert"}"#).await;
    assert!(missed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_business_error_is_still_ok() {
    let (app, state) = test_app();

    let envelope = get_json(&app, "/addType", r#"{"name":""}"#).await;

    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "invalid value");
    assert!(envelope.get("data").is_none());
    assert_eq!(state.storage().count_types().unwrap(), 11);
}

#[tokio::test]
async fn test_non_get_methods_do_nothing() {
    let (app, state) = test_app();

    let response = app
        .oneshot(request(Method::POST, "/addType", r#"{"name":"API"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(state.storage().count_types().unwrap(), 11);
}

#[tokio::test]
async fn test_non_utf8_body_is_error_envelope() {
    let (app, state) = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/addType")
        .body(Body::from(vec![0xff_u8, 0xfe, b'{']))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let envelope: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(envelope["status"], "error");
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid payload: "));
    assert_eq!(state.storage().count_types().unwrap(), 11);
}

#[tokio::test]
async fn test_cors_headers_on_envelopes() {
    let (app, _) = test_app();

    let response = app
        .oneshot(request(Method::GET, "/listLicences", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type, Authorization"
    );
}
