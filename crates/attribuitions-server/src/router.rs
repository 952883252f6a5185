use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use attribuitions_commands::{format_json, Registry};
use attribuitions_core::Storage;

/// Shared by every request; both members are read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    storage: Arc<Storage>,
    registry: Arc<Registry>,
}

impl AppState {
    pub fn new(storage: Arc<Storage>, registry: Arc<Registry>) -> Self {
        Self { storage, registry }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

/// A single catch-all handler with permissive CORS on every response.
pub fn attribuitions_router(state: AppState) -> Router {
    Router::new()
        .fallback(handle_command)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .with_state(state)
}

async fn handle_command(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    log::info!("{} {}", method, uri.path());

    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    if method != Method::GET {
        return json_response(Vec::new());
    }

    let command = uri.path().trim_start_matches('/').to_string();
    if !state.registry.contains(&command) {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    // The body is the payload; bytes that are not text are a payload error.
    let payload = match String::from_utf8(body.to_vec()) {
        Ok(payload) => payload,
        Err(err) => {
            log::warn!("Rejected {} payload: {}", command, err);
            return json_response(format_json::<(), _>(&Err(format!(
                "invalid payload: {}",
                err.utf8_error()
            ))));
        }
    };

    let args = vec![String::new(), command, payload];
    let dispatched =
        tokio::task::spawn_blocking(move || state.registry.dispatch(&state.storage, &args)).await;

    match dispatched {
        Ok(envelope) => json_response(envelope),
        Err(err) => {
            log::error!("Command task failed: {}", err);
            json_response(format_json::<(), _>(&Err("internal error")))
        }
    }
}

fn json_response(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(body),
    )
        .into_response()
}
