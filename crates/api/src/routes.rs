use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{handlers, AppState};

pub const X_BLOCKCHAIN_IDS: &str = "x-blockchain-ids";
pub const X_ACTION_VERSION: &str = "x-action-version";

pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Content-Encoding, Accept-Encoding";

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/actions.json", get(handlers::actions_json))

        // Blinks
        .route(
            "/api/scan",
            get(handlers::scan_metadata).post(handlers::scan_action),
        )
        .route(
            "/api/token",
            get(handlers::token_metadata).post(handlers::token_action),
        )

        // Front-end
        .route("/api/audit/:address", get(handlers::audit_wallet))
        .fallback_service(ServeDir::new(static_dir))

        .layer(TraceLayer::new_for_http())
        // Answers every OPTIONS request with 200
        .layer(cors_layer())
        .layer(middleware::from_fn_with_state(state.clone(), action_headers))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::CONTENT_ENCODING,
            header::ACCEPT_ENCODING,
        ])
        .expose_headers([
            HeaderName::from_static(X_BLOCKCHAIN_IDS),
            HeaderName::from_static(X_ACTION_VERSION),
        ])
}

/// Stamps the Actions protocol headers on every response
///
/// `CorsLayer` sends the allowed methods and headers on preflight responses only.
async fn action_headers(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    if let Ok(value) = HeaderValue::from_str(&state.config.actions.blockchain_id) {
        headers.insert(X_BLOCKCHAIN_IDS, value);
    }
    if let Ok(value) = HeaderValue::from_str(&state.config.actions.action_version) {
        headers.insert(X_ACTION_VERSION, value);
    }

    response
}
