//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! [`api_router`] assembles them under `/api` with the shared layers.

pub mod membership;
pub mod middleware;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use membership::membership_router;
pub use membership::MembershipAppState;
pub use middleware::{auth_middleware, AuthState};

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty or `*` allows any origin.
    pub cors_origins: Vec<String>,
}

/// Builds the complete `/api` router.
pub fn api_router(state: MembershipAppState, validator: AuthState, settings: &HttpSettings) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(membership_router())
        .with_state(state)
        .layer(from_fn_with_state(validator, auth_middleware));

    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&settings.cors_origins))
            .layer(TimeoutLayer::new(settings.request_timeout)),
    )
}

/// GET /api/health
async fn health() -> Json<membership::HealthResponse> {
    Json(membership::HealthResponse {
        status: "ok".to_string(),
    })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}
