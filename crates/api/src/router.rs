//! HTTP entry point for the movie service.
//!
//! [`build_app_router`] is the only place routes and middleware are put
//! together; the binary and the integration tests both call it.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Correlation id attached to every request and echoed on the response.
pub const CORRELATION_ID_HEADER: &str = "x-request-id";

/// Methods the movie routes answer to, advertised in CORS preflights.
const MOVIE_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// Assemble `/health`, the `/api/v1` movie routes and the middleware around
/// them. CORS origins and the request timeout come from `state.config`.
///
/// Outermost first, a request passes CORS, gets a correlation id, opens a
/// trace span, and then runs under the timeout and panic guard. The id is
/// copied onto the response before the span closes.
pub fn build_app_router(state: AppState) -> Router {
    let config = &state.config;
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let cors = build_cors_layer(config);
    let correlation_id = HeaderName::from_static(CORRELATION_ID_HEADER);

    let traced = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(PropagateRequestIdLayer::new(correlation_id.clone()))
        .layer(traced)
        .layer(SetRequestIdLayer::new(correlation_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// CORS policy allowing the configured browser origins to call the movie
/// routes with JSON bodies.
///
/// An origin that is not a valid header value aborts startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(MOVIE_METHODS)
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
