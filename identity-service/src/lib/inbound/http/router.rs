use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::get_profile::get_profile;
use super::handlers::health::health;
use super::middleware::authenticate as auth_middleware;
use crate::domain::session::ports::AuthenticationServicePort;
use crate::domain::session::ports::TokenVerifier;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub authentication_service: Arc<dyn AuthenticationServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

pub fn create_router(
    authentication_service: Arc<dyn AuthenticationServicePort>,
    user_service: Arc<dyn UserServicePort>,
    token_verifier: Arc<dyn TokenVerifier>,
) -> Router {
    let state = AppState {
        authentication_service,
        user_service,
        token_verifier,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/v1/sessions", post(authenticate));

    let protected_routes = Router::new()
        .route("/api/v1/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
