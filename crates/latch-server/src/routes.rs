//! Router and request handlers.

use crate::error::ApiError;
use crate::middleware::auth::require_bearer;
use crate::state::AppState;
use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    middleware,
    routing::{get, post},
};
use chrono::Utc;
use latch_token::{Token, TokenClaims, TokenError, parse_basic_header};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/auth/whoami", get(whoami))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/auth/login", post(login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Exchange a Basic Authorization header for a bearer token.
async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Token>), ApiError> {
    let header_value = match headers.get(header::AUTHORIZATION) {
        Some(v) => Some(v.to_str().map_err(|_| TokenError::AuthMalformed)?),
        None => None,
    };

    let credentials = parse_basic_header(header_value)?;

    if !state.store.verify(&credentials) {
        tracing::warn!(username = %credentials.username, "login rejected by credential store");
        return Err(TokenError::InvalidCredentials.into());
    }

    let token = state
        .codec
        .encode(&credentials, Utc::now(), state.token_ttl_seconds)?;
    tracing::info!(
        username = %credentials.username,
        expires_in = token.expires_in,
        "issued token"
    );

    Ok((StatusCode::CREATED, Json(token)))
}

/// Return the claims of the presented bearer token.
async fn whoami(Extension(claims): Extension<TokenClaims>) -> Json<TokenClaims> {
    Json(claims)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "latch-server" }))
}
