use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use latch_token::TokenError;
use std::sync::Arc;

/// Axum middleware requiring a valid latch bearer token.
///
/// The full Authorization value (`Bearer ...`) is the token. On success the
/// decoded `TokenClaims` are inserted into the request extensions.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = authorization(req.headers())?.ok_or(TokenError::AuthEmpty)?;

    let claims = state
        .codec
        .decode(&token, Utc::now())
        .inspect_err(|e| tracing::debug!(code = e.code(), error = %e, "bearer token rejected"))?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// The trimmed Authorization header, if present and non-empty.
fn authorization(headers: &HeaderMap) -> Result<Option<String>, TokenError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| TokenError::TokenMalformed)?.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value.to_string()))
}
