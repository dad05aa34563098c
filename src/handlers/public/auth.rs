use axum::{extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// GET /auth - exchange the `Username` / `Password` headers for a token
pub async fn token_get(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<TokenResponse> {
    let username = header_str(&headers, "username");
    let password = header_str(&headers, "password");

    let principal = state
        .credentials
        .verify(username, password)
        .ok_or_else(|| {
            tracing::warn!("Rejected credentials for user '{}'", username);
            AuthError::InvalidCredentials
        })?;

    let token = state.tokens.issue(&principal)?;
    tracing::info!("Issued token for {}", principal.username);

    Ok(ApiResponse::success(TokenResponse {
        token,
        expires_in: state.tokens.expires_in(),
    }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}
