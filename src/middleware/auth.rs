use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the token on protected routes (`Token`, matched case-insensitively)
pub const TOKEN_HEADER: &str = "token";

/// Authenticated caller extracted from the token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { username: claims.sub }
    }
}

/// Rejects the request with 401 unless the `Token` header holds a valid token.
/// Runs before the handler, so nothing touches the store for unauthenticated calls.
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_headers(&headers)?;
    let claims = state.tokens.validate(token)?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated request for {}", auth_user.username);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(TOKEN_HEADER).ok_or(AuthError::MissingToken)?;
    let token = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("header is not valid ASCII".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
