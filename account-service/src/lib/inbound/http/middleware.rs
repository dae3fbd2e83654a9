use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the identity recovered from a valid token.
///
/// Lives only in the extensions of the request it was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Reasons the gate turns a request away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedCredential,

    #[error("Invalid or expired token")]
    InvalidToken,
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Middleware that validates bearer tokens and adds the identity to request extensions.
///
/// Rejected requests never reach the downstream handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).inspect_err(|e| {
        tracing::warn!(reason = %e, "Request rejected by authentication gate");
    })?;

    let account_id: AccountId = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Token validation failed");
        GateError::InvalidToken
    })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(GateError::MissingCredential)?
        .to_str()
        .map_err(|_| GateError::MalformedCredential)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(GateError::MalformedCredential)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(GateError::MalformedCredential);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(GateError::MissingCredential)
        );
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));

        let headers = headers_with("bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_other_schemes_rejected() {
        let headers = headers_with("Basic YWxpY2U6cHcx");
        assert_eq!(bearer_token(&headers), Err(GateError::MalformedCredential));

        let headers = headers_with("abc.def.ghi");
        assert_eq!(bearer_token(&headers), Err(GateError::MalformedCredential));

        let headers = headers_with("Bearer ");
        assert_eq!(bearer_token(&headers), Err(GateError::MalformedCredential));
    }

    #[test]
    fn test_gate_errors_are_unauthorized() {
        assert!(matches!(
            ApiError::from(GateError::InvalidToken),
            ApiError::Unauthorized(_)
        ));
    }
}
