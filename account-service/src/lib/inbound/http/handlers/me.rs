use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Returns the account the bearer token was issued for.
///
/// Only reachable behind the authentication middleware, which supplies the
/// identity.
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    tracing::info!(handler = "me", account_id = %identity.account_id, "Handling request");

    state
        .account_service
        .resolve_current_account(identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: i64,
    pub username: String,
}

impl From<&AccountProfile> for MeResponseData {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            id: profile.id.as_i64(),
            username: profile.username.as_str().to_string(),
        }
    }
}
