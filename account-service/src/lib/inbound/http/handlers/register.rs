use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    tracing::info!(handler = "register", "Handling request");
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .account_service
        .register(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: i64,
    pub username: String,
}

impl From<&AccountProfile> for RegisterResponseData {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            id: profile.id.as_i64(),
            username: profile.username.as_str().to_string(),
        }
    }
}
