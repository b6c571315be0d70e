use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::session::errors::AuthenticationError;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::Credentials;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    state
        .authentication_service
        .authenticate(body.try_into_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for opening a session (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

impl AuthenticateRequestBody {
    /// Blank fields are answered exactly like bad credentials.
    fn try_into_credentials(self) -> Result<Credentials, ApiError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthenticationError::InvalidCredentials.into());
        }
        Ok(Credentials::new(self.email, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub user: UserData,
    pub token: String,
}

impl From<AuthenticatedSession> for AuthenticateResponseData {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.into_inner(),
        }
    }
}
