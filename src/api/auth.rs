//! # Auth API Module
//!
//! Password login and the signed session tokens it hands out. Tokens are
//! stateless HS256 JWTs carrying the user id; nothing is stored server side.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{ApiSettings, errors::ApiError, record_activity, validation};
use crate::{metric, models, repo, services};

/// Claims embedded in the session token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Login input. Missing or null fields are read as empty strings
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct SessionRequest {
    #[serde(default, deserialize_with = "validation::null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "validation::null_as_empty")]
    pub password: String,
}

impl SessionRequest {
    pub fn fields_are_valid(&self) -> bool {
        validation::is_valid_email(&self.email) && !self.password.is_empty()
    }
}

#[derive(Serialize, Debug)]
pub struct SessionResponse {
    pub user: models::user::PublicUser,
    pub token: String,
}

/// Signs a token for `user_id` valid for the configured lifetime
pub fn issue_token(user_id: i64, settings: &ApiSettings) -> anyhow::Result<String> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(settings.token_expires_in)
        .ok_or_else(|| anyhow::anyhow!("token expiration is out of range"))?;
    let claims = Claims {
        id: user_id,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    Ok(jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.token_secret.as_bytes()),
    )?)
}

/// Checks signature and expiration of `token` and returns its claims
pub fn verify_token(token: &str, settings: &ApiSettings) -> Result<Claims, ApiError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.token_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::info!("session token rejected: {e}");
        ApiError::InvalidToken
    })
}

/// Logs a user in with email and password.
///
/// # Process
/// 1. Validate the input shape
/// 2. Find the user by exact email, avatar included
/// 3. Verify the password against the stored hash
/// 4. Sign the session token
///
/// # Errors
/// [ApiError::ValidationFails], [ApiError::UserNotFound] or
/// [ApiError::PasswordMismatch]; repository failures become
/// [ApiError::Internal].
#[tracing::instrument(skip_all)]
pub async fn authenticate(
    request: &SessionRequest,
    repo: &repo::ImplAppRepo,
    activity_log: &services::ImplActivityLog,
    settings: &ApiSettings,
) -> Result<SessionResponse, ApiError> {
    if !request.fields_are_valid() {
        return Err(ApiError::ValidationFails);
    }

    let Some(user) = repo.get_user_by_email(&request.email).await? else {
        metric::incr_user_action_statds("login_failed");
        return Err(ApiError::UserNotFound);
    };

    if !user.verify_password(&request.password).await? {
        metric::incr_user_action_statds("login_failed");
        return Err(ApiError::PasswordMismatch);
    }

    let token = issue_token(user.id, settings)?;

    record_activity(
        activity_log,
        models::activity::ActivityEvent::new(
            user.id,
            models::activity::ActivityAction::SessionCreated,
        ),
    )
    .await;
    metric::incr_user_action_statds("login");

    Ok(SessionResponse {
        user: user.to_public(&settings.files_base_url),
        token,
    })
}
