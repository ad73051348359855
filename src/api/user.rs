//! # User API Module
//!
//! User registration and profile lookup.

use serde::{Deserialize, Serialize};

use super::{ApiSettings, errors::ApiError, record_activity, validation};
use crate::{metric, models, repo, services};

/// Registration input. Missing or null fields are read as empty strings
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "validation::null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "validation::null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "validation::null_as_empty")]
    pub password: String,
}

impl RegisterRequest {
    /// Name with content, well formed email and a non empty password
    pub fn fields_are_valid(&self) -> bool {
        validation::is_filled(&self.name)
            && validation::is_valid_email(&self.email)
            && !self.password.is_empty()
    }
}

/// Creates a new user from the registration input.
///
/// The email is looked up before hashing the password; the UNIQUE constraint
/// still rejects a concurrent registration of the same email at insert time.
///
/// # Errors
/// [ApiError::InvalidUserData] for a wrong input shape and
/// [ApiError::UserAlreadyExists] if the email is taken.
#[tracing::instrument(skip_all)]
pub async fn register(
    request: &RegisterRequest,
    repo: &repo::ImplAppRepo,
    activity_log: &services::ImplActivityLog,
) -> Result<models::user::PublicUser, ApiError> {
    if !request.fields_are_valid() {
        return Err(ApiError::InvalidUserData);
    }

    if repo.get_user_by_email(&request.email).await?.is_some() {
        return Err(ApiError::UserAlreadyExists);
    }

    let new_user =
        models::user::NewUser::new(&request.name, &request.email, &request.password).await?;

    let user_id = match repo.insert_user(&new_user).await {
        Ok(user_id) => user_id,
        Err(e) if e.downcast_ref::<repo::RepoError>() == Some(&repo::RepoError::DuplicatedEmail) => {
            return Err(ApiError::UserAlreadyExists);
        }
        Err(e) => return Err(e.into()),
    };

    record_activity(
        activity_log,
        models::activity::ActivityEvent::new(
            user_id,
            models::activity::ActivityAction::UserCreated,
        ),
    )
    .await;
    metric::incr_user_action_statds("create_user");

    // a new user has no avatar yet
    Ok(models::user::PublicUser {
        id: user_id,
        name: new_user.name,
        email: new_user.email,
        avatar: None,
    })
}

/// Retrieves the public profile of `user_id`
#[tracing::instrument(skip_all)]
pub async fn get_profile(
    user_id: i64,
    repo: &repo::ImplAppRepo,
    settings: &ApiSettings,
) -> Result<models::user::PublicUser, ApiError> {
    repo.get_user_by_id(user_id)
        .await?
        .map(|user| user.to_public(&settings.files_base_url))
        .ok_or(ApiError::UserNotFound)
}
