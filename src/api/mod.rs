//! # API Module
//!
//! Business logic behind the HTTP endpoints. Each operation receives the
//! repository, the activity log and the [ApiSettings] it needs, and returns
//! either its payload or an [errors::ApiError].
//!
//! ## Modules
//!
//! - [`auth`] - Password login and session token handling
//! - [`errors`] - Failures the endpoints can answer with
//! - [`user`] - User registration and profile lookup
//! - [`validation`] - Input shape checks shared by the request types

pub mod auth;
pub mod errors;
pub mod user;
pub mod validation;

use chrono::TimeDelta;

use crate::{config, models, services};

/// Settings shared by the api operations
#[derive(Clone)]
pub struct ApiSettings {
    pub token_secret: String,
    pub token_expires_in: TimeDelta,
    pub files_base_url: String,
}

impl ApiSettings {
    /// Fails if the token lifetime is not a positive, representable duration
    pub fn from_config(app_config: &config::AppConfig) -> anyhow::Result<Self> {
        let token_expires_in = TimeDelta::try_seconds(app_config.app_expires_in_secs)
            .filter(|expires_in| *expires_in > TimeDelta::zero())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "APP_EXPIRES_IN_SECS must be a positive number of seconds, got {}",
                    app_config.app_expires_in_secs
                )
            })?;

        Ok(Self {
            token_secret: app_config.app_secret.to_string(),
            token_expires_in,
            files_base_url: app_config.base_url(),
        })
    }
}

/// Stores the event in the activity log. A failure is logged and never
/// interrupts the request.
async fn record_activity(
    activity_log: &services::ImplActivityLog,
    event: models::activity::ActivityEvent,
) {
    if let Err(e) = activity_log.record(&event).await {
        log::warn!(
            "activity {} of user {} couldn't be recorded: {e}",
            event.action,
            event.user_id
        );
    }
}

#[cfg(test)]
pub(crate) fn create_test_settings() -> ApiSettings {
    ApiSettings {
        token_secret: "test_secret".into(),
        token_expires_in: TimeDelta::days(7),
        files_base_url: "http://localhost:3333".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envconfig::Envconfig;
    use std::collections::HashMap;

    fn create_test_config(expires_in_secs: &str) -> config::AppConfig {
        config::AppConfig::init_from_hashmap(&HashMap::from([
            ("DB_HOST".to_string(), "sqlite::memory:".to_string()),
            ("MONGO_URL".to_string(), "mongodb://localhost:27017".to_string()),
            ("APP_SECRET".to_string(), "secret".to_string()),
            ("APP_EXPIRES_IN_SECS".to_string(), expires_in_secs.to_string()),
        ]))
        .unwrap()
    }

    #[test]
    fn test_settings_from_config() {
        let settings = ApiSettings::from_config(&create_test_config("3600")).unwrap();

        assert_eq!(settings.token_expires_in, TimeDelta::hours(1));
        assert_eq!(settings.token_secret, "secret");
        assert_eq!(settings.files_base_url, "http://localhost:3333");
    }

    #[test]
    fn test_settings_reject_invalid_token_lifetime() {
        let overflowing = i64::MAX.to_string();

        for expires_in_secs in ["0", "-60", overflowing.as_str()] {
            let result = ApiSettings::from_config(&create_test_config(expires_in_secs));

            assert!(result.is_err(), "{expires_in_secs}");
        }
    }
}
