//! Route configuration.
//!
//! # Routes
//! - `POST /users` - Register a user
//! - `GET /users/me` - Profile of the token owner
//! - `POST /sessions` - Log in and get a session token
//!
//! Anything else answers `404` with a JSON error body.

use ntex::web;

use super::{sessions, users};
use crate::api::errors::ApiError;

pub fn users(cfg: &mut web::ServiceConfig) {
    cfg.service((users::create_user, users::get_logged_user));
}

pub fn sessions(cfg: &mut web::ServiceConfig) {
    cfg.service(sessions::create_session);
}

/// Answers [ApiError::UrlNotFound] for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(ApiError::UrlNotFound.into())
}
