use ntex::web;
use serde_json::json;

use crate::{
    api::{self, errors::ApiError},
    server::{AppState, middleware::bearer_token::BearerToken},
};

/// Registers a new user, answers `201` with the created user
#[web::post("/users")]
pub async fn create_user(
    body: Result<web::types::Json<api::user::RegisterRequest>, web::error::JsonPayloadError>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let body = body.map_err(|e| {
        log::info!("registration payload rejected: {e}");
        ApiError::InvalidUserData
    })?;
    let user = api::user::register(&body, &app_state.repo, &app_state.activity_log).await?;

    Ok(web::HttpResponse::Created().json(&json!({ "data": user })))
}

/// Profile of the user owning the bearer token
#[web::get("/users/me")]
pub async fn get_logged_user(
    token: BearerToken,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let claims = api::auth::verify_token(&token.0, &app_state.settings)?;
    let user = api::user::get_profile(claims.id, &app_state.repo, &app_state.settings).await?;

    Ok(web::HttpResponse::Ok().json(&json!({ "data": user })))
}
