use ntex::web;

use crate::{
    api::{self, errors::ApiError},
    server::AppState,
};

/// Password login, answers the user and a signed session token
#[web::post("/sessions")]
pub async fn create_session(
    body: Result<web::types::Json<api::auth::SessionRequest>, web::error::JsonPayloadError>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let body = body.map_err(|e| {
        log::info!("session payload rejected: {e}");
        ApiError::ValidationFails
    })?;
    let session = api::auth::authenticate(
        &body,
        &app_state.repo,
        &app_state.activity_log,
        &app_state.settings,
    )
    .await?;

    Ok(web::HttpResponse::Ok().json(&session))
}
