//! JSON HTTP surface of the service

pub mod errors;
pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod users;

use crate::{api, repo, services};

pub struct AppState {
    pub repo: repo::ImplAppRepo,
    pub activity_log: services::ImplActivityLog,
    pub settings: api::ApiSettings,
}
