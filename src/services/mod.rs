pub mod activity;

use crate::models;
use async_trait::async_trait;

/// Auxiliary record of user actions kept in the document store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog {
    async fn record(&self, event: &models::activity::ActivityEvent) -> anyhow::Result<()>;
}

pub type ImplActivityLog = Box<dyn ActivityLog>;
