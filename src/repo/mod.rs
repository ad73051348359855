pub mod schema;
pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use derive_more::{Display, Error};

/// Repository failures callers are expected to handle
#[derive(Debug, Display, Error, PartialEq)]
pub enum RepoError {
    #[display("email is already registered")]
    DuplicatedEmail,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<models::user::User>>;

    async fn get_user_by_id(&self, user_id: i64) -> anyhow::Result<Option<models::user::User>>;

    /// Inserts the user and returns its id.
    ///
    /// Fails with [RepoError::DuplicatedEmail] if the email is already taken.
    async fn insert_user(&self, user: &models::user::NewUser) -> anyhow::Result<i64>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
