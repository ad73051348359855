//! Persistence gateway.
//!
//! Opens the relational (SQLite) and document (MongoDB) connections once at
//! startup. The resulting [Database] is handed to the web server, nothing
//! reaches it through globals.

use anyhow::Context;
use mongodb::bson::doc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

use crate::{config, repo, services};

pub struct Database {
    pub sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    pub mongo_client: mongodb::Client,
    pub activity_log: services::activity::MongoActivityLog,
}

impl Database {
    /// Opens both connections and registers the relational models
    pub async fn connect(app_config: &config::AppConfig) -> anyhow::Result<Self> {
        let db_pool = setup_sqlite_db_pool(app_config).await?;
        repo::schema::register_models(&db_pool, &repo::schema::MODELS).await?;

        let mongo_client = mongodb::Client::with_uri_str(&app_config.mongo_url)
            .await
            .context("document store url couldn't be parsed")?;
        let mongo_db = mongo_client.database(&app_config.mongo_db_name);
        mongo_db
            .run_command(doc! { "ping": 1 })
            .await
            .context("document store is not reachable")?;

        log::info!("relational and document stores connected");

        Ok(Self {
            sqlite_repo: repo::sqlite::SqlxSqliteRepo { db_pool },
            activity_log: services::activity::MongoActivityLog::new(&mongo_db),
            mongo_client,
        })
    }

    /// Closes the SQLite pool and shuts the MongoDB client down
    pub async fn close(self) {
        self.sqlite_repo.db_pool.close().await;
        self.mongo_client.shutdown().await;

        log::info!("relational and document stores closed");
    }
}

pub async fn setup_sqlite_db_pool(app_config: &config::AppConfig) -> anyhow::Result<SqlitePool> {
    if app_config.is_prod() {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&app_config.db_host)?
                .pragma("key", app_config.db_pass_encrypt.to_string())
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .pragma("foreign_keys", "ON")
                .journal_mode(SqliteJournalMode::Delete)
                .create_if_missing(true),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&app_config.db_host)?
            .pragma("foreign_keys", "ON")
            .create_if_missing(true),
    )
    .await?)
}

/// Single connection in-memory database, every connection would get its own db otherwise
#[cfg(test)]
pub async fn setup_test_db_pool() -> anyhow::Result<SqlitePool> {
    Ok(sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?.pragma("foreign_keys", "ON"))
        .await?)
}
