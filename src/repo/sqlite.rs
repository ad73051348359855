use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{AppRepo, RepoError, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::user::User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let avatar = match row.try_get::<Option<i64>, _>("avatar_id")? {
            Some(avatar_id) => Some(models::file::File {
                id: avatar_id,
                name: row.try_get("avatar_name")?,
                path: row.try_get("avatar_path")?,
                created_at: row.try_get::<DateTime<Utc>, _>("avatar_created_at")?,
                updated_at: row.try_get::<DateTime<Utc>, _>("avatar_updated_at")?,
            }),
            None => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            avatar,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<models::user::User>> {
        Ok(
            sqlx::query_as::<_, models::user::User>(sqlite_queries::QUERY_GET_USER_BY_EMAIL)
                .bind(email)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_user_by_id(&self, user_id: i64) -> anyhow::Result<Option<models::user::User>> {
        Ok(
            sqlx::query_as::<_, models::user::User>(sqlite_queries::QUERY_GET_USER_BY_ID)
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn insert_user(&self, user: &models::user::NewUser) -> anyhow::Result<i64> {
        let result = sqlx::query(sqlite_queries::QUERY_INSERT_USER)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.db_pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(RepoError::DuplicatedEmail.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database, repo::schema};

    async fn setup_repo() -> SqlxSqliteRepo {
        let db_pool = database::setup_test_db_pool().await.unwrap();
        schema::register_models(&db_pool, &schema::MODELS)
            .await
            .unwrap();

        SqlxSqliteRepo { db_pool }
    }

    fn create_test_new_user(email: &str) -> models::user::NewUser {
        models::user::NewUser {
            name: "Alice".into(),
            email: email.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[ntex::test]
    async fn test_insert_and_get_user_by_email() {
        let repo = setup_repo().await;
        let new_user = create_test_new_user("alice@example.com");

        let user_id = repo.insert_user(&new_user).await.unwrap();
        let user = repo
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.password_hash, new_user.password_hash);
        assert!(user.avatar.is_none());
    }

    #[ntex::test]
    async fn test_get_user_by_email_is_exact() {
        let repo = setup_repo().await;
        repo.insert_user(&create_test_new_user("alice@example.com"))
            .await
            .unwrap();

        let user = repo.get_user_by_email("bob@example.com").await.unwrap();

        assert!(user.is_none());
    }

    #[ntex::test]
    async fn test_insert_duplicated_email() {
        let repo = setup_repo().await;
        repo.insert_user(&create_test_new_user("alice@example.com"))
            .await
            .unwrap();

        let err = repo
            .insert_user(&create_test_new_user("alice@example.com"))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<RepoError>(),
            Some(&RepoError::DuplicatedEmail)
        );

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users;")
            .fetch_one(&repo.db_pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[ntex::test]
    async fn test_get_user_by_id_includes_avatar() {
        let repo = setup_repo().await;
        let user_id = repo
            .insert_user(&create_test_new_user("alice@example.com"))
            .await
            .unwrap();

        let file_id = sqlx::query(
            "INSERT INTO files(name,path,created_at,updated_at) VALUES($1,$2,$3,$4);",
        )
        .bind("avatar.png")
        .bind("f00d.png")
        .bind(Utc::now())
        .bind(Utc::now())
        .execute(&repo.db_pool)
        .await
        .unwrap()
        .last_insert_rowid();
        sqlx::query("UPDATE users SET avatar_id=$1 WHERE id=$2;")
            .bind(file_id)
            .bind(user_id)
            .execute(&repo.db_pool)
            .await
            .unwrap();

        let user = repo.get_user_by_id(user_id).await.unwrap().unwrap();
        let avatar = user.avatar.unwrap();

        assert_eq!(avatar.id, file_id);
        assert_eq!(avatar.name, "avatar.png");
        assert_eq!(avatar.path, "f00d.png");
    }

    #[ntex::test]
    async fn test_get_user_by_id_not_found() {
        let repo = setup_repo().await;

        assert!(repo.get_user_by_id(404).await.unwrap().is_none());
    }
}
