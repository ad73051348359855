//! Relational models registered when the database is opened.
//!
//! Registration runs in two passes: every model creates its table first, then
//! every model wires its associations, so an association can always rely on
//! the tables of the other models.

use anyhow::Context;
use sqlx::SqlitePool;

use super::sqlite_queries;

/// Table definition plus the statements linking it to other models
#[derive(Debug, Clone, Copy)]
pub struct ModelSchema {
    pub name: &'static str,
    pub definition: &'static str,
    pub associations: &'static [&'static str],
}

pub const USER: ModelSchema = ModelSchema {
    name: "users",
    definition: sqlite_queries::QUERY_CREATE_TABLE_USERS,
    associations: &[sqlite_queries::QUERY_INDEX_USERS_AVATAR],
};

pub const FILE: ModelSchema = ModelSchema {
    name: "files",
    definition: sqlite_queries::QUERY_CREATE_TABLE_FILES,
    associations: &[],
};

pub const PET: ModelSchema = ModelSchema {
    name: "pets",
    definition: sqlite_queries::QUERY_CREATE_TABLE_PETS,
    associations: &[
        sqlite_queries::QUERY_INDEX_PETS_OWNER,
        sqlite_queries::QUERY_INDEX_PETS_BREED,
    ],
};

pub const BREED: ModelSchema = ModelSchema {
    name: "breeds",
    definition: sqlite_queries::QUERY_CREATE_TABLE_BREEDS,
    associations: &[],
};

pub const PETFILE: ModelSchema = ModelSchema {
    name: "petfiles",
    definition: sqlite_queries::QUERY_CREATE_TABLE_PETFILES,
    associations: &[sqlite_queries::QUERY_INDEX_PETFILES_PET],
};

pub const MODELS: [ModelSchema; 5] = [USER, FILE, PET, BREED, PETFILE];

/// Creates every model table, then every association, in one transaction.
///
/// Statements are idempotent so it is safe to run on each startup.
pub async fn register_models(
    db_pool: &SqlitePool,
    models: &[ModelSchema],
) -> anyhow::Result<Vec<&'static str>> {
    let mut transaction = db_pool.begin().await?;

    for model in models {
        sqlx::query(model.definition)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("model {} couldn't be initialized", model.name))?;
    }

    for model in models {
        for association in model.associations {
            sqlx::query(association)
                .execute(&mut *transaction)
                .await
                .with_context(|| format!("model {} couldn't be associated", model.name))?;
        }
    }

    transaction.commit().await?;

    let names = models.iter().map(|model| model.name).collect::<Vec<_>>();
    log::info!("relational models registered: {}", names.join(","));

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    async fn get_sqlite_objects(db_pool: &SqlitePool, object_type: &str) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type=$1 AND name NOT LIKE 'sqlite_%' ORDER BY name;",
        )
        .bind(object_type)
        .fetch_all(db_pool)
        .await
        .unwrap()
    }

    #[ntex::test]
    async fn test_register_models_creates_tables_and_indexes() {
        let db_pool = database::setup_test_db_pool().await.unwrap();

        let registered = register_models(&db_pool, &MODELS).await.unwrap();

        assert_eq!(registered, vec!["users", "files", "pets", "breeds", "petfiles"]);
        assert_eq!(
            get_sqlite_objects(&db_pool, "table").await,
            vec!["breeds", "files", "petfiles", "pets", "users"]
        );
        assert_eq!(
            get_sqlite_objects(&db_pool, "index").await,
            vec![
                "idx_petfiles_pet_id",
                "idx_pets_breed_id",
                "idx_pets_owner_id",
                "idx_users_avatar_id",
            ]
        );
    }

    #[ntex::test]
    async fn test_register_models_is_idempotent() {
        let db_pool = database::setup_test_db_pool().await.unwrap();

        register_models(&db_pool, &MODELS).await.unwrap();
        let result = register_models(&db_pool, &MODELS).await;

        assert!(result.is_ok());
    }

    #[ntex::test]
    async fn test_association_needs_every_table_of_the_pass() {
        let db_pool = database::setup_test_db_pool().await.unwrap();

        // pets is associated but never defined
        let orphan = ModelSchema {
            name: "orphan",
            definition: sqlite_queries::QUERY_CREATE_TABLE_BREEDS,
            associations: &[sqlite_queries::QUERY_INDEX_PETS_OWNER],
        };
        let result = register_models(&db_pool, &[orphan]).await;

        assert!(result.is_err());
        assert!(get_sqlite_objects(&db_pool, "table").await.is_empty());
    }
}
