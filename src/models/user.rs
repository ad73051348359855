use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::file::{Avatar, File};

/// Registered account. The password is only kept as an argon2id hash
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<File>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Checks `candidate` against the stored hash.
    ///
    /// Fails only if the stored hash is not a valid PHC string.
    pub fn check_password(&self, candidate: &str) -> anyhow::Result<bool> {
        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|e| anyhow!("invalid password hash for user {}: {e}", self.id))?;

        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// [User::check_password] run on the blocking pool, argon2 is CPU bound
    pub async fn verify_password(&self, candidate: &str) -> anyhow::Result<bool> {
        let user = self.clone();
        let candidate = candidate.to_string();

        ntex::rt::spawn_blocking(move || user.check_password(&candidate)).await?
    }

    pub fn to_public(&self, base_url: &str) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.to_string(),
            email: self.email.to_string(),
            avatar: self.avatar.as_ref().map(|file| file.to_avatar(base_url)),
        }
    }
}

/// User data ready to be inserted, the password already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Hashes `password` on the blocking pool
    pub async fn new(name: &str, email: &str, password: &str) -> anyhow::Result<Self> {
        let password = password.to_string();
        let password_hash = ntex::rt::spawn_blocking(move || hash_password(&password)).await??;

        Ok(Self {
            name: name.trim().to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }
}

/// User fields that can leave the service
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar: Option<Avatar>,
}

/// Hashes `password` with argon2id and a random salt, PHC encoded
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password couldn't be hashed: {e}"))?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(password: &str) -> User {
        User {
            id: 1,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: hash_password(password).unwrap(),
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[ntex::test]
    async fn test_new_user_never_keeps_plain_password() {
        let new_user = NewUser::new("  Alice ", "alice@example.com", "secret123")
            .await
            .unwrap();

        assert_eq!(new_user.name, "Alice");
        assert_ne!(new_user.password_hash, "secret123");
        assert!(!new_user.password_hash.contains("secret123"));
        assert!(new_user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_check_password() {
        let user = create_test_user("secret123");

        assert!(user.check_password("secret123").unwrap());
        assert!(!user.check_password("secret124").unwrap());
        assert!(!user.check_password("").unwrap());
    }

    #[ntex::test]
    async fn test_verify_password_on_blocking_pool() {
        let user = create_test_user("secret123");

        assert!(user.verify_password("secret123").await.unwrap());
        assert!(!user.verify_password("secret124").await.unwrap());
    }

    #[test]
    fn test_check_password_malformed_hash() {
        let mut user = create_test_user("secret123");
        user.password_hash = "plain-text".into();

        assert!(user.check_password("plain-text").is_err());
    }

    #[test]
    fn test_to_public_hides_hash() {
        let mut user = create_test_user("secret123");
        user.avatar = Some(File {
            id: 3,
            name: "avatar.png".into(),
            path: "a1b2.png".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        let public = user.to_public("http://localhost:3333");
        let value = serde_json::to_value(&public).unwrap();

        assert_eq!(value["email"], "alice@example.com");
        assert_eq!(value["avatar"]["url"], "http://localhost:3333/files/a1b2.png");
        assert!(value.get("password_hash").is_none());
    }
}
