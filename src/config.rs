//! Application configuration management with security considerations.
//!
//! All values are read once from the environment at startup and handed down
//! to the components that need them.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - Production environments should use secure secret management systems

use envconfig::Envconfig;

/// Application configuration with security-aware field management.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Never log or expose sensitive values
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Relational database url (NON-SENSITIVE)
    /// Example: "sqlite:data/app.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,

    /// 🔒 SENSITIVE: Document store connection url, may embed credentials
    /// Example: "mongodb://localhost:27017"
    pub mongo_url: String,

    /// Document store database name (NON-SENSITIVE)
    #[envconfig(default = "pet_info")]
    pub mongo_db_name: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost", "pet-info.link"
    #[envconfig(default = "localhost")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "3333")]
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Security: File should have 600 permissions
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: Secret used to sign session tokens
    /// Rotation: invalidates every issued token
    pub app_secret: String,

    /// Session token lifetime in seconds (NON-SENSITIVE)
    #[envconfig(default = "604800")]
    pub app_expires_in_secs: i64,

    /// 🔒 SENSITIVE: Logfire write token, logs go to stdout when unset
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.web_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.web_server_host,
            port = self.web_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn web_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.web_server_protocol(), self.url_host())
    }
}
