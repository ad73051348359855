use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::consts;

/// Uploaded file stored by path, e.g. a user avatar
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Public url the file is served from
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{base}/{prefix}/{path}",
            base = base_url.trim_end_matches('/'),
            prefix = consts::FILES_URL_PREFIX,
            path = self.path
        )
    }

    pub fn to_avatar(&self, base_url: &str) -> Avatar {
        Avatar {
            id: self.id,
            path: self.path.to_string(),
            url: self.url(base_url),
        }
    }
}

/// Avatar fields exposed in responses
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Avatar {
    pub id: i64,
    pub path: String,
    pub url: String,
}
