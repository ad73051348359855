use derive_more::Display;
use mongodb::bson;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    #[display("user_created")]
    UserCreated,
    #[display("session_created")]
    SessionCreated,
}

/// Document stored in the activity collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEvent {
    pub user_id: i64,
    pub action: ActivityAction,
    pub created_at: bson::DateTime,
}

impl ActivityEvent {
    pub fn new(user_id: i64, action: ActivityAction) -> Self {
        Self {
            user_id,
            action,
            created_at: bson::DateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_event_document_shape() {
        let event = ActivityEvent::new(9, ActivityAction::SessionCreated);
        let document = bson::to_document(&event).unwrap();

        assert_eq!(document.get_i64("user_id").unwrap(), 9);
        assert_eq!(document.get_str("action").unwrap(), "session_created");
        assert!(document.get_datetime("created_at").is_ok());
    }
}
