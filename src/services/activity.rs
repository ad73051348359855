use async_trait::async_trait;
use mongodb::{Collection, Database};

use crate::{consts, models::activity::ActivityEvent};

#[derive(Clone)]
pub struct MongoActivityLog {
    pub collection: Collection<ActivityEvent>,
}

impl MongoActivityLog {
    pub fn new(mongo_db: &Database) -> Self {
        Self {
            collection: mongo_db.collection::<ActivityEvent>(consts::MONGO_ACTIVITY_COLLECTION),
        }
    }
}

#[async_trait]
impl crate::services::ActivityLog for MongoActivityLog {
    async fn record(&self, event: &ActivityEvent) -> anyhow::Result<()> {
        self.collection.insert_one(event).await?;

        Ok(())
    }
}
