use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

use crate::db::feedback as feedback_db;
use crate::error::AppError;
use crate::models::feedback::{self, Status};
use crate::services::{Clock, IdGenerator, SystemClock, UuidGenerator};

/// Submission and review of user feedback. No caching involved.
#[derive(Clone)]
pub struct FeedbackService {
    db: DatabaseConnection,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl FeedbackService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Record new feedback as Pending, with a fresh id and the current time.
    pub async fn submit(&self, content: String) -> Result<feedback::Model, AppError> {
        let submitted_at: DateTime<Utc> = self.clock.now();
        let created =
            feedback_db::insert_feedback(&self.db, self.ids.next_id(), content, submitted_at)
                .await?;
        info!(feedback_id = %created.id, "feedback submitted");
        Ok(created)
    }

    pub async fn list(&self, status: Option<Status>) -> Result<Vec<feedback::Model>, AppError> {
        let items = match status {
            Some(status) => feedback_db::get_feedbacks_by_status(&self.db, status).await?,
            None => feedback_db::get_all_feedbacks(&self.db).await?,
        };
        Ok(items)
    }

    /// Set any status on an existing entry.
    pub async fn update_status(
        &self,
        id: &str,
        status: Status,
    ) -> Result<feedback::Model, AppError> {
        let updated = feedback_db::update_feedback_status(&self.db, id, status).await?;
        info!(feedback_id = %id, ?status, "feedback status updated");
        Ok(updated)
    }
}
