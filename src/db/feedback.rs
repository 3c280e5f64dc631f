use sea_orm::*;

use crate::models::feedback::{self, Status};

/// Insert a new feedback entry (defaults to Pending status).
pub async fn insert_feedback(
    db: &DatabaseConnection,
    id: String,
    content: String,
    submitted_at: chrono::DateTime<chrono::Utc>,
) -> Result<feedback::Model, DbErr> {
    let new_feedback = feedback::ActiveModel {
        id: Set(id),
        content: Set(content),
        status: Set(Status::Pending),
        submitted_at: Set(submitted_at),
    };

    new_feedback.insert(db).await
}

/// Fetch all feedback, oldest first.
pub async fn get_all_feedbacks(db: &DatabaseConnection) -> Result<Vec<feedback::Model>, DbErr> {
    feedback::Entity::find()
        .order_by_asc(feedback::Column::SubmittedAt)
        .order_by_asc(feedback::Column::Id)
        .all(db)
        .await
}

/// Fetch feedback with the given status, oldest first.
pub async fn get_feedbacks_by_status(
    db: &DatabaseConnection,
    status: Status,
) -> Result<Vec<feedback::Model>, DbErr> {
    feedback::Entity::find()
        .filter(feedback::Column::Status.eq(status))
        .order_by_asc(feedback::Column::SubmittedAt)
        .order_by_asc(feedback::Column::Id)
        .all(db)
        .await
}

/// Update the status of a feedback entry.
pub async fn update_feedback_status(
    db: &DatabaseConnection,
    id: &str,
    status: Status,
) -> Result<feedback::Model, DbErr> {
    let item = feedback::Entity::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("Feedback {id}")))?;

    let mut active: feedback::ActiveModel = item.into();
    active.status = Set(status);

    active.update(db).await
}
