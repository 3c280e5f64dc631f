use actix_web::{HttpResponse, web};

use crate::auth::Owner;
use crate::error::AppError;
use crate::models::feedback::{CreateFeedback, FeedbackListQuery, UpdateFeedbackStatus};
use crate::services::FeedbackService;

/// POST /api/feedback — submitted feedback starts out pending.
pub async fn submit_feedback(
    _owner: Owner,
    service: web::Data<FeedbackService>,
    body: web::Json<CreateFeedback>,
) -> Result<HttpResponse, AppError> {
    let created = service.submit(body.into_inner().content).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/feedback — all feedback, or only one status.
/// Query params: ?status=pending|approved|rejected
pub async fn get_feedback(
    _owner: Owner,
    service: web::Data<FeedbackService>,
    query: web::Query<FeedbackListQuery>,
) -> Result<HttpResponse, AppError> {
    let items = service.list(query.status).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// PUT /api/feedback/{id}/status
pub async fn update_status(
    _owner: Owner,
    service: web::Data<FeedbackService>,
    path: web::Path<String>,
    body: web::Json<UpdateFeedbackStatus>,
) -> Result<HttpResponse, AppError> {
    let updated = service
        .update_status(&path.into_inner(), body.status)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}
