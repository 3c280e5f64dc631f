use actix_web::{HttpResponse, web};

use crate::error::AppError;
use crate::models::HotTemplatesQuery;
use crate::services::PortfolioService;

/// GET /api/templates — every template with its pages.
pub async fn get_templates(
    service: web::Data<PortfolioService>,
) -> Result<HttpResponse, AppError> {
    let templates = service.get_all_templates().await?;
    Ok(HttpResponse::Ok().json(templates))
}

/// GET /api/templates/hot — most used templates first.
/// Query params: ?limit=5
pub async fn get_hot_templates(
    service: web::Data<PortfolioService>,
    query: web::Query<HotTemplatesQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit(service.hot_limit());
    let templates = service.get_hot_templates(limit).await?;
    Ok(HttpResponse::Ok().json(templates))
}

/// GET /api/templates/{id}
pub async fn get_template(
    service: web::Data<PortfolioService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let template = service.get_template_by_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(template))
}
