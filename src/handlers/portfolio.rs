use actix_web::{HttpResponse, web};

use crate::auth::Owner;
use crate::error::AppError;
use crate::models::portfolio::SavePortfolio;
use crate::services::PortfolioService;

/// POST /api/portfolios — create or re-save a portfolio with its projects,
/// works and texts. A blank `id` creates a new portfolio.
pub async fn save_portfolio(
    owner: Owner,
    service: web::Data<PortfolioService>,
    body: web::Json<SavePortfolio>,
) -> Result<HttpResponse, AppError> {
    let saved = service
        .save_portfolio(owner.as_str(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(saved))
}

/// GET /api/portfolios/me — the caller's portfolios, oldest first.
pub async fn get_my_portfolios(
    owner: Owner,
    service: web::Data<PortfolioService>,
) -> Result<HttpResponse, AppError> {
    let portfolios = service.get_portfolios_for_owner(owner.as_str()).await?;
    Ok(HttpResponse::Ok().json(portfolios))
}

/// GET /api/portfolios/history — templates the caller has used, no repeats.
pub async fn get_historical_templates(
    owner: Owner,
    service: web::Data<PortfolioService>,
) -> Result<HttpResponse, AppError> {
    let templates = service.get_historical_templates(owner.as_str()).await?;
    Ok(HttpResponse::Ok().json(templates))
}

/// GET /api/portfolios/{id}
pub async fn get_portfolio(
    service: web::Data<PortfolioService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let portfolio = service.get_portfolio_by_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(portfolio))
}
