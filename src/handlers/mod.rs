pub mod feedback;
pub mod portfolio;
pub mod templates;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Template routes (public) ──
    // `/hot` is registered before `/{id}` so it is not captured as an id.
    cfg.service(
        web::scope("/templates")
            .route("", web::get().to(templates::get_templates))
            .route("/hot", web::get().to(templates::get_hot_templates))
            .route("/{id}", web::get().to(templates::get_template)),
    );

    // ── Portfolio routes (writes and "my" listings need the x-openid header) ──
    cfg.service(
        web::scope("/portfolios")
            .route("", web::post().to(portfolio::save_portfolio))
            .route("/me", web::get().to(portfolio::get_my_portfolios))
            .route("/history", web::get().to(portfolio::get_historical_templates))
            .route("/{id}", web::get().to(portfolio::get_portfolio)),
    );

    // ── Feedback routes (all need the x-openid header) ──
    cfg.service(
        web::scope("/feedback")
            .route("", web::post().to(feedback::submit_feedback))
            .route("", web::get().to(feedback::get_feedback))
            .route("/{id}/status", web::put().to(feedback::update_status)),
    );
}
