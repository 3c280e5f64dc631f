use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use springboard_backend::auth::OWNER_HEADER;
use springboard_backend::cache::{MemoryCache, RedisCache, SharedCache};
use springboard_backend::config::AppConfig;
use springboard_backend::services::{FeedbackService, PortfolioService};
use springboard_backend::{create_pool, db, handlers};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    if config.run_migrations {
        db::run_migrations(&db)
            .await
            .map_err(std::io::Error::other)?;
        tracing::info!("Migrations applied");
    }

    let cache: SharedCache = match &config.redis_url {
        Some(url) => {
            let redis = RedisCache::new(url)
                .await
                .map_err(std::io::Error::other)?;
            tracing::info!("Connected to Redis");
            Arc::new(redis)
        }
        None => {
            tracing::warn!("REDIS_URL not set, caching in process memory");
            Arc::new(MemoryCache::default())
        }
    };

    let portfolios = web::Data::new(
        PortfolioService::new(db.clone(), cache, config.cache.clone())
            .with_hot_limit(config.hot_templates_limit),
    );
    let feedback = web::Data::new(FeedbackService::new(db));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::HeaderName::from_static(OWNER_HEADER),
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(portfolios.clone())
            .app_data(feedback.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
