use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, SharedCache, TemplateRanking, keys, read_through};
use crate::config::DEFAULT_HOT_TEMPLATES;
use crate::db::portfolio as portfolio_db;
use crate::db::templates as template_db;
use crate::error::AppError;
use crate::models::portfolio::{
    self, PortfolioDetail, PortfolioGraph, SavePortfolio, SavedPortfolio,
};
use crate::models::project::ProjectDetail;
use crate::models::template::TemplateDetail;
use crate::services::{Clock, IdGenerator, SystemClock, UuidGenerator};

/// Template and portfolio use cases on top of the store and the cache.
///
/// The relational store is the source of truth. The cache only ever holds
/// derived copies, and losing it costs latency, not availability.
#[derive(Clone)]
pub struct PortfolioService {
    db: DatabaseConnection,
    cache: SharedCache,
    ranking: TemplateRanking,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    hot_limit: usize,
}

impl PortfolioService {
    pub fn new(db: DatabaseConnection, cache: SharedCache, config: CacheConfig) -> Self {
        Self {
            db,
            ranking: TemplateRanking::new(cache.clone()),
            cache,
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
            config,
            hot_limit: DEFAULT_HOT_TEMPLATES,
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

    pub fn with_hot_limit(mut self, hot_limit: usize) -> Self {
        self.hot_limit = hot_limit;
        self
    }

    /// Size of the hot list when the caller does not ask for one.
    pub fn hot_limit(&self) -> usize {
        self.hot_limit
    }

    pub fn ranking(&self) -> &TemplateRanking {
        &self.ranking
    }

    pub async fn get_all_templates(&self) -> Result<Vec<TemplateDetail>, AppError> {
        read_through(
            self.cache.as_ref(),
            &keys::all_templates(),
            self.config.templates_ttl,
            || async { Ok(template_db::get_all_templates(&self.db).await?) },
        )
        .await
    }

    /// Up to `n` templates, most used first.
    ///
    /// Falls back to counting portfolios in the store when the ranking set is
    /// empty or unreachable.
    pub async fn get_hot_templates(&self, n: usize) -> Result<Vec<TemplateDetail>, AppError> {
        let ids = match self.ranking.top(n).await {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => {
                debug!("template ranking is empty, ranking by stored usage");
                template_db::get_most_used_template_ids(&self.db, n).await?
            }
            Err(e) => {
                warn!(error = %e, "template ranking unavailable, ranking by stored usage");
                template_db::get_most_used_template_ids(&self.db, n).await?
            }
        };

        Ok(template_db::get_templates_by_ids(&self.db, &ids).await?)
    }

    pub async fn get_template_by_id(&self, id: &str) -> Result<TemplateDetail, AppError> {
        template_db::get_template_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Template {id}")))
    }

    /// Persist a portfolio graph for `owner_id`.
    ///
    /// A blank portfolio id creates a new portfolio and counts one use of its
    /// template. Blank project, work and text ids are minted here; supplied ids
    /// update the existing rows.
    pub async fn save_portfolio(
        &self,
        owner_id: &str,
        mut input: SavePortfolio,
    ) -> Result<SavedPortfolio, AppError> {
        validate_save(&input)?;
        let is_new = assign_identities(&mut input, self.ids.as_ref());
        let now = self.clock.now();

        let projects: Vec<ProjectDetail> = input
            .projects
            .into_iter()
            .map(|p| p.into_detail(&input.id, now))
            .collect();

        let row = portfolio::Model {
            id: input.id,
            owner_id: owner_id.to_string(),
            title: input.title,
            template_id: input.template_id,
            created_at: now,
            updated_at: now,
        };
        let graph = PortfolioGraph::new(row, &projects);

        let template = portfolio_db::upsert_portfolio_graph(&self.db, &graph).await?;

        let portfolio_id = graph.portfolio.id;
        let template_id = graph.portfolio.template_id;
        info!(%portfolio_id, owner_id, is_new, "portfolio saved");

        if is_new {
            if let Err(e) = self.ranking.increment(&template_id).await {
                warn!(%template_id, error = %e, "could not update template ranking");
            }
        }

        if self.config.invalidate_owner_on_save {
            let key = keys::owner_portfolios(owner_id);
            if let Err(e) = self.cache.delete(&key).await {
                warn!(%key, error = %e, "could not invalidate owner portfolios");
            }
        }

        Ok(SavedPortfolio {
            id: portfolio_id,
            projects,
            template,
        })
    }

    pub async fn get_portfolios_for_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<PortfolioDetail>, AppError> {
        read_through(
            self.cache.as_ref(),
            &keys::owner_portfolios(owner_id),
            self.config.portfolios_ttl,
            || async { Ok(portfolio_db::get_portfolios_by_owner(&self.db, owner_id).await?) },
        )
        .await
    }

    pub async fn get_portfolio_by_id(&self, id: &str) -> Result<PortfolioDetail, AppError> {
        portfolio_db::get_portfolio_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Portfolio {id}")))
    }

    /// Templates the owner has built portfolios with, first use first, no repeats.
    pub async fn get_historical_templates(
        &self,
        owner_id: &str,
    ) -> Result<Vec<TemplateDetail>, AppError> {
        let portfolios = self.get_portfolios_for_owner(owner_id).await?;
        Ok(distinct_templates(portfolios))
    }
}

/// Reject client input the store would refuse anyway.
pub fn validate_save(input: &SavePortfolio) -> Result<(), AppError> {
    let bad_scale = input
        .projects
        .iter()
        .flat_map(|p| &p.works)
        .find(|w| w.scale.is_nan() || w.scale <= 0.0);

    match bad_scale {
        Some(work) => Err(AppError::Validation(format!(
            "work scale must be positive, got {}",
            work.scale
        ))),
        None => Ok(()),
    }
}

/// Mint ids for every blank id in the graph and stamp parent ids on children.
///
/// Returns whether the portfolio itself is new.
pub fn assign_identities(input: &mut SavePortfolio, ids: &dyn IdGenerator) -> bool {
    let is_new = input.id.is_empty();
    if is_new {
        input.id = ids.next_id();
    }

    for project in &mut input.projects {
        if project.id.is_empty() {
            project.id = ids.next_id();
        }
        for work in &mut project.works {
            if work.id.is_empty() {
                work.id = ids.next_id();
            }
        }
        for text in &mut project.texts {
            if text.id.is_empty() {
                text.id = ids.next_id();
            }
        }
    }

    is_new
}

/// Fold portfolios into the templates they use, keeping first-seen order.
pub fn distinct_templates(portfolios: Vec<PortfolioDetail>) -> Vec<TemplateDetail> {
    let mut seen = HashSet::new();
    portfolios
        .into_iter()
        .filter(|p| seen.insert(p.template_id.clone()))
        .filter_map(|p| p.template)
        .collect()
}
