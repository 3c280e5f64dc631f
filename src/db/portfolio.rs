use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::db::templates;
use crate::error::AppError;
use crate::models::portfolio::{self, PortfolioDetail, PortfolioGraph};
use crate::models::project::{self, ProjectDetail};
use crate::models::template::TemplateDetail;
use crate::models::text;
use crate::models::work;

/// Fetch all portfolios for an owner, oldest first, with projects and template.
pub async fn get_portfolios_by_owner(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<PortfolioDetail>, DbErr> {
    let portfolios = portfolio::Entity::find()
        .filter(portfolio::Column::OwnerId.eq(owner_id))
        .order_by_asc(portfolio::Column::CreatedAt)
        .order_by_asc(portfolio::Column::Id)
        .all(db)
        .await?;

    assemble(db, portfolios).await
}

/// Fetch a single portfolio by ID.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<PortfolioDetail>, DbErr> {
    let Some(portfolio) = portfolio::Entity::find_by_id(id.to_owned()).one(db).await? else {
        return Ok(None);
    };

    Ok(assemble(db, vec![portfolio]).await?.pop())
}

/// Insert or update a whole portfolio graph in one transaction.
///
/// Rows are written parent first: portfolio, projects, works, texts. An existing
/// row with the same id is overwritten, except for its owner and creation time.
/// Any failure rolls the whole graph back. Returns the portfolio's template as
/// read inside the transaction.
pub async fn upsert_portfolio_graph(
    db: &DatabaseConnection,
    graph: &PortfolioGraph,
) -> Result<TemplateDetail, AppError> {
    let txn = db.begin().await?;

    let template_id = &graph.portfolio.template_id;
    let Some(template) = templates::get_template_by_id(&txn, template_id).await? else {
        return Err(AppError::Validation(format!(
            "template {template_id} does not exist"
        )));
    };

    let existing = portfolio::Entity::find_by_id(graph.portfolio.id.clone())
        .one(&txn)
        .await?;
    if existing.is_some_and(|p| p.owner_id != graph.portfolio.owner_id) {
        return Err(AppError::Forbidden(
            "You can only save your own portfolios".to_string(),
        ));
    }
    ensure_children_owned(&txn, graph).await?;

    portfolio::Entity::insert(portfolio::ActiveModel::from(graph.portfolio.clone()).reset_all())
        .on_conflict(
            OnConflict::column(portfolio::Column::Id)
                .update_columns([
                    portfolio::Column::Title,
                    portfolio::Column::TemplateId,
                    portfolio::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

    if !graph.projects.is_empty() {
        project::Entity::insert_many(
            graph
                .projects
                .iter()
                .map(|p| project::ActiveModel::from(p.clone()).reset_all()),
        )
        .on_conflict(
            OnConflict::column(project::Column::Id)
                .update_columns([
                    project::Column::PortfolioId,
                    project::Column::Name,
                    project::Column::OrderIndex,
                    project::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
    }

    if !graph.works.is_empty() {
        work::Entity::insert_many(
            graph
                .works
                .iter()
                .map(|w| work::ActiveModel::from(w.clone()).reset_all()),
        )
        .on_conflict(
            OnConflict::column(work::Column::Id)
                .update_columns([
                    work::Column::ProjectId,
                    work::Column::AssetKey,
                    work::Column::Size,
                    work::Column::MarginTop,
                    work::Column::MarginLeft,
                    work::Column::Scale,
                    work::Column::PageNum,
                    work::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
    }

    if !graph.texts.is_empty() {
        text::Entity::insert_many(
            graph
                .texts
                .iter()
                .map(|t| text::ActiveModel::from(t.clone()).reset_all()),
        )
        .on_conflict(
            OnConflict::column(text::Column::Id)
                .update_columns([
                    text::Column::ProjectId,
                    text::Column::Content,
                    text::Column::FontSize,
                    text::Column::FontColor,
                    text::Column::Size,
                    text::Column::MarginTop,
                    text::Column::MarginLeft,
                    text::Column::PageNum,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
    }

    txn.commit().await?;

    debug!(
        portfolio_id = %graph.portfolio.id,
        projects = graph.projects.len(),
        works = graph.works.len(),
        texts = graph.texts.len(),
        "portfolio graph committed"
    );

    Ok(template)
}

/// Reject a graph that reuses project, work or text ids already stored under
/// another owner's portfolio.
async fn ensure_children_owned<C: ConnectionTrait>(
    db: &C,
    graph: &PortfolioGraph,
) -> Result<(), AppError> {
    let mut project_ids: BTreeSet<String> = graph.projects.iter().map(|p| p.id.clone()).collect();

    if !graph.works.is_empty() {
        let parents: Vec<String> = work::Entity::find()
            .select_only()
            .column(work::Column::ProjectId)
            .filter(work::Column::Id.is_in(graph.works.iter().map(|w| w.id.clone())))
            .into_tuple()
            .all(db)
            .await?;
        project_ids.extend(parents);
    }

    if !graph.texts.is_empty() {
        let parents: Vec<String> = text::Entity::find()
            .select_only()
            .column(text::Column::ProjectId)
            .filter(text::Column::Id.is_in(graph.texts.iter().map(|t| t.id.clone())))
            .into_tuple()
            .all(db)
            .await?;
        project_ids.extend(parents);
    }

    if project_ids.is_empty() {
        return Ok(());
    }

    let portfolio_ids: BTreeSet<String> = project::Entity::find()
        .select_only()
        .column(project::Column::PortfolioId)
        .filter(project::Column::Id.is_in(project_ids))
        .into_tuple::<String>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    if portfolio_ids.is_empty() {
        return Ok(());
    }

    let foreign = portfolio::Entity::find()
        .filter(portfolio::Column::Id.is_in(portfolio_ids))
        .filter(portfolio::Column::OwnerId.ne(graph.portfolio.owner_id.as_str()))
        .count(db)
        .await?;
    if foreign > 0 {
        return Err(AppError::Forbidden(
            "Projects, works and texts of other owners cannot be saved".to_string(),
        ));
    }

    Ok(())
}

/// Load the projects, works, texts and templates of `portfolios` in four queries.
async fn assemble(
    db: &DatabaseConnection,
    portfolios: Vec<portfolio::Model>,
) -> Result<Vec<PortfolioDetail>, DbErr> {
    if portfolios.is_empty() {
        return Ok(Vec::new());
    }

    let projects = project::Entity::find()
        .filter(project::Column::PortfolioId.is_in(portfolios.iter().map(|p| p.id.clone())))
        .order_by_asc(project::Column::OrderIndex)
        .order_by_asc(project::Column::Id)
        .all(db)
        .await?;

    let project_ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();

    let mut works_by_project: HashMap<String, Vec<work::Model>> = HashMap::new();
    let mut texts_by_project: HashMap<String, Vec<text::Model>> = HashMap::new();

    if !project_ids.is_empty() {
        let works = work::Entity::find()
            .filter(work::Column::ProjectId.is_in(project_ids.iter().cloned()))
            .order_by_asc(work::Column::PageNum)
            .order_by_asc(work::Column::Id)
            .all(db)
            .await?;
        for w in works {
            works_by_project.entry(w.project_id.clone()).or_default().push(w);
        }

        let texts = text::Entity::find()
            .filter(text::Column::ProjectId.is_in(project_ids.iter().cloned()))
            .order_by_asc(text::Column::PageNum)
            .order_by_asc(text::Column::Id)
            .all(db)
            .await?;
        for t in texts {
            texts_by_project.entry(t.project_id.clone()).or_default().push(t);
        }
    }

    let mut projects_by_portfolio: HashMap<String, Vec<ProjectDetail>> = HashMap::new();
    for p in projects {
        let works = works_by_project.remove(&p.id).unwrap_or_default();
        let texts = texts_by_project.remove(&p.id).unwrap_or_default();
        projects_by_portfolio
            .entry(p.portfolio_id.clone())
            .or_default()
            .push(ProjectDetail::new(p, works, texts));
    }

    let template_ids: Vec<String> = portfolios
        .iter()
        .map(|p| p.template_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let templates: HashMap<String, TemplateDetail> =
        templates::get_templates_by_ids(db, &template_ids)
            .await?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();

    Ok(portfolios
        .into_iter()
        .map(|p| {
            let projects = projects_by_portfolio.remove(&p.id).unwrap_or_default();
            let template = templates.get(&p.template_id).cloned();
            PortfolioDetail::new(p, projects, template)
        })
        .collect())
}
