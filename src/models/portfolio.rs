use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::project::{self, ProjectDetail, SaveProject};
use super::template::TemplateDetail;
use super::text;
use super::work;

/// SeaORM entity for the `portfolios` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Opaque user handle supplied by the identity provider. Fixed at creation.
    pub owner_id: String,
    pub title: String,
    pub template_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::template::Entity",
        from = "Column::TemplateId",
        to = "super::template::Column::Id"
    )]
    Template,
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for `POST /api/portfolios`. An empty `id` creates a new portfolio.
#[derive(Debug, Clone, Deserialize)]
pub struct SavePortfolio {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub template_id: String,
    #[serde(default)]
    pub projects: Vec<SaveProject>,
}

/// What a save echoes back: the (possibly new) ids and the template in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPortfolio {
    pub id: String,
    pub projects: Vec<ProjectDetail>,
    pub template: TemplateDetail,
}

/// A portfolio flattened into its rows, ready for a single transactional upsert.
#[derive(Debug, Clone)]
pub struct PortfolioGraph {
    pub portfolio: Model,
    pub projects: Vec<project::Model>,
    pub works: Vec<work::Model>,
    pub texts: Vec<text::Model>,
}

impl PortfolioGraph {
    pub fn new(portfolio: Model, projects: &[ProjectDetail]) -> Self {
        let works = projects
            .iter()
            .flat_map(|p| p.works.iter().cloned())
            .collect();
        let texts = projects
            .iter()
            .flat_map(|p| p.texts.iter().cloned())
            .collect();

        Self {
            portfolio,
            projects: projects.iter().map(ProjectDetail::to_model).collect(),
            works,
            texts,
        }
    }
}

// ── Views ──

/// A portfolio with its ordered projects and the template it is built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioDetail {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub template_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub projects: Vec<ProjectDetail>,
    pub template: Option<TemplateDetail>,
}

impl PortfolioDetail {
    pub fn new(
        portfolio: Model,
        projects: Vec<ProjectDetail>,
        template: Option<TemplateDetail>,
    ) -> Self {
        Self {
            id: portfolio.id,
            owner_id: portfolio.owner_id,
            title: portfolio.title,
            template_id: portfolio.template_id,
            created_at: portfolio.created_at,
            updated_at: portfolio.updated_at,
            projects,
            template,
        }
    }
}
