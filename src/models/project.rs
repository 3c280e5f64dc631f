use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::text::{self, SaveText};
use super::work::{self, SaveWork};

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub portfolio_id: String,
    pub name: String,
    /// Render order within the portfolio.
    pub order_index: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::portfolio::Entity",
        from = "Column::PortfolioId",
        to = "super::portfolio::Column::Id"
    )]
    Portfolio,
    #[sea_orm(has_many = "super::work::Entity")]
    Works,
    #[sea_orm(has_many = "super::text::Entity")]
    Texts,
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolio.def()
    }
}

impl Related<super::work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl Related<super::text::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Texts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct SaveProject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "order")]
    pub order_index: i32,
    #[serde(default)]
    pub works: Vec<SaveWork>,
    #[serde(default)]
    pub texts: Vec<SaveText>,
}

impl SaveProject {
    /// Builds the project view with every child stamped with this project's id.
    /// All ids must already be assigned.
    pub fn into_detail(self, portfolio_id: &str, now: DateTimeUtc) -> ProjectDetail {
        let works = self
            .works
            .into_iter()
            .map(|w| w.into_model(&self.id, now))
            .collect();
        let texts = self
            .texts
            .into_iter()
            .map(|t| t.into_model(&self.id))
            .collect();

        ProjectDetail {
            id: self.id,
            portfolio_id: portfolio_id.to_string(),
            name: self.name,
            order_index: self.order_index,
            created_at: now,
            updated_at: now,
            works,
            texts,
        }
    }
}

// ── Views ──

/// A project with its works and text boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub id: String,
    pub portfolio_id: String,
    pub name: String,
    #[serde(rename = "order")]
    pub order_index: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub works: Vec<work::Model>,
    pub texts: Vec<text::Model>,
}

impl ProjectDetail {
    pub fn new(project: Model, works: Vec<work::Model>, texts: Vec<text::Model>) -> Self {
        Self {
            id: project.id,
            portfolio_id: project.portfolio_id,
            name: project.name,
            order_index: project.order_index,
            created_at: project.created_at,
            updated_at: project.updated_at,
            works,
            texts,
        }
    }

    /// The bare `projects` row.
    pub fn to_model(&self) -> Model {
        Model {
            id: self.id.clone(),
            portfolio_id: self.portfolio_id.clone(),
            name: self.name.clone(),
            order_index: self.order_index,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
