use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::page;

/// SeaORM entity for the `templates` table.
///
/// Templates are provisioned out-of-band; this service only reads and ranks them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub font_asset_key: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::page::Entity")]
    Pages,
    #[sea_orm(has_many = "super::portfolio::Entity")]
    Portfolios,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pages.def()
    }
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolios.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── Views ──

/// A template together with its pages, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDetail {
    pub id: String,
    pub name: String,
    pub font_asset_key: String,
    pub created_at: DateTimeUtc,
    pub pages: Vec<page::Model>,
}

impl TemplateDetail {
    pub fn new(template: Model, pages: Vec<page::Model>) -> Self {
        Self {
            id: template.id,
            name: template.name,
            font_asset_key: template.font_asset_key,
            created_at: template.created_at,
            pages,
        }
    }
}
