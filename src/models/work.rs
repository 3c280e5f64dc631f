use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `works` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "works")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    pub asset_key: String,
    /// Placement box, e.g. `1920x1080`.
    pub size: String,
    pub margin_top: String,
    pub margin_left: String,
    /// 1.0 renders the work unscaled.
    #[sea_orm(column_type = "Double")]
    pub scale: f64,
    pub page_num: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

pub fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveWork {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub asset_key: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub margin_top: String,
    #[serde(default)]
    pub margin_left: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub page_num: i32,
}

impl SaveWork {
    /// Builds the row for this work. `id` must already be assigned.
    pub fn into_model(self, project_id: &str, now: DateTimeUtc) -> Model {
        Model {
            id: self.id,
            project_id: project_id.to_string(),
            asset_key: self.asset_key,
            size: self.size,
            margin_top: self.margin_top,
            margin_left: self.margin_left,
            scale: self.scale,
            page_num: self.page_num,
            created_at: now,
            updated_at: now,
        }
    }
}
