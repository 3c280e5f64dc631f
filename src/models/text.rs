use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hex colour used when a client does not pick one.
pub const DEFAULT_FONT_COLOR: &str = "000000";

/// SeaORM entity for the `texts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "texts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub font_size: String,
    pub font_color: String,
    pub size: String,
    pub margin_top: String,
    pub margin_left: String,
    pub page_num: i32,
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

fn default_font_color() -> String {
    DEFAULT_FONT_COLOR.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveText {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub font_size: String,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub margin_top: String,
    #[serde(default)]
    pub margin_left: String,
    #[serde(default)]
    pub page_num: i32,
}

impl SaveText {
    /// Builds the row for this text box. `id` must already be assigned.
    pub fn into_model(self, project_id: &str) -> Model {
        Model {
            id: self.id,
            project_id: project_id.to_string(),
            content: self.content,
            font_size: self.font_size,
            font_color: self.font_color,
            size: self.size,
            margin_top: self.margin_top,
            margin_left: self.margin_left,
            page_num: self.page_num,
        }
    }
}
