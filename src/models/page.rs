use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bleed box of a page's SVG art: x, y, width, height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct BleedBox(pub [String; 4]);

/// SeaORM entity for the `pages` table.
///
/// `size`, `margin_top` and `margin_left` describe the slot a work is placed in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub template_id: String,
    pub position: i32,
    #[sea_orm(unique)]
    pub asset_key: String,
    pub preview_asset_key: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub bleed: Option<BleedBox>,
    pub size: String,
    pub margin_top: String,
    pub margin_left: String,
    pub background_size: String,
    pub is_content_page: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::template::Entity",
        from = "Column::TemplateId",
        to = "super::template::Column::Id"
    )]
    Template,
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
