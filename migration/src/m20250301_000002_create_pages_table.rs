use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `pages` table and its columns.
#[derive(DeriveIden)]
enum Pages {
    Table,
    Id,
    TemplateId,
    Position,
    AssetKey,
    PreviewAssetKey,
    Bleed,
    Size,
    MarginTop,
    MarginLeft,
    BackgroundSize,
    IsContentPage,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Templates {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pages::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Pages::TemplateId).string().not_null())
                    .col(
                        ColumnDef::new(Pages::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Pages::AssetKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Pages::PreviewAssetKey).string().not_null())
                    .col(ColumnDef::new(Pages::Bleed).json())
                    .col(ColumnDef::new(Pages::Size).string().not_null())
                    .col(ColumnDef::new(Pages::MarginTop).string().not_null())
                    .col(ColumnDef::new(Pages::MarginLeft).string().not_null())
                    .col(ColumnDef::new(Pages::BackgroundSize).string().not_null())
                    .col(
                        ColumnDef::new(Pages::IsContentPage)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pages_template_id")
                            .from(Pages::Table, Pages::TemplateId)
                            .to(Templates::Table, Templates::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await
    }
}
