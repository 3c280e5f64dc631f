use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `works` table and its columns.
#[derive(DeriveIden)]
enum Works {
    Table,
    Id,
    ProjectId,
    AssetKey,
    Size,
    MarginTop,
    MarginLeft,
    Scale,
    PageNum,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Works::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Works::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Works::ProjectId).string().not_null())
                    .col(ColumnDef::new(Works::AssetKey).string().not_null())
                    .col(ColumnDef::new(Works::Size).string().not_null())
                    .col(ColumnDef::new(Works::MarginTop).string().not_null())
                    .col(ColumnDef::new(Works::MarginLeft).string().not_null())
                    // 1.0 means "render at natural size"; zero or negative scales are rejected.
                    .col(
                        ColumnDef::new(Works::Scale)
                            .double()
                            .not_null()
                            .default(1.0)
                            .check(Expr::col(Works::Scale).gt(0.0)),
                    )
                    .col(
                        ColumnDef::new(Works::PageNum)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Works::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Works::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_works_project_id")
                            .from(Works::Table, Works::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Works::Table).to_owned())
            .await
    }
}
