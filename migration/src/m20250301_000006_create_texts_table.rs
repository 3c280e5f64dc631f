use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `texts` table and its columns.
#[derive(DeriveIden)]
enum Texts {
    Table,
    Id,
    ProjectId,
    Content,
    FontSize,
    FontColor,
    Size,
    MarginTop,
    MarginLeft,
    PageNum,
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
                    .table(Texts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Texts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Texts::ProjectId).string().not_null())
                    .col(ColumnDef::new(Texts::Content).text().not_null())
                    .col(ColumnDef::new(Texts::FontSize).string().not_null())
                    .col(
                        ColumnDef::new(Texts::FontColor)
                            .string_len(6)
                            .not_null()
                            .default("000000"),
                    )
                    .col(ColumnDef::new(Texts::Size).string().not_null())
                    .col(ColumnDef::new(Texts::MarginTop).string().not_null())
                    .col(ColumnDef::new(Texts::MarginLeft).string().not_null())
                    .col(
                        ColumnDef::new(Texts::PageNum)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_texts_project_id")
                            .from(Texts::Table, Texts::ProjectId)
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
            .drop_table(Table::drop().table(Texts::Table).to_owned())
            .await
    }
}
