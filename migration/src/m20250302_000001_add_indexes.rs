use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    OwnerId,
    TemplateId,
}

#[derive(DeriveIden)]
enum Pages {
    Table,
    TemplateId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    PortfolioId,
}

#[derive(DeriveIden)]
enum Works {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum Texts {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum Feedbacks {
    Table,
    Status,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on portfolios.owner_id for the "my portfolios" listing
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_owner_id")
                    .table(Portfolios::Table)
                    .col(Portfolios::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Index on portfolios.template_id for usage counting
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_template_id")
                    .table(Portfolios::Table)
                    .col(Portfolios::TemplateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pages_template_id")
                    .table(Pages::Table)
                    .col(Pages::TemplateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_portfolio_id")
                    .table(Projects::Table)
                    .col(Projects::PortfolioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_works_project_id")
                    .table(Works::Table)
                    .col(Works::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_texts_project_id")
                    .table(Texts::Table)
                    .col(Texts::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on feedbacks.status for the admin review queue
        manager
            .create_index(
                Index::create()
                    .name("idx_feedbacks_status")
                    .table(Feedbacks::Table)
                    .col(Feedbacks::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_portfolios_owner_id",
            "idx_portfolios_template_id",
            "idx_pages_template_id",
            "idx_projects_portfolio_id",
            "idx_works_project_id",
            "idx_texts_project_id",
            "idx_feedbacks_status",
        ] {
            manager.drop_index(Index::drop().name(name).to_owned()).await?;
        }

        Ok(())
    }
}
