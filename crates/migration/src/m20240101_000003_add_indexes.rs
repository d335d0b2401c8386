use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sibling lookups: children of a parent, duplicate-name checks
        manager
            .create_index(
                Index::create()
                    .name("idx_service_category_parent_name")
                    .table(ServiceCategory::Table)
                    .col(ServiceCategory::ParentId)
                    .col(ServiceCategory::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_by_category")
                    .table(Service::Table)
                    .col(Service::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_by_category").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_category_parent_name").table(ServiceCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceCategory { Table, ParentId, Name }

#[derive(DeriveIden)]
enum Service { Table, CategoryId }
