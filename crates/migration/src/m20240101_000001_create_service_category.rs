//! Create `service_category` table.
//!
//! Self-referencing through `parent_id`; a referenced row cannot be deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceCategory::Id))
                    .col(string_len(ServiceCategory::Name, 255))
                    .col(string_len_null(ServiceCategory::Image, 512))
                    .col(integer_null(ServiceCategory::ParentId))
                    .col(timestamp_with_time_zone(ServiceCategory::CreatedAt))
                    .col(timestamp_with_time_zone(ServiceCategory::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_category_parent")
                            .from(ServiceCategory::Table, ServiceCategory::ParentId)
                            .to(ServiceCategory::Table, ServiceCategory::Id)
                            // NO ACTION still rejects the delete; SQLite reports it as code 787
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceCategory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceCategory {
    Table,
    Id,
    Name,
    Image,
    ParentId,
    CreatedAt,
    UpdatedAt,
}
