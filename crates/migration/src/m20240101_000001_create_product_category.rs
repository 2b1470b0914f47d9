//! Create `product_category` table.
//!
//! Categories form a tree through the nullable `parent_id`; rows are
//! soft-deleted through `delete_flag`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductCategory::Table)
                    .if_not_exists()
                    .col(big_integer(ProductCategory::Id).primary_key())
                    .col(big_integer(ProductCategory::TenantId))
                    .col(string_len(ProductCategory::CategoryName, 64))
                    .col(string_len_null(ProductCategory::CategoryNumber, 50))
                    .col(big_integer_null(ProductCategory::ParentId))
                    .col(integer_null(ProductCategory::Sort))
                    .col(string_len_null(ProductCategory::Remark, 255))
                    .col(date_time_null(ProductCategory::CreateTime))
                    .col(big_integer_null(ProductCategory::CreateBy))
                    .col(date_time_null(ProductCategory::UpdateTime))
                    .col(big_integer_null(ProductCategory::UpdateBy))
                    .col(integer(ProductCategory::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductCategory {
    Table,
    Id,
    TenantId,
    CategoryName,
    CategoryNumber,
    ParentId,
    Sort,
    Remark,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
