//! Create `product_attribute` table.
//!
//! `attribute_value` stores the pipe-joined list of selectable values.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductAttribute::Table)
                    .if_not_exists()
                    .col(big_integer(ProductAttribute::Id).primary_key())
                    .col(big_integer(ProductAttribute::TenantId))
                    .col(string_len(ProductAttribute::AttributeName, 100))
                    .col(text_null(ProductAttribute::AttributeValue))
                    .col(string_len_null(ProductAttribute::Remark, 255))
                    .col(date_time_null(ProductAttribute::CreateTime))
                    .col(big_integer_null(ProductAttribute::CreateBy))
                    .col(date_time_null(ProductAttribute::UpdateTime))
                    .col(big_integer_null(ProductAttribute::UpdateBy))
                    .col(integer(ProductAttribute::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductAttribute::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductAttribute {
    Table,
    Id,
    TenantId,
    AttributeName,
    AttributeValue,
    Remark,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
