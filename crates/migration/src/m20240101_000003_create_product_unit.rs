//! Create `product_unit` table.
//!
//! `compute_unit` is the derived business key built from the basic unit and
//! the ratio'd secondary units.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductUnit::Table)
                    .if_not_exists()
                    .col(big_integer(ProductUnit::Id).primary_key())
                    .col(big_integer(ProductUnit::TenantId))
                    .col(string_len(ProductUnit::ComputeUnit, 100))
                    .col(string_len(ProductUnit::BasicUnit, 50))
                    .col(string_len_null(ProductUnit::OtherUnit, 50))
                    .col(string_len_null(ProductUnit::OtherUnitTwo, 50))
                    .col(string_len_null(ProductUnit::OtherUnitThree, 50))
                    .col(double_null(ProductUnit::Ratio))
                    .col(double_null(ProductUnit::RatioTwo))
                    .col(double_null(ProductUnit::RatioThree))
                    .col(integer_null(ProductUnit::Status))
                    .col(date_time_null(ProductUnit::CreateTime))
                    .col(big_integer_null(ProductUnit::CreateBy))
                    .col(date_time_null(ProductUnit::UpdateTime))
                    .col(big_integer_null(ProductUnit::UpdateBy))
                    .col(integer(ProductUnit::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductUnit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductUnit {
    Table,
    Id,
    TenantId,
    ComputeUnit,
    BasicUnit,
    OtherUnit,
    OtherUnitTwo,
    OtherUnitThree,
    Ratio,
    RatioTwo,
    RatioThree,
    Status,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
