//! Create `financial_sub` table with FK to `financial_main`.
//!
//! One row per account entry of a receipt.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinancialSub::Table)
                    .if_not_exists()
                    .col(big_integer(FinancialSub::Id).primary_key())
                    .col(big_integer(FinancialSub::TenantId))
                    .col(big_integer(FinancialSub::FinancialMainId))
                    .col(big_integer_null(FinancialSub::AccountId))
                    .col(double_null(FinancialSub::SingleAmount))
                    .col(string_len_null(FinancialSub::Remark, 255))
                    .col(date_time_null(FinancialSub::CreateTime))
                    .col(big_integer_null(FinancialSub::CreateBy))
                    .col(date_time_null(FinancialSub::UpdateTime))
                    .col(big_integer_null(FinancialSub::UpdateBy))
                    .col(integer(FinancialSub::DeleteFlag).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_sub_main")
                            .from(FinancialSub::Table, FinancialSub::FinancialMainId)
                            .to(FinancialMain::Table, FinancialMain::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinancialSub::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FinancialSub {
    Table,
    Id,
    TenantId,
    FinancialMainId,
    AccountId,
    SingleAmount,
    Remark,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}

#[derive(DeriveIden)]
enum FinancialMain {
    Table,
    Id,
}
