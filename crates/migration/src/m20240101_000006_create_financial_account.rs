//! Create `financial_account` table (settlement accounts referenced by receipt rows).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinancialAccount::Table)
                    .if_not_exists()
                    .col(big_integer(FinancialAccount::Id).primary_key())
                    .col(big_integer(FinancialAccount::TenantId))
                    .col(string_len(FinancialAccount::AccountName, 50))
                    .col(string_len_null(FinancialAccount::AccountNumber, 50))
                    .col(double_null(FinancialAccount::InitialAmount))
                    .col(double_null(FinancialAccount::CurrentAmount))
                    .col(integer_null(FinancialAccount::Sort))
                    .col(integer_null(FinancialAccount::Status))
                    .col(string_len_null(FinancialAccount::Remark, 255))
                    .col(date_time_null(FinancialAccount::CreateTime))
                    .col(big_integer_null(FinancialAccount::CreateBy))
                    .col(date_time_null(FinancialAccount::UpdateTime))
                    .col(big_integer_null(FinancialAccount::UpdateBy))
                    .col(integer(FinancialAccount::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinancialAccount::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FinancialAccount {
    Table,
    Id,
    TenantId,
    AccountName,
    AccountNumber,
    InitialAmount,
    CurrentAmount,
    Sort,
    Status,
    Remark,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
