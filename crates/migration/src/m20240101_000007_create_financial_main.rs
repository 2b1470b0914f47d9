//! Create `financial_main` table: the head record of a financial receipt.
//!
//! `receipt_type` discriminates receipt families; advance-charge receipts use
//! the "收预付款" constant.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinancialMain::Table)
                    .if_not_exists()
                    .col(big_integer(FinancialMain::Id).primary_key())
                    .col(big_integer(FinancialMain::TenantId))
                    .col(big_integer_null(FinancialMain::RelatedPersonId))
                    .col(big_integer_null(FinancialMain::OperatorId))
                    .col(string_len(FinancialMain::ReceiptType, 20))
                    .col(string_len_null(FinancialMain::ReceiptNumber, 50))
                    .col(date_time_null(FinancialMain::ReceiptDate))
                    .col(double_null(FinancialMain::ChangeAmount))
                    .col(double_null(FinancialMain::TotalAmount))
                    .col(integer_null(FinancialMain::Status))
                    .col(string_len_null(FinancialMain::Remark, 255))
                    .col(date_time_null(FinancialMain::CreateTime))
                    .col(big_integer_null(FinancialMain::CreateBy))
                    .col(date_time_null(FinancialMain::UpdateTime))
                    .col(big_integer_null(FinancialMain::UpdateBy))
                    .col(integer(FinancialMain::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinancialMain::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FinancialMain {
    Table,
    Id,
    TenantId,
    RelatedPersonId,
    OperatorId,
    ReceiptType,
    ReceiptNumber,
    ReceiptDate,
    ChangeAmount,
    TotalAmount,
    Status,
    Remark,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
