//! Create `member` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(big_integer(Member::Id).primary_key())
                    .col(big_integer(Member::TenantId))
                    .col(string_len_null(Member::MemberNumber, 100))
                    .col(string_len_null(Member::MemberName, 100))
                    .col(string_len_null(Member::PhoneNumber, 20))
                    .col(string_len_null(Member::Email, 64))
                    // Prepaid balance, increased by advance-charge receipts.
                    .col(double(Member::AdvancePayment).default(0))
                    .col(integer_null(Member::Status))
                    .col(string_len_null(Member::Remark, 255))
                    .col(integer_null(Member::Sort))
                    .col(date_time_null(Member::CreateTime))
                    .col(big_integer_null(Member::CreateBy))
                    .col(date_time_null(Member::UpdateTime))
                    .col(big_integer_null(Member::UpdateBy))
                    .col(integer(Member::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
    TenantId,
    MemberNumber,
    MemberName,
    PhoneNumber,
    Email,
    AdvancePayment,
    Status,
    Remark,
    Sort,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
