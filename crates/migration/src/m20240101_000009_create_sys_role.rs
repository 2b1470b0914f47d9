//! Create `sys_role` table. Row id 0 is reserved for the platform admin role.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysRole::Table)
                    .if_not_exists()
                    .col(big_integer(SysRole::Id).primary_key())
                    .col(big_integer(SysRole::TenantId))
                    .col(string_len(SysRole::RoleName, 64))
                    .col(string_len_null(SysRole::Type, 20))
                    .col(double_null(SysRole::PriceLimit))
                    .col(integer_null(SysRole::Status))
                    .col(string_len_null(SysRole::Description, 100))
                    .col(date_time_null(SysRole::CreateTime))
                    .col(big_integer_null(SysRole::CreateBy))
                    .col(date_time_null(SysRole::UpdateTime))
                    .col(big_integer_null(SysRole::UpdateBy))
                    .col(integer(SysRole::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysRole {
    Table,
    Id,
    TenantId,
    RoleName,
    Type,
    PriceLimit,
    Status,
    Description,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
