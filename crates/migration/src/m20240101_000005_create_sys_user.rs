//! Create `sys_user` table (operator lookups only; credentials are out of scope).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysUser::Table)
                    .if_not_exists()
                    .col(big_integer(SysUser::Id).primary_key())
                    .col(big_integer(SysUser::TenantId))
                    .col(string_len(SysUser::UserName, 31))
                    .col(string_len(SysUser::Name, 21))
                    .col(string_len_null(SysUser::Email, 64))
                    .col(string_len_null(SysUser::PhoneNumber, 20))
                    .col(integer_null(SysUser::Status))
                    .col(string_len_null(SysUser::Description, 255))
                    .col(date_time_null(SysUser::CreateTime))
                    .col(big_integer_null(SysUser::CreateBy))
                    .col(date_time_null(SysUser::UpdateTime))
                    .col(big_integer_null(SysUser::UpdateBy))
                    .col(integer(SysUser::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysUser {
    Table,
    Id,
    TenantId,
    UserName,
    Name,
    Email,
    PhoneNumber,
    Status,
    Description,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
