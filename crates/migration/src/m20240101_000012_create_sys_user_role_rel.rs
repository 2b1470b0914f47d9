//! Create `sys_user_role_rel` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysUserRoleRel::Table)
                    .if_not_exists()
                    .col(big_integer(SysUserRoleRel::Id).primary_key())
                    .col(big_integer(SysUserRoleRel::TenantId))
                    .col(big_integer(SysUserRoleRel::UserId))
                    .col(big_integer(SysUserRoleRel::RoleId))
                    .col(date_time_null(SysUserRoleRel::CreateTime))
                    .col(big_integer_null(SysUserRoleRel::CreateBy))
                    .col(date_time_null(SysUserRoleRel::UpdateTime))
                    .col(big_integer_null(SysUserRoleRel::UpdateBy))
                    .col(integer(SysUserRoleRel::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysUserRoleRel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysUserRoleRel {
    Table,
    Id,
    TenantId,
    UserId,
    RoleId,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
