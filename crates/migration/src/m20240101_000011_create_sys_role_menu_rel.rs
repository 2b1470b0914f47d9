//! Create `sys_role_menu_rel` table.
//!
//! `menu_id` keeps the legacy bracket-encoded id string, e.g. "[11][12]".
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysRoleMenuRel::Table)
                    .if_not_exists()
                    .col(big_integer(SysRoleMenuRel::Id).primary_key())
                    .col(big_integer(SysRoleMenuRel::RoleId))
                    .col(text(SysRoleMenuRel::MenuId))
                    .col(date_time_null(SysRoleMenuRel::CreateTime))
                    .col(big_integer_null(SysRoleMenuRel::CreateBy))
                    .col(date_time_null(SysRoleMenuRel::UpdateTime))
                    .col(big_integer_null(SysRoleMenuRel::UpdateBy))
                    .col(integer(SysRoleMenuRel::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysRoleMenuRel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysRoleMenuRel {
    Table,
    Id,
    RoleId,
    MenuId,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
