//! Create `sys_menu` table. Menus are platform-wide (no tenant column).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SysMenu::Table)
                    .if_not_exists()
                    .col(big_integer(SysMenu::Id).primary_key())
                    .col(string_len(SysMenu::Name, 64))
                    .col(string_len_null(SysMenu::Title, 64))
                    .col(integer_null(SysMenu::MenuType))
                    .col(string_len_null(SysMenu::Path, 128))
                    .col(string_len_null(SysMenu::Component, 128))
                    .col(string_len_null(SysMenu::Icon, 32))
                    .col(integer_null(SysMenu::Sort))
                    .col(big_integer_null(SysMenu::ParentId))
                    .col(integer_null(SysMenu::Status))
                    .col(integer_null(SysMenu::HideMenu))
                    .col(integer_null(SysMenu::Blank))
                    .col(integer_null(SysMenu::IgnoreKeepAlive))
                    .col(date_time_null(SysMenu::CreateTime))
                    .col(big_integer_null(SysMenu::CreateBy))
                    .col(date_time_null(SysMenu::UpdateTime))
                    .col(big_integer_null(SysMenu::UpdateBy))
                    .col(integer(SysMenu::DeleteFlag).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysMenu::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysMenu {
    Table,
    Id,
    Name,
    Title,
    MenuType,
    Path,
    Component,
    Icon,
    Sort,
    ParentId,
    Status,
    HideMenu,
    Blank,
    IgnoreKeepAlive,
    CreateTime,
    CreateBy,
    UpdateTime,
    UpdateBy,
    DeleteFlag,
}
