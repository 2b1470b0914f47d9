use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tenant-scoped list queries always filter on (tenant_id, delete_flag).
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_tenant")
                    .table(ProductCategory::Table)
                    .col(ProductCategory::TenantId)
                    .col(ProductCategory::DeleteFlag)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_attribute_tenant")
                    .table(ProductAttribute::Table)
                    .col(ProductAttribute::TenantId)
                    .col(ProductAttribute::DeleteFlag)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_unit_tenant")
                    .table(ProductUnit::Table)
                    .col(ProductUnit::TenantId)
                    .col(ProductUnit::DeleteFlag)
                    .to_owned(),
            )
            .await?;

        // Receipt queries filter by tenant and look up by receipt number.
        manager
            .create_index(
                Index::create()
                    .name("idx_financial_main_tenant")
                    .table(FinancialMain::Table)
                    .col(FinancialMain::TenantId)
                    .col(FinancialMain::DeleteFlag)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_financial_main_receipt_number")
                    .table(FinancialMain::Table)
                    .col(FinancialMain::ReceiptNumber)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_financial_sub_main")
                    .table(FinancialSub::Table)
                    .col(FinancialSub::FinancialMainId)
                    .to_owned(),
            )
            .await?;

        // Relation tables are always entered from one side.
        manager
            .create_index(
                Index::create()
                    .name("idx_role_menu_rel_role")
                    .table(SysRoleMenuRel::Table)
                    .col(SysRoleMenuRel::RoleId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_rel_user")
                    .table(SysUserRoleRel::Table)
                    .col(SysUserRoleRel::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_product_category_tenant")
                    .table(ProductCategory::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_product_attribute_tenant")
                    .table(ProductAttribute::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_product_unit_tenant")
                    .table(ProductUnit::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_financial_main_tenant")
                    .table(FinancialMain::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_financial_main_receipt_number")
                    .table(FinancialMain::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_financial_sub_main")
                    .table(FinancialSub::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_role_menu_rel_role")
                    .table(SysRoleMenuRel::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_role_rel_user")
                    .table(SysUserRoleRel::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ProductCategory {
    Table,
    TenantId,
    DeleteFlag,
}

#[derive(DeriveIden)]
enum ProductAttribute {
    Table,
    TenantId,
    DeleteFlag,
}

#[derive(DeriveIden)]
enum ProductUnit {
    Table,
    TenantId,
    DeleteFlag,
}

#[derive(DeriveIden)]
enum FinancialMain {
    Table,
    TenantId,
    ReceiptNumber,
    DeleteFlag,
}

#[derive(DeriveIden)]
enum FinancialSub {
    Table,
    FinancialMainId,
}

#[derive(DeriveIden)]
enum SysRoleMenuRel {
    Table,
    RoleId,
}

#[derive(DeriveIden)]
enum SysUserRoleRel {
    Table,
    UserId,
}
