//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_product_category;
mod m20240101_000002_create_product_attribute;
mod m20240101_000003_create_product_unit;
mod m20240101_000004_create_member;
mod m20240101_000005_create_sys_user;
mod m20240101_000006_create_financial_account;
mod m20240101_000007_create_financial_main;
mod m20240101_000008_create_financial_sub;
mod m20240101_000009_create_sys_role;
mod m20240101_000010_create_sys_menu;
mod m20240101_000011_create_sys_role_menu_rel;
mod m20240101_000012_create_sys_user_role_rel;
mod m20240101_000013_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_product_category::Migration),
            Box::new(m20240101_000002_create_product_attribute::Migration),
            Box::new(m20240101_000003_create_product_unit::Migration),
            Box::new(m20240101_000004_create_member::Migration),
            Box::new(m20240101_000005_create_sys_user::Migration),
            Box::new(m20240101_000006_create_financial_account::Migration),
            Box::new(m20240101_000007_create_financial_main::Migration),
            Box::new(m20240101_000008_create_financial_sub::Migration),
            Box::new(m20240101_000009_create_sys_role::Migration),
            Box::new(m20240101_000010_create_sys_menu::Migration),
            Box::new(m20240101_000011_create_sys_role_menu_rel::Migration),
            Box::new(m20240101_000012_create_sys_user_role_rel::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000013_add_indexes::Migration),
        ]
    }
}
