//! sea-orm entities for the ERP core, one module per table, plus the
//! database connector and the model-level error type.

pub mod db;
pub mod errors;

pub mod financial_account;
pub mod financial_main;
pub mod financial_sub;
pub mod member;
pub mod product_attribute;
pub mod product_category;
pub mod product_unit;
pub mod sys_menu;
pub mod sys_role;
pub mod sys_role_menu_rel;
pub mod sys_user;
pub mod sys_user_role_rel;

/// Soft-delete flag values shared by every table.
pub const NOT_DELETED: i32 = 0;
pub const DELETED: i32 = 1;
