use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reserved id of the platform administrator role.
pub const ADMIN_ROLE_ID: i64 = 0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sys_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub tenant_id: i64,
    pub role_name: String,
    #[sea_orm(column_name = "type")]
    pub role_type: Option<String>,
    pub price_limit: Option<f64>,
    pub status: Option<i32>,
    pub description: Option<String>,
    pub create_time: Option<DateTime>,
    pub create_by: Option<i64>,
    pub update_time: Option<DateTime>,
    pub update_by: Option<i64>,
    pub delete_flag: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined here")
    }
}

impl ActiveModelBehavior for ActiveModel {}
