use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `attribute_value` holds the selectable values joined with `|`,
/// e.g. "red|green|blue".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_attribute")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub tenant_id: i64,
    pub attribute_name: String,
    pub attribute_value: Option<String>,
    pub remark: Option<String>,
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
