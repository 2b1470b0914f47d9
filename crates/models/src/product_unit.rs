use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `compute_unit` is the derived business key, e.g. "个/(箱=12个)".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_unit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub tenant_id: i64,
    pub compute_unit: String,
    pub basic_unit: String,
    pub other_unit: Option<String>,
    pub other_unit_two: Option<String>,
    pub other_unit_three: Option<String>,
    pub ratio: Option<f64>,
    pub ratio_two: Option<f64>,
    pub ratio_three: Option<f64>,
    pub status: Option<i32>,
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
