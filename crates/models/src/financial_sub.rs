use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_sub")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub tenant_id: i64,
    pub financial_main_id: i64,
    pub account_id: Option<i64>,
    pub single_amount: Option<f64>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
    pub create_by: Option<i64>,
    pub update_time: Option<DateTime>,
    pub update_by: Option<i64>,
    pub delete_flag: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    FinancialMain,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::FinancialMain => Entity::belongs_to(super::financial_main::Entity)
                .from(Column::FinancialMainId)
                .to(super::financial_main::Column::Id)
                .into(),
        }
    }
}

impl Related<super::financial_main::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialMain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
