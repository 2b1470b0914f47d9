use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt type discriminator for advance-charge receipts.
pub const RECEIPT_TYPE_ADVANCE: &str = "收预付款";
/// Review status assigned to newly written receipts.
pub const STATUS_UNAUDITED: i32 = 0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_main")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub tenant_id: i64,
    pub related_person_id: Option<i64>,
    pub operator_id: Option<i64>,
    pub receipt_type: String,
    pub receipt_number: Option<String>,
    pub receipt_date: Option<DateTime>,
    pub change_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: Option<i32>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
    pub create_by: Option<i64>,
    pub update_time: Option<DateTime>,
    pub update_by: Option<i64>,
    pub delete_flag: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    FinancialSub,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::FinancialSub => Entity::has_many(super::financial_sub::Entity).into(),
        }
    }
}

impl Related<super::financial_sub::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialSub.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
