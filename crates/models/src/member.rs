use sea_orm::{entity::prelude::*, ConnectionTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub tenant_id: i64,
    pub member_number: Option<String>,
    pub member_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub advance_payment: f64,
    pub status: Option<i32>,
    pub remark: Option<String>,
    pub sort: Option<i32>,
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

pub async fn find_active_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::DeleteFlag.eq(crate::NOT_DELETED))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<Vec<Model>, errors::ModelError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Entity::find()
        .filter(Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Adds `amount` to the member's prepaid balance. Returns false when the
/// member does not exist or is deleted.
pub async fn add_advance_amount<C: ConnectionTrait>(
    db: &C,
    member_id: i64,
    amount: f64,
) -> Result<bool, errors::ModelError> {
    let Some(member) = find_active_by_id(db, member_id).await? else {
        return Ok(false);
    };
    let balance = member.advance_payment + amount;
    let mut active = member.into_active_model();
    active.advance_payment = Set(balance);
    active
        .update(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(true)
}
