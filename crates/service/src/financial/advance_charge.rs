//! Advance-charge receipts (收预付款): a member pays money in ahead of time.
//!
//! Writing a receipt is transactional: the head row, the account rows and the
//! member's prepaid-balance increment either all land or none do. An update
//! replaces the existing account rows wholesale.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::pagination::{PageResult, Pagination};
use common::response::Response;
use models::financial_main::{self, Entity as FinancialMain, RECEIPT_TYPE_ADVANCE, STATUS_UNAUDITED};
use models::financial_sub::{self, Entity as FinancialSub};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{non_blank, parse_date, DateTime};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvanceChargeRequest {
    pub id: Option<i64>,
    pub member_id: Option<i64>,
    /// The financial personnel handling the receipt.
    pub financial_personnel_id: Option<i64>,
    pub receipt_number: Option<String>,
    /// "YYYY-MM-DD" or "YYYY-MM-DD HH:MM:SS".
    pub receipt_date: Option<String>,
    pub total_amount: Option<f64>,
    pub remark: Option<String>,
    pub table_data: Vec<AdvanceChargeRowRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvanceChargeRowRequest {
    pub account_id: Option<i64>,
    pub amount: Option<f64>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvanceChargeQuery {
    pub receipt_number: Option<String>,
    pub member_id: Option<i64>,
    pub financial_personnel_id: Option<i64>,
    pub create_by: Option<i64>,
    pub status: Option<i32>,
    /// Substring match.
    pub remark: Option<String>,
    /// Inclusive creation-time range, same formats as the receipt date.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvanceChargeStatusRequest {
    pub ids: Option<Vec<i64>>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvanceChargeVo {
    pub id: i64,
    pub member_id: Option<i64>,
    pub member_name: Option<String>,
    pub receipt_number: Option<String>,
    pub receipt_date: Option<DateTime>,
    pub financial_personnel_name: Option<String>,
    pub operator_name: Option<String>,
    pub total_amount: Option<f64>,
    pub status: Option<i32>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvanceChargeRowVo {
    pub account_id: Option<i64>,
    pub account_name: Option<String>,
    pub amount: Option<f64>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvanceChargeDetailVo {
    pub id: i64,
    pub member_id: Option<i64>,
    pub member_name: Option<String>,
    pub financial_personnel_id: Option<i64>,
    pub financial_personnel_name: Option<String>,
    pub receipt_number: Option<String>,
    pub receipt_date: Option<DateTime>,
    pub total_amount: Option<f64>,
    pub status: Option<i32>,
    pub remark: Option<String>,
    pub table_data: Vec<AdvanceChargeRowVo>,
}

async fn user_names(
    db: &DatabaseConnection,
    ids: Vec<i64>,
) -> Result<HashMap<i64, String>, ServiceError> {
    let users = models::sys_user::find_by_ids(db, ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u.name)).collect())
}

async fn member_names(
    db: &DatabaseConnection,
    ids: Vec<i64>,
) -> Result<HashMap<i64, String>, ServiceError> {
    let members = models::member::find_by_ids(db, ids).await?;
    Ok(members
        .into_iter()
        .filter_map(|m| m.member_name.map(|name| (m.id, name)))
        .collect())
}

async fn account_names(
    db: &DatabaseConnection,
    ids: Vec<i64>,
) -> Result<HashMap<i64, String>, ServiceError> {
    let accounts = models::financial_account::find_by_ids(db, ids).await?;
    Ok(accounts.into_iter().map(|a| (a.id, a.account_name)).collect())
}

/// Writes one advance-charge receipt. `member_id` and a parseable
/// `receipt_date` are mandatory; an empty row list resolves to QueryDataEmpty.
pub async fn add_or_update_advance_charge(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<AdvanceChargeRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let Some(member_id) = request.member_id else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let receipt_date = match non_blank(&request.receipt_date).as_deref().and_then(parse_date) {
        Some(date) => date,
        None => return Response::message(&codes::PARAMETER_NULL, locale),
    };
    if request.table_data.is_empty() {
        return Response::message(&codes::QUERY_DATA_EMPTY, locale);
    }
    let (success, failure) = if request.id.is_some() {
        (&codes::ADVANCE.update_success, &codes::ADVANCE.update_error)
    } else {
        (&codes::ADVANCE.add_success, &codes::ADVANCE.add_error)
    };

    let now = Utc::now().naive_utc();
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(err) => {
            warn!(error = %err, "advance charge transaction begin failed");
            return Response::message(failure, locale);
        }
    };

    let head_id = if let Some(id) = request.id {
        let current = FinancialMain::find()
            .filter(financial_main::Column::Id.eq(id))
            .filter(financial_main::Column::DeleteFlag.eq(models::NOT_DELETED))
            .one(&txn)
            .await;
        let current = match current {
            Ok(Some(current)) => current,
            Ok(None) => {
                let _ = txn.rollback().await;
                return Response::message(failure, locale);
            }
            Err(err) => {
                warn!(error = %err, "advance charge lookup failed");
                let _ = txn.rollback().await;
                return Response::message(failure, locale);
            }
        };

        // Replace the existing account rows wholesale.
        if let Err(err) = FinancialSub::delete_many()
            .filter(financial_sub::Column::FinancialMainId.eq(id))
            .exec(&txn)
            .await
        {
            warn!(error = %err, "advance charge row cleanup failed");
            let _ = txn.rollback().await;
            return Response::message(failure, locale);
        }

        let mut active = current.into_active_model();
        active.related_person_id = Set(Some(member_id));
        active.operator_id = Set(request.financial_personnel_id);
        active.receipt_number = Set(request.receipt_number.clone());
        active.receipt_date = Set(Some(receipt_date));
        active.change_amount = Set(request.total_amount);
        active.total_amount = Set(request.total_amount);
        active.remark = Set(request.remark.clone());
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        if let Err(err) = active.update(&txn).await {
            warn!(error = %err, "advance charge head update failed");
            let _ = txn.rollback().await;
            return Response::message(failure, locale);
        }
        id
    } else {
        let head_id = ids.next_id();
        let head = financial_main::ActiveModel {
            id: Set(head_id),
            tenant_id: Set(ctx.current_tenant_id()),
            related_person_id: Set(Some(member_id)),
            operator_id: Set(request.financial_personnel_id),
            receipt_type: Set(RECEIPT_TYPE_ADVANCE.to_string()),
            receipt_number: Set(request.receipt_number.clone()),
            receipt_date: Set(Some(receipt_date)),
            change_amount: Set(request.total_amount),
            total_amount: Set(request.total_amount),
            status: Set(Some(STATUS_UNAUDITED)),
            remark: Set(request.remark.clone()),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        };
        if let Err(err) = head.insert(&txn).await {
            warn!(error = %err, "advance charge head insert failed");
            let _ = txn.rollback().await;
            return Response::message(failure, locale);
        }
        head_id
    };

    let rows: Vec<financial_sub::ActiveModel> = request
        .table_data
        .iter()
        .map(|row| financial_sub::ActiveModel {
            id: Set(ids.next_id()),
            tenant_id: Set(ctx.current_tenant_id()),
            financial_main_id: Set(head_id),
            account_id: Set(row.account_id),
            single_amount: Set(row.amount),
            remark: Set(row.remark.clone()),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        })
        .collect();
    if let Err(err) = FinancialSub::insert_many(rows).exec(&txn).await {
        warn!(error = %err, "advance charge row insert failed");
        let _ = txn.rollback().await;
        return Response::message(failure, locale);
    }

    match models::member::add_advance_amount(&txn, member_id, request.total_amount.unwrap_or(0.0))
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            let _ = txn.rollback().await;
            return Response::message(failure, locale);
        }
        Err(err) => {
            warn!(error = %err, "member balance update failed");
            let _ = txn.rollback().await;
            return Response::message(failure, locale);
        }
    }

    match txn.commit().await {
        Ok(()) => Response::message(success, locale),
        Err(err) => {
            warn!(error = %err, "advance charge commit failed");
            Response::message(failure, locale)
        }
    }
}

/// Paged receipt list, newest first, with member/operator/personnel names
/// resolved through bulk lookups.
pub async fn advance_charge_page_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    query: Option<AdvanceChargeQuery>,
) -> Response<PageResult<AdvanceChargeVo>> {
    let locale = ctx.system_language();
    let query = query.unwrap_or_default();
    let (page, page_size) = Pagination::new(query.page, query.page_size).normalize();

    let mut select = FinancialMain::find()
        .filter(financial_main::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(financial_main::Column::ReceiptType.eq(RECEIPT_TYPE_ADVANCE))
        .filter(financial_main::Column::DeleteFlag.eq(models::NOT_DELETED))
        .order_by_desc(financial_main::Column::CreateTime);
    if let Some(number) = non_blank(&query.receipt_number) {
        select = select.filter(financial_main::Column::ReceiptNumber.eq(number));
    }
    if let Some(member_id) = query.member_id {
        select = select.filter(financial_main::Column::RelatedPersonId.eq(member_id));
    }
    if let Some(personnel_id) = query.financial_personnel_id {
        select = select.filter(financial_main::Column::OperatorId.eq(personnel_id));
    }
    if let Some(create_by) = query.create_by {
        select = select.filter(financial_main::Column::CreateBy.eq(create_by));
    }
    if let Some(status) = query.status {
        select = select.filter(financial_main::Column::Status.eq(status));
    }
    if let Some(remark) = non_blank(&query.remark) {
        select = select.filter(financial_main::Column::Remark.contains(&remark));
    }
    if let Some(start) = query.start_date.as_deref().and_then(parse_date) {
        select = select.filter(financial_main::Column::CreateTime.gte(start));
    }
    if let Some(end) = query.end_date.as_deref().and_then(parse_date) {
        select = select.filter(financial_main::Column::CreateTime.lte(end));
    }

    let paginator = select.paginate(db, page_size);
    let (total, pages) = match paginator.num_items_and_pages().await {
        Ok(n) => (n.number_of_items, n.number_of_pages),
        Err(err) => {
            warn!(error = %err, "advance charge count failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    let heads = match paginator.fetch_page(page).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "advance charge page fetch failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    if heads.is_empty() {
        return Response::message(&codes::QUERY_DATA_EMPTY, locale);
    }

    let member_ids: Vec<i64> = heads
        .iter()
        .filter_map(|h| h.related_person_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let user_ids: Vec<i64> = heads
        .iter()
        .flat_map(|h| [h.operator_id, h.create_by])
        .flatten()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let members = member_names(db, member_ids).await.unwrap_or_else(|err| {
        warn!(error = %err, "member name lookup failed");
        HashMap::new()
    });
    let users = user_names(db, user_ids).await.unwrap_or_else(|err| {
        warn!(error = %err, "user name lookup failed");
        HashMap::new()
    });

    let records = heads
        .into_iter()
        .map(|h| AdvanceChargeVo {
            id: h.id,
            member_name: h
                .related_person_id
                .and_then(|id| members.get(&id).cloned()),
            member_id: h.related_person_id,
            receipt_number: h.receipt_number,
            receipt_date: h.receipt_date,
            financial_personnel_name: h.operator_id.and_then(|id| users.get(&id).cloned()),
            operator_name: h.create_by.and_then(|id| users.get(&id).cloned()),
            total_amount: h.total_amount,
            status: h.status,
            remark: h.remark,
            create_time: h.create_time,
        })
        .collect();
    Response::page(PageResult {
        records,
        total,
        pages,
        size: page_size,
    })
}

/// One receipt with its account rows. A missing id resolves to ParameterNull,
/// an unknown one to QueryDataEmpty.
pub async fn advance_charge_detail(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> Response<AdvanceChargeDetailVo> {
    let locale = ctx.system_language();
    let Some(id) = id else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };

    let head = match FinancialMain::find()
        .filter(financial_main::Column::Id.eq(id))
        .filter(financial_main::Column::ReceiptType.eq(RECEIPT_TYPE_ADVANCE))
        .filter(financial_main::Column::DeleteFlag.eq(models::NOT_DELETED))
        .one(db)
        .await
    {
        Ok(Some(head)) => head,
        Ok(None) => return Response::message(&codes::QUERY_DATA_EMPTY, locale),
        Err(err) => {
            warn!(error = %err, "advance charge detail lookup failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };

    let rows = match FinancialSub::find()
        .filter(financial_sub::Column::FinancialMainId.eq(id))
        .filter(financial_sub::Column::DeleteFlag.eq(models::NOT_DELETED))
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "advance charge row lookup failed");
            Vec::new()
        }
    };

    let account_ids: Vec<i64> = rows
        .iter()
        .filter_map(|r| r.account_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let accounts = account_names(db, account_ids).await.unwrap_or_else(|err| {
        warn!(error = %err, "account name lookup failed");
        HashMap::new()
    });
    let members = member_names(db, head.related_person_id.into_iter().collect())
        .await
        .unwrap_or_default();
    let users = user_names(db, head.operator_id.into_iter().collect())
        .await
        .unwrap_or_default();

    let table_data = rows
        .into_iter()
        .map(|r| AdvanceChargeRowVo {
            account_name: r.account_id.and_then(|id| accounts.get(&id).cloned()),
            account_id: r.account_id,
            amount: r.single_amount,
            remark: r.remark,
        })
        .collect();
    Response::data(AdvanceChargeDetailVo {
        id: head.id,
        member_name: head
            .related_person_id
            .and_then(|id| members.get(&id).cloned()),
        member_id: head.related_person_id,
        financial_personnel_name: head.operator_id.and_then(|id| users.get(&id).cloned()),
        financial_personnel_id: head.operator_id,
        receipt_number: head.receipt_number,
        receipt_date: head.receipt_date,
        total_amount: head.total_amount,
        status: head.status,
        remark: head.remark,
        table_data,
    })
}

/// Soft-deletes receipt heads and their rows.
pub async fn delete_advance_charges(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: Option<Vec<i64>>,
) -> Response<String> {
    let locale = ctx.system_language();
    let ids = match ids {
        Some(list) if !list.is_empty() => list,
        _ => return Response::message(&codes::PARAMETER_NULL, locale),
    };

    let heads = FinancialMain::update_many()
        .col_expr(
            financial_main::Column::DeleteFlag,
            Expr::value(models::DELETED),
        )
        .filter(financial_main::Column::Id.is_in(ids.clone()))
        .filter(financial_main::Column::ReceiptType.eq(RECEIPT_TYPE_ADVANCE))
        .exec(db)
        .await;
    match heads {
        Ok(res) if res.rows_affected > 0 => {}
        Ok(_) => return Response::message(&codes::ADVANCE.delete_error, locale),
        Err(err) => {
            warn!(error = %err, "advance charge head delete failed");
            return Response::message(&codes::ADVANCE.delete_error, locale);
        }
    }

    if let Err(err) = FinancialSub::update_many()
        .col_expr(
            financial_sub::Column::DeleteFlag,
            Expr::value(models::DELETED),
        )
        .filter(financial_sub::Column::FinancialMainId.is_in(ids))
        .exec(db)
        .await
    {
        warn!(error = %err, "advance charge row delete failed");
        return Response::message(&codes::ADVANCE.delete_error, locale);
    }
    Response::message(&codes::ADVANCE.delete_success, locale)
}

/// Bulk review-status change.
pub async fn update_advance_charges_status(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    request: Option<AdvanceChargeStatusRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let ids = match request.ids {
        Some(list) if !list.is_empty() => list,
        _ => return Response::message(&codes::PARAMETER_NULL, locale),
    };
    let Some(status) = request.status else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };

    let result = FinancialMain::update_many()
        .col_expr(financial_main::Column::Status, Expr::value(status))
        .filter(financial_main::Column::Id.is_in(ids))
        .exec(db)
        .await;
    match result {
        Ok(res) if res.rows_affected > 0 => {
            Response::message(&codes::UPDATE_ADVANCE_STATUS_SUCCESS, locale)
        }
        Ok(_) => Response::message(&codes::UPDATE_ADVANCE_STATUS_ERROR, locale),
        Err(err) => {
            warn!(error = %err, "advance charge status update failed");
            Response::message(&codes::UPDATE_ADVANCE_STATUS_ERROR, locale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, zh_context, TEST_TENANT, TEST_USER};
    use common::snowflake::Snowflake;
    use models::{financial_account, member, sys_user};

    async fn seed_member(db: &DatabaseConnection, id: i64, name: &str, balance: f64) {
        member::ActiveModel {
            id: Set(id),
            tenant_id: Set(TEST_TENANT),
            member_number: Set(Some(format!("M{id}"))),
            member_name: Set(Some(name.to_string())),
            phone_number: Set(None),
            email: Set(None),
            advance_payment: Set(balance),
            status: Set(Some(0)),
            remark: Set(None),
            sort: Set(None),
            create_time: Set(Some(Utc::now().naive_utc())),
            create_by: Set(Some(TEST_USER)),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn seed_user(db: &DatabaseConnection, id: i64, name: &str) {
        sys_user::ActiveModel {
            id: Set(id),
            tenant_id: Set(TEST_TENANT),
            user_name: Set(format!("user{id}")),
            name: Set(name.to_string()),
            email: Set(None),
            phone_number: Set(None),
            status: Set(Some(0)),
            description: Set(None),
            create_time: Set(Some(Utc::now().naive_utc())),
            create_by: Set(None),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn seed_account(db: &DatabaseConnection, id: i64, name: &str) {
        financial_account::ActiveModel {
            id: Set(id),
            tenant_id: Set(TEST_TENANT),
            account_name: Set(name.to_string()),
            account_number: Set(None),
            initial_amount: Set(Some(0.0)),
            current_amount: Set(Some(0.0)),
            sort: Set(None),
            status: Set(Some(0)),
            remark: Set(None),
            create_time: Set(Some(Utc::now().naive_utc())),
            create_by: Set(Some(TEST_USER)),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
        .insert(db)
        .await
        .unwrap();
    }

    fn request(member_id: i64, amount: f64) -> AdvanceChargeRequest {
        AdvanceChargeRequest {
            member_id: Some(member_id),
            financial_personnel_id: Some(2002),
            receipt_number: Some("QGD00001".into()),
            receipt_date: Some("2024-06-01".into()),
            total_amount: Some(amount),
            table_data: vec![AdvanceChargeRowRequest {
                account_id: Some(301),
                amount: Some(amount),
                remark: None,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn required_fields_are_validated() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_advance_charge(&db, &ctx, &ids, None).await;
        assert!(resp.is(&codes::PARAMETER_NULL));

        let mut no_member = request(1, 100.0);
        no_member.member_id = None;
        let resp = add_or_update_advance_charge(&db, &ctx, &ids, Some(no_member)).await;
        assert!(resp.is(&codes::PARAMETER_NULL));

        let mut bad_date = request(1, 100.0);
        bad_date.receipt_date = Some("06/01/2024".into());
        let resp = add_or_update_advance_charge(&db, &ctx, &ids, Some(bad_date)).await;
        assert!(resp.is(&codes::PARAMETER_NULL));

        let mut no_rows = request(1, 100.0);
        no_rows.table_data.clear();
        let resp = add_or_update_advance_charge(&db, &ctx, &ids, Some(no_rows)).await;
        assert!(resp.is(&codes::QUERY_DATA_EMPTY));
    }

    #[tokio::test]
    async fn create_writes_head_rows_and_balance_atomically() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_member(&db, 77, "张三", 50.0).await;

        let resp = add_or_update_advance_charge(&db, &ctx, &ids, Some(request(77, 100.0))).await;
        assert!(resp.is(&codes::ADVANCE.add_success));

        let head = FinancialMain::find().one(&db).await.unwrap().unwrap();
        assert_eq!(head.receipt_type, RECEIPT_TYPE_ADVANCE);
        assert_eq!(head.status, Some(STATUS_UNAUDITED));
        assert_eq!(head.total_amount, Some(100.0));
        assert_eq!(head.related_person_id, Some(77));

        let rows = FinancialSub::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].financial_main_id, head.id);

        let balance = member::find_active_by_id(&db, 77).await.unwrap().unwrap();
        assert_eq!(balance.advance_payment, 150.0);
    }

    #[tokio::test]
    async fn unknown_member_rolls_the_whole_receipt_back() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_advance_charge(&db, &ctx, &ids, Some(request(999, 100.0))).await;
        assert!(resp.is(&codes::ADVANCE.add_error));

        assert_eq!(FinancialMain::find().all(&db).await.unwrap().len(), 0);
        assert_eq!(FinancialSub::find().all(&db).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn update_replaces_the_account_rows() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_member(&db, 77, "张三", 0.0).await;

        let mut create = request(77, 100.0);
        create.table_data.push(AdvanceChargeRowRequest {
            account_id: Some(302),
            amount: Some(40.0),
            remark: None,
        });
        add_or_update_advance_charge(&db, &ctx, &ids, Some(create)).await;
        let head = FinancialMain::find().one(&db).await.unwrap().unwrap();
        assert_eq!(FinancialSub::find().all(&db).await.unwrap().len(), 2);

        let mut update = request(77, 60.0);
        update.id = Some(head.id);
        update.receipt_number = Some("QGD00002".into());
        let resp = add_or_update_advance_charge(&db, &ctx, &ids, Some(update)).await;
        assert!(resp.is(&codes::ADVANCE.update_success));

        let rows = FinancialSub::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        let head = FinancialMain::find().one(&db).await.unwrap().unwrap();
        assert_eq!(head.receipt_number.as_deref(), Some("QGD00002"));
        assert_eq!(head.total_amount, Some(60.0));
        // Creation audit survives the update.
        assert_eq!(head.create_by, Some(TEST_USER));
        assert!(head.create_time.is_some());
    }

    #[tokio::test]
    async fn page_list_filters_and_enriches_names() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_member(&db, 77, "张三", 0.0).await;
        seed_user(&db, TEST_USER, "王经办").await;
        seed_user(&db, 2002, "李财务").await;

        add_or_update_advance_charge(&db, &ctx, &ids, Some(request(77, 100.0))).await;

        let page = advance_charge_page_list(&db, &ctx, None).await.data.unwrap();
        assert_eq!(page.total, 1);
        let vo = &page.records[0];
        assert_eq!(vo.member_name.as_deref(), Some("张三"));
        assert_eq!(vo.operator_name.as_deref(), Some("王经办"));
        assert_eq!(vo.financial_personnel_name.as_deref(), Some("李财务"));

        let resp = advance_charge_page_list(
            &db,
            &ctx,
            Some(AdvanceChargeQuery {
                receipt_number: Some("QGD99999".into()),
                ..Default::default()
            }),
        )
        .await;
        assert!(resp.is(&codes::QUERY_DATA_EMPTY));
    }

    #[tokio::test]
    async fn detail_resolves_account_names() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_member(&db, 77, "张三", 0.0).await;
        seed_account(&db, 301, "现金").await;

        add_or_update_advance_charge(&db, &ctx, &ids, Some(request(77, 100.0))).await;
        let head = FinancialMain::find().one(&db).await.unwrap().unwrap();

        let detail = advance_charge_detail(&db, &ctx, Some(head.id)).await.data.unwrap();
        assert_eq!(detail.member_name.as_deref(), Some("张三"));
        assert_eq!(detail.table_data.len(), 1);
        assert_eq!(detail.table_data[0].account_name.as_deref(), Some("现金"));

        let resp = advance_charge_detail(&db, &ctx, Some(424242)).await;
        assert!(resp.is(&codes::QUERY_DATA_EMPTY));
        let resp = advance_charge_detail(&db, &ctx, None).await;
        assert!(resp.is(&codes::PARAMETER_NULL));
    }

    #[tokio::test]
    async fn delete_and_status_flow() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_member(&db, 77, "张三", 0.0).await;

        add_or_update_advance_charge(&db, &ctx, &ids, Some(request(77, 100.0))).await;
        let head = FinancialMain::find().one(&db).await.unwrap().unwrap();

        let resp = update_advance_charges_status(
            &db,
            &ctx,
            Some(AdvanceChargeStatusRequest {
                ids: Some(vec![head.id]),
                status: Some(1),
            }),
        )
        .await;
        assert!(resp.is(&codes::UPDATE_ADVANCE_STATUS_SUCCESS));

        let resp = delete_advance_charges(&db, &ctx, Some(vec![head.id])).await;
        assert!(resp.is(&codes::ADVANCE.delete_success));

        // Head and rows are flagged, not removed.
        let head = FinancialMain::find().one(&db).await.unwrap().unwrap();
        assert_eq!(head.delete_flag, models::DELETED);
        let rows = FinancialSub::find().all(&db).await.unwrap();
        assert!(rows.iter().all(|r| r.delete_flag == models::DELETED));

        let resp = advance_charge_page_list(&db, &ctx, None).await;
        assert!(resp.is(&codes::QUERY_DATA_EMPTY));
    }
}
