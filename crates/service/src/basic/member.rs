//! Member service.
//!
//! Members carry a prepaid balance that the advance-charge receipts top up,
//! so the receipt services read them through [`member_by_id`]. Unlike the
//! product master data there is no uniqueness rule on the member number:
//! duplicate numbers are accepted.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::pagination::{PageResult, Pagination};
use common::response::Response;
use models::member::{self, Entity as Member};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{self, non_blank, parse_date, CrudEntity, CrudMessages, DateTime};

/// Enabled members carry status 0.
const STATUS_NORMAL: i32 = 0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberRequest {
    pub id: Option<i64>,
    pub member_number: Option<String>,
    pub member_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub advance_payment: Option<f64>,
    pub status: Option<i32>,
    pub remark: Option<String>,
    pub sort: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberQuery {
    pub member_number: Option<String>,
    pub phone_number: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Exact-match filters of the unpaged dropdown list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberListQuery {
    pub member_number: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberStatusRequest {
    pub ids: Option<Vec<i64>>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberVo {
    pub id: i64,
    pub member_number: Option<String>,
    pub member_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub advance_payment: f64,
    pub status: Option<i32>,
    pub remark: Option<String>,
    pub sort: Option<i32>,
    pub create_time: Option<DateTime>,
}

impl From<member::Model> for MemberVo {
    fn from(m: member::Model) -> Self {
        MemberVo {
            id: m.id,
            member_number: m.member_number,
            member_name: m.member_name,
            phone_number: m.phone_number,
            email: m.email,
            advance_payment: m.advance_payment,
            status: m.status,
            remark: m.remark,
            sort: m.sort,
            create_time: m.create_time,
        }
    }
}

pub struct MemberOps;

impl CrudEntity for MemberOps {
    type Entity = Member;
    type Model = member::Model;
    type ActiveModel = member::ActiveModel;
    type Request = MemberRequest;

    fn messages() -> &'static CrudMessages {
        &codes::MEMBER
    }

    fn request_id(request: &MemberRequest) -> Option<i64> {
        request.id
    }

    fn id_column() -> member::Column {
        member::Column::Id
    }

    fn delete_flag_column() -> member::Column {
        member::Column::DeleteFlag
    }

    fn tenant_condition(tenant_id: i64) -> Condition {
        Condition::all().add(member::Column::TenantId.eq(tenant_id))
    }

    fn empty_model() -> member::Model {
        member::Model {
            id: 0,
            tenant_id: 0,
            member_number: None,
            member_name: None,
            phone_number: None,
            email: None,
            advance_payment: 0.0,
            status: None,
            remark: None,
            sort: None,
            create_time: None,
            create_by: None,
            update_time: None,
            update_by: None,
            delete_flag: models::NOT_DELETED,
        }
    }

    fn insert_model(
        request: &MemberRequest,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> member::ActiveModel {
        member::ActiveModel {
            id: Set(id),
            tenant_id: Set(ctx.current_tenant_id()),
            member_number: Set(non_blank(&request.member_number)),
            member_name: Set(non_blank(&request.member_name)),
            phone_number: Set(request.phone_number.clone()),
            email: Set(request.email.clone()),
            advance_payment: Set(request.advance_payment.unwrap_or(0.0)),
            status: Set(Some(request.status.unwrap_or(STATUS_NORMAL))),
            remark: Set(request.remark.clone()),
            sort: Set(Some(request.sort.unwrap_or(0))),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
    }

    // Whole-row rewrite: the member form always submits every field, an
    // omitted advance_payment resets the balance to zero.
    fn update_model(
        current: member::Model,
        request: &MemberRequest,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> member::ActiveModel {
        let mut active = current.into_active_model();
        active.member_number = Set(non_blank(&request.member_number));
        active.member_name = Set(non_blank(&request.member_name));
        active.phone_number = Set(request.phone_number.clone());
        active.email = Set(request.email.clone());
        active.advance_payment = Set(request.advance_payment.unwrap_or(0.0));
        active.status = Set(Some(request.status.unwrap_or(STATUS_NORMAL)));
        active.remark = Set(request.remark.clone());
        active.sort = Set(Some(request.sort.unwrap_or(0)));
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        active
    }
}

pub async fn add_or_update_member(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<MemberRequest>,
) -> Response<String> {
    crud::add_or_update::<MemberOps>(db, ctx, ids, request).await
}

pub async fn delete_members(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: Option<Vec<i64>>,
) -> Response<String> {
    crud::delete_by_ids::<MemberOps>(db, ctx, ids).await
}

/// Fetches one live member of the tenant. Callers probe with ids taken
/// straight from receipt rows, so a missing or unknown id yields an empty
/// placeholder rather than an error.
pub async fn member_by_id(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> member::Model {
    crud::get_by_id::<MemberOps>(db, ctx, id).await
}

/// Paged list, newest first, with substring filters on the member number and
/// phone and an optional creation date range.
pub async fn member_page_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    query: Option<MemberQuery>,
) -> Response<PageResult<MemberVo>> {
    let locale = ctx.system_language();
    let query = query.unwrap_or_default();
    let (page, page_size) = Pagination::new(query.page, query.page_size).normalize();

    let mut select = Member::find()
        .filter(member::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(member::Column::DeleteFlag.eq(models::NOT_DELETED))
        .order_by_desc(member::Column::CreateTime);
    if let Some(number) = non_blank(&query.member_number) {
        select = select.filter(member::Column::MemberNumber.contains(&number));
    }
    if let Some(phone) = non_blank(&query.phone_number) {
        select = select.filter(member::Column::PhoneNumber.contains(&phone));
    }
    if let Some(start) = query.start_date.as_deref().and_then(parse_date) {
        select = select.filter(member::Column::CreateTime.gte(start));
    }
    if let Some(end) = query.end_date.as_deref().and_then(parse_date) {
        select = select.filter(member::Column::CreateTime.lte(end));
    }

    let paginator = select.paginate(db, page_size);
    let (total, pages) = match paginator.num_items_and_pages().await {
        Ok(n) => (n.number_of_items, n.number_of_pages),
        Err(err) => {
            warn!(error = %err, "member count failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    let rows = match paginator.fetch_page(page).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "member page fetch failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    if rows.is_empty() {
        return Response::message(&codes::QUERY_DATA_EMPTY, locale);
    }

    Response::page(PageResult {
        records: rows.into_iter().map(MemberVo::from).collect(),
        total,
        pages,
        size: page_size,
    })
}

/// Unpaged list of enabled members, ordered by their sort weight. Feeds the
/// member dropdown on the receipt forms.
pub async fn member_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    query: Option<MemberListQuery>,
) -> Response<Vec<MemberVo>> {
    let query = query.unwrap_or_default();

    let mut select = Member::find()
        .filter(member::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(member::Column::DeleteFlag.eq(models::NOT_DELETED))
        .filter(member::Column::Status.eq(STATUS_NORMAL))
        .order_by_asc(member::Column::Sort);
    if let Some(number) = non_blank(&query.member_number) {
        select = select.filter(member::Column::MemberNumber.eq(number));
    }
    if let Some(phone) = non_blank(&query.phone_number) {
        select = select.filter(member::Column::PhoneNumber.eq(phone));
    }

    match select.all(db).await {
        Ok(rows) => Response::data(rows.into_iter().map(MemberVo::from).collect()),
        Err(err) => {
            warn!(error = %err, "member list failed");
            Response::data(Vec::new())
        }
    }
}

/// Enables or disables members in bulk.
pub async fn update_member_status(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    request: Option<MemberStatusRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let (Some(ids), Some(status)) = (request.ids, request.status) else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    if ids.is_empty() {
        return Response::message(&codes::PARAMETER_NULL, locale);
    }

    let result = Member::update_many()
        .col_expr(member::Column::Status, Expr::value(status))
        .filter(member::Column::Id.is_in(ids))
        .filter(member::Column::TenantId.eq(ctx.current_tenant_id()))
        .exec(db)
        .await;
    match result {
        Ok(res) if res.rows_affected > 0 => {
            Response::message(&codes::UPDATE_MEMBER_STATUS_SUCCESS, locale)
        }
        Ok(_) => Response::message(&codes::UPDATE_MEMBER_STATUS_ERROR, locale),
        Err(err) => {
            warn!(error = %err, "member status update failed");
            Response::message(&codes::UPDATE_MEMBER_STATUS_ERROR, locale)
        }
    }
}
