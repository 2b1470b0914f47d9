//! Product unit service.
//!
//! The business key is the derived `compute_unit` string built from the basic
//! unit and every ratio'd secondary unit, e.g. "个/(箱=12个)(件=0.5个)".
//! Updates rewrite the whole row (the legacy form), unlike the partial
//! updates of the other master-data entities.

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::pagination::{PageResult, Pagination};
use common::response::Response;
use models::product_unit::{self, Entity as ProductUnit};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{self, non_blank, CrudEntity, CrudMessages, DateTime};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitRequest {
    pub id: Option<i64>,
    pub basic_unit: Option<String>,
    pub other_unit: Option<String>,
    pub other_unit_two: Option<String>,
    pub other_unit_three: Option<String>,
    pub ratio: Option<f64>,
    pub ratio_two: Option<f64>,
    pub ratio_three: Option<f64>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitQuery {
    /// Substring match on the derived compute_unit string.
    pub compute_unit: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitStatusRequest {
    pub id: Option<i64>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitVo {
    pub id: i64,
    pub compute_unit: String,
    pub basic_unit: String,
    pub other_unit: Option<String>,
    pub other_unit_two: Option<String>,
    pub other_unit_three: Option<String>,
    /// Display strings like "箱=12个", one per defined secondary unit.
    pub other_compute_unit: Option<String>,
    pub other_compute_unit_two: Option<String>,
    pub other_compute_unit_three: Option<String>,
    pub ratio: Option<f64>,
    pub ratio_two: Option<f64>,
    pub ratio_three: Option<f64>,
    pub status: Option<i32>,
    pub create_time: Option<DateTime>,
}

/// Renders a ratio with at most three decimals, trailing zeros trimmed, so
/// "12.000" reads "12" and "0.500" reads "0.5".
pub fn format_ratio(ratio: f64) -> String {
    let mut text = format!("{:.3}", ratio);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Builds the derived business key from the trimmed request fields.
pub fn build_compute_unit(request: &UnitRequest) -> String {
    let basic = non_blank(&request.basic_unit).unwrap_or_default();
    let mut key = basic.clone();
    key.push('/');
    for (unit, ratio) in [
        (&request.other_unit, request.ratio),
        (&request.other_unit_two, request.ratio_two),
        (&request.other_unit_three, request.ratio_three),
    ] {
        if let (Some(unit), Some(ratio)) = (non_blank(unit), ratio) {
            key.push_str(&format!("({unit}={}{basic})", format_ratio(ratio)));
        }
    }
    key
}

fn other_compute(basic: &str, unit: &Option<String>, ratio: Option<f64>) -> Option<String> {
    match (non_blank(unit), ratio) {
        (Some(unit), Some(ratio)) => Some(format!("{unit}={}{basic}", format_ratio(ratio))),
        _ => None,
    }
}

pub struct UnitOps;

impl CrudEntity for UnitOps {
    type Entity = ProductUnit;
    type Model = product_unit::Model;
    type ActiveModel = product_unit::ActiveModel;
    type Request = UnitRequest;

    fn messages() -> &'static CrudMessages {
        &codes::UNIT
    }

    fn request_id(request: &UnitRequest) -> Option<i64> {
        request.id
    }

    fn business_key(request: &UnitRequest) -> Option<String> {
        non_blank(&request.basic_unit).map(|_| build_compute_unit(request))
    }

    fn key_column() -> Option<product_unit::Column> {
        Some(product_unit::Column::ComputeUnit)
    }

    fn id_column() -> product_unit::Column {
        product_unit::Column::Id
    }

    fn delete_flag_column() -> product_unit::Column {
        product_unit::Column::DeleteFlag
    }

    fn tenant_condition(tenant_id: i64) -> Condition {
        Condition::all().add(product_unit::Column::TenantId.eq(tenant_id))
    }

    fn empty_model() -> product_unit::Model {
        product_unit::Model {
            id: 0,
            tenant_id: 0,
            compute_unit: String::new(),
            basic_unit: String::new(),
            other_unit: None,
            other_unit_two: None,
            other_unit_three: None,
            ratio: None,
            ratio_two: None,
            ratio_three: None,
            status: None,
            create_time: None,
            create_by: None,
            update_time: None,
            update_by: None,
            delete_flag: models::NOT_DELETED,
        }
    }

    fn insert_model(
        request: &UnitRequest,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> product_unit::ActiveModel {
        product_unit::ActiveModel {
            id: Set(id),
            tenant_id: Set(ctx.current_tenant_id()),
            compute_unit: Set(build_compute_unit(request)),
            basic_unit: Set(non_blank(&request.basic_unit).unwrap_or_default()),
            other_unit: Set(request.other_unit.clone()),
            other_unit_two: Set(request.other_unit_two.clone()),
            other_unit_three: Set(request.other_unit_three.clone()),
            ratio: Set(request.ratio),
            ratio_two: Set(request.ratio_two),
            ratio_three: Set(request.ratio_three),
            status: Set(request.status),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
    }

    // Whole-row rewrite: the unit form always submits every field.
    fn update_model(
        current: product_unit::Model,
        request: &UnitRequest,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> product_unit::ActiveModel {
        let mut active = current.into_active_model();
        active.compute_unit = Set(build_compute_unit(request));
        active.basic_unit = Set(non_blank(&request.basic_unit).unwrap_or_default());
        active.other_unit = Set(request.other_unit.clone());
        active.other_unit_two = Set(request.other_unit_two.clone());
        active.other_unit_three = Set(request.other_unit_three.clone());
        active.ratio = Set(request.ratio);
        active.ratio_two = Set(request.ratio_two);
        active.ratio_three = Set(request.ratio_three);
        active.status = Set(request.status);
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        active
    }
}

pub async fn add_or_update_unit(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<UnitRequest>,
) -> Response<String> {
    crud::add_or_update::<UnitOps>(db, ctx, ids, request).await
}

pub async fn delete_units(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: Option<Vec<i64>>,
) -> Response<String> {
    crud::delete_by_ids::<UnitOps>(db, ctx, ids).await
}

pub async fn unit_by_id(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> product_unit::Model {
    crud::get_by_id::<UnitOps>(db, ctx, id).await
}

/// Paged list, newest first. An empty page resolves to the QueryDataEmpty
/// message instead of an empty payload.
pub async fn unit_page_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    query: Option<UnitQuery>,
) -> Response<PageResult<UnitVo>> {
    let locale = ctx.system_language();
    let query = query.unwrap_or_default();
    let (page, page_size) = Pagination::new(query.page, query.page_size).normalize();

    let mut select = ProductUnit::find()
        .filter(product_unit::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(product_unit::Column::DeleteFlag.eq(models::NOT_DELETED))
        .order_by_desc(product_unit::Column::CreateTime);
    if let Some(compute_unit) = non_blank(&query.compute_unit) {
        select = select.filter(product_unit::Column::ComputeUnit.contains(&compute_unit));
    }

    let paginator = select.paginate(db, page_size);
    let (total, pages) = match paginator.num_items_and_pages().await {
        Ok(n) => (n.number_of_items, n.number_of_pages),
        Err(err) => {
            warn!(error = %err, "product unit count failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    let rows = match paginator.fetch_page(page).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "product unit page fetch failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    if rows.is_empty() {
        return Response::message(&codes::QUERY_DATA_EMPTY, locale);
    }

    let records = rows
        .into_iter()
        .map(|u| UnitVo {
            id: u.id,
            other_compute_unit: other_compute(&u.basic_unit, &u.other_unit, u.ratio),
            other_compute_unit_two: other_compute(&u.basic_unit, &u.other_unit_two, u.ratio_two),
            other_compute_unit_three: other_compute(
                &u.basic_unit,
                &u.other_unit_three,
                u.ratio_three,
            ),
            compute_unit: u.compute_unit,
            basic_unit: u.basic_unit,
            other_unit: u.other_unit,
            other_unit_two: u.other_unit_two,
            other_unit_three: u.other_unit_three,
            ratio: u.ratio,
            ratio_two: u.ratio_two,
            ratio_three: u.ratio_three,
            status: u.status,
            create_time: u.create_time,
        })
        .collect();
    Response::page(PageResult {
        records,
        total,
        pages,
        size: page_size,
    })
}

/// Flips the enabled/disabled status of one unit.
pub async fn update_unit_status(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    request: Option<UnitStatusRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let (Some(id), Some(status)) = (request.id, request.status) else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };

    let result = ProductUnit::update_many()
        .col_expr(product_unit::Column::Status, Expr::value(status))
        .filter(product_unit::Column::Id.eq(id))
        .exec(db)
        .await;
    match result {
        Ok(res) if res.rows_affected > 0 => {
            Response::message(&codes::UPDATE_UNIT_STATUS_SUCCESS, locale)
        }
        Ok(_) => Response::message(&codes::UPDATE_UNIT_STATUS_ERROR, locale),
        Err(err) => {
            warn!(error = %err, "product unit status update failed");
            Response::message(&codes::UPDATE_UNIT_STATUS_ERROR, locale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, zh_context};
    use common::snowflake::Snowflake;

    fn request(basic: &str, other: &str, ratio: f64) -> UnitRequest {
        UnitRequest {
            basic_unit: Some(basic.to_string()),
            other_unit: Some(other.to_string()),
            ratio: Some(ratio),
            status: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn ratio_formatting_trims_trailing_zeros() {
        assert_eq!(format_ratio(12.0), "12");
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(2.125), "2.125");
        assert_eq!(format_ratio(3.1000), "3.1");
    }

    #[test]
    fn compute_unit_includes_every_defined_pair() {
        let req = UnitRequest {
            other_unit_two: Some("件".into()),
            ratio_two: Some(0.5),
            ..request("个", "箱", 12.0)
        };
        assert_eq!(build_compute_unit(&req), "个/(箱=12个)(件=0.5个)");
    }

    #[tokio::test]
    async fn derived_key_conflict_is_rejected() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_unit(&db, &ctx, &ids, Some(request("个", "箱", 12.0))).await;
        assert!(resp.is(&codes::UNIT.add_success));

        // Same derived string, different request instance.
        let resp = add_or_update_unit(&db, &ctx, &ids, Some(request("个", "箱", 12.0))).await;
        assert!(resp.is(&codes::UNIT.key_exists));

        // A different ratio produces a different key.
        let resp = add_or_update_unit(&db, &ctx, &ids, Some(request("个", "箱", 24.0))).await;
        assert!(resp.is(&codes::UNIT.add_success));
    }

    #[tokio::test]
    async fn update_rewrites_the_whole_row() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let full = UnitRequest {
            other_unit_two: Some("件".into()),
            ratio_two: Some(6.0),
            ..request("个", "箱", 12.0)
        };
        add_or_update_unit(&db, &ctx, &ids, Some(full)).await;
        let page = unit_page_list(&db, &ctx, None).await.data.unwrap();
        let id = page.records[0].id;

        // Resubmit without the second unit: the omitted fields are cleared.
        let resp = add_or_update_unit(
            &db,
            &ctx,
            &ids,
            Some(UnitRequest {
                id: Some(id),
                ..request("个", "盒", 10.0)
            }),
        )
        .await;
        assert!(resp.is(&codes::UNIT.update_success));

        let updated = unit_by_id(&db, &ctx, Some(id)).await;
        assert_eq!(updated.compute_unit, "个/(盒=10个)");
        assert_eq!(updated.other_unit_two, None);
        assert_eq!(updated.ratio_two, None);
    }

    #[tokio::test]
    async fn empty_page_reports_query_data_empty() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();

        let resp = unit_page_list(&db, &ctx, None).await;
        assert!(resp.is(&codes::QUERY_DATA_EMPTY));
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn list_formats_secondary_units() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_unit(&db, &ctx, &ids, Some(request("个", "箱", 12.0))).await;
        let page = unit_page_list(&db, &ctx, None).await.data.unwrap();
        assert_eq!(page.records[0].other_compute_unit.as_deref(), Some("箱=12个"));
        assert_eq!(page.records[0].other_compute_unit_two, None);
    }

    #[tokio::test]
    async fn status_update_requires_id_and_status() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_unit(&db, &ctx, &ids, Some(request("个", "箱", 12.0))).await;
        let page = unit_page_list(&db, &ctx, None).await.data.unwrap();
        let id = page.records[0].id;

        let resp = update_unit_status(
            &db,
            &ctx,
            Some(UnitStatusRequest {
                id: Some(id),
                status: Some(1),
            }),
        )
        .await;
        assert!(resp.is(&codes::UPDATE_UNIT_STATUS_SUCCESS));
        assert_eq!(unit_by_id(&db, &ctx, Some(id)).await.status, Some(1));

        let resp = update_unit_status(&db, &ctx, Some(UnitStatusRequest::default())).await;
        assert!(resp.is(&codes::PARAMETER_NULL));

        let resp = update_unit_status(
            &db,
            &ctx,
            Some(UnitStatusRequest {
                id: Some(9999),
                status: Some(1),
            }),
        )
        .await;
        assert!(resp.is(&codes::UPDATE_UNIT_STATUS_ERROR));
    }
}
