//! Product attribute service. The only entity with a physical delete: the
//! legacy system removes attribute rows outright instead of flagging them.

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::pagination::{PageResult, Pagination};
use common::response::Response;
use models::product_attribute::{self, Entity as ProductAttribute};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{self, non_blank, CrudEntity, CrudMessages, DateTime, DeletePolicy};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeRequest {
    pub id: Option<i64>,
    pub attribute_name: Option<String>,
    /// Pipe-joined selectable values, e.g. "红|绿|蓝".
    pub attribute_value: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeQuery {
    pub attribute_name: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeVo {
    pub id: i64,
    pub attribute_name: String,
    pub attribute_value: Option<String>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
}

/// One selectable value of an attribute, paired with the attribute name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeValueVo {
    pub name: String,
    pub value: String,
}

pub struct AttributeOps;

impl CrudEntity for AttributeOps {
    type Entity = ProductAttribute;
    type Model = product_attribute::Model;
    type ActiveModel = product_attribute::ActiveModel;
    type Request = AttributeRequest;

    const DELETE_POLICY: DeletePolicy = DeletePolicy::Physical;

    fn messages() -> &'static CrudMessages {
        &codes::ATTRIBUTE
    }

    fn request_id(request: &AttributeRequest) -> Option<i64> {
        request.id
    }

    fn business_key(request: &AttributeRequest) -> Option<String> {
        non_blank(&request.attribute_name)
    }

    fn key_column() -> Option<product_attribute::Column> {
        Some(product_attribute::Column::AttributeName)
    }

    fn id_column() -> product_attribute::Column {
        product_attribute::Column::Id
    }

    fn delete_flag_column() -> product_attribute::Column {
        product_attribute::Column::DeleteFlag
    }

    fn tenant_condition(tenant_id: i64) -> Condition {
        Condition::all().add(product_attribute::Column::TenantId.eq(tenant_id))
    }

    fn empty_model() -> product_attribute::Model {
        product_attribute::Model {
            id: 0,
            tenant_id: 0,
            attribute_name: String::new(),
            attribute_value: None,
            remark: None,
            create_time: None,
            create_by: None,
            update_time: None,
            update_by: None,
            delete_flag: models::NOT_DELETED,
        }
    }

    fn insert_model(
        request: &AttributeRequest,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> product_attribute::ActiveModel {
        product_attribute::ActiveModel {
            id: Set(id),
            tenant_id: Set(ctx.current_tenant_id()),
            // Store the trimmed name so it equals the prechecked key.
            attribute_name: Set(non_blank(&request.attribute_name).unwrap_or_default()),
            attribute_value: Set(request.attribute_value.clone()),
            remark: Set(request.remark.clone()),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
    }

    fn update_model(
        current: product_attribute::Model,
        request: &AttributeRequest,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> product_attribute::ActiveModel {
        let mut active = current.into_active_model();
        if let Some(name) = non_blank(&request.attribute_name) {
            active.attribute_name = Set(name);
        }
        if let Some(value) = non_blank(&request.attribute_value) {
            active.attribute_value = Set(Some(value));
        }
        if let Some(remark) = non_blank(&request.remark) {
            active.remark = Set(Some(remark));
        }
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        active
    }
}

pub async fn add_or_update_attribute(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<AttributeRequest>,
) -> Response<String> {
    crud::add_or_update::<AttributeOps>(db, ctx, ids, request).await
}

pub async fn delete_attributes(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: Option<Vec<i64>>,
) -> Response<String> {
    crud::delete_by_ids::<AttributeOps>(db, ctx, ids).await
}

/// Paged list of active attributes, optionally narrowed by a substring of the
/// attribute name, newest first.
pub async fn attribute_page_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    query: Option<AttributeQuery>,
) -> Response<PageResult<AttributeVo>> {
    let locale = ctx.system_language();
    let query = query.unwrap_or_default();
    let (page, page_size) = Pagination::new(query.page, query.page_size).normalize();

    let mut select = ProductAttribute::find()
        .filter(product_attribute::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(product_attribute::Column::DeleteFlag.eq(models::NOT_DELETED))
        .order_by_desc(product_attribute::Column::CreateTime);
    if let Some(name) = non_blank(&query.attribute_name) {
        select = select.filter(product_attribute::Column::AttributeName.contains(&name));
    }

    let paginator = select.paginate(db, page_size);
    let (total, pages) = match paginator.num_items_and_pages().await {
        Ok(n) => (n.number_of_items, n.number_of_pages),
        Err(err) => {
            warn!(error = %err, "product attribute count failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    let rows = match paginator.fetch_page(page).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "product attribute page fetch failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };

    let records = rows
        .into_iter()
        .map(|a| AttributeVo {
            id: a.id,
            attribute_name: a.attribute_name,
            attribute_value: a.attribute_value,
            remark: a.remark,
            create_time: a.create_time,
        })
        .collect();
    Response::page(PageResult {
        records,
        total,
        pages,
        size: page_size,
    })
}

/// Splits the stored value string of one attribute into `(name, value)` pairs.
/// Unknown or deleted ids yield an empty list.
pub async fn attribute_values_by_id(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> Vec<AttributeValueVo> {
    let attribute = crud::get_by_id::<AttributeOps>(db, ctx, id).await;
    if attribute.id == 0 {
        return Vec::new();
    }
    let Some(raw) = attribute.attribute_value else {
        return Vec::new();
    };
    raw.split('|')
        .filter(|v| !v.trim().is_empty())
        .map(|v| AttributeValueVo {
            name: attribute.attribute_name.clone(),
            value: v.trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, zh_context};
    use common::snowflake::Snowflake;

    fn request(name: &str, value: &str) -> AttributeRequest {
        AttributeRequest {
            attribute_name: Some(name.to_string()),
            attribute_value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn paged_list_uses_defaults_and_name_filter() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        for i in 0..12 {
            let resp = add_or_update_attribute(
                &db,
                &ctx,
                &ids,
                Some(request(&format!("颜色{i}"), "红|绿")),
            )
            .await;
            assert!(resp.is(&codes::ATTRIBUTE.add_success));
        }

        let page = attribute_page_list(&db, &ctx, None).await.data.unwrap();
        assert_eq!(page.size, 10);
        assert_eq!(page.total, 12);
        assert_eq!(page.pages, 2);
        assert_eq!(page.records.len(), 10);

        let filtered = attribute_page_list(
            &db,
            &ctx,
            Some(AttributeQuery {
                attribute_name: Some("颜色1".into()),
                ..Default::default()
            }),
        )
        .await
        .data
        .unwrap();
        // matches 颜色1, 颜色10, 颜色11
        assert_eq!(filtered.total, 3);
    }

    #[tokio::test]
    async fn delete_is_physical() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_attribute(&db, &ctx, &ids, Some(request("尺寸", "S|M|L"))).await;
        let page = attribute_page_list(&db, &ctx, None).await.data.unwrap();
        let id = page.records[0].id;

        let resp = delete_attributes(&db, &ctx, Some(vec![id])).await;
        assert!(resp.is(&codes::ATTRIBUTE.delete_success));

        // The row is gone, not flagged.
        let raw = ProductAttribute::find_by_id(id).one(&db).await.unwrap();
        assert!(raw.is_none());

        // A second delete of the same ids has nothing to remove.
        let resp = delete_attributes(&db, &ctx, Some(vec![id])).await;
        assert!(resp.is(&codes::ATTRIBUTE.delete_error));
    }

    #[tokio::test]
    async fn values_split_on_pipe() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_attribute(&db, &ctx, &ids, Some(request("颜色", "红|绿|蓝"))).await;
        let page = attribute_page_list(&db, &ctx, None).await.data.unwrap();
        let id = page.records[0].id;

        let values = attribute_values_by_id(&db, &ctx, Some(id)).await;
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.name == "颜色"));
        assert_eq!(values[0].value, "红");

        assert!(attribute_values_by_id(&db, &ctx, None).await.is_empty());
        assert!(attribute_values_by_id(&db, &ctx, Some(777)).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_but_own_id_is_excluded() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_attribute(&db, &ctx, &ids, Some(request("材质", "棉"))).await;
        let resp = add_or_update_attribute(&db, &ctx, &ids, Some(request("材质", "麻"))).await;
        assert!(resp.is(&codes::ATTRIBUTE.key_exists));

        // Updating the row under its own name must not conflict with itself.
        let page = attribute_page_list(&db, &ctx, None).await.data.unwrap();
        let id = page.records[0].id;
        let resp = add_or_update_attribute(
            &db,
            &ctx,
            &ids,
            Some(AttributeRequest {
                id: Some(id),
                ..request("材质", "棉|麻")
            }),
        )
        .await;
        assert!(resp.is(&codes::ATTRIBUTE.update_success));
    }
}
