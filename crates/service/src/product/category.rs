//! Product category service: tree-shaped master data with parent-name
//! enrichment on the unpaged list.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::response::Response;
use models::product_category::{self, Entity as ProductCategory};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{self, non_blank, CrudEntity, CrudMessages, DateTime};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRequest {
    pub id: Option<i64>,
    pub category_name: Option<String>,
    pub category_number: Option<String>,
    pub parent_id: Option<i64>,
    pub sort: Option<i32>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryVo {
    pub id: i64,
    pub category_name: String,
    pub category_number: Option<String>,
    pub parent_id: Option<i64>,
    pub parent_name: Option<String>,
    pub sort: Option<i32>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
}

pub struct CategoryOps;

impl CrudEntity for CategoryOps {
    type Entity = ProductCategory;
    type Model = product_category::Model;
    type ActiveModel = product_category::ActiveModel;
    type Request = CategoryRequest;

    fn messages() -> &'static CrudMessages {
        &codes::CATEGORY
    }

    fn request_id(request: &CategoryRequest) -> Option<i64> {
        request.id
    }

    fn business_key(request: &CategoryRequest) -> Option<String> {
        non_blank(&request.category_name)
    }

    fn key_column() -> Option<product_category::Column> {
        Some(product_category::Column::CategoryName)
    }

    fn id_column() -> product_category::Column {
        product_category::Column::Id
    }

    fn delete_flag_column() -> product_category::Column {
        product_category::Column::DeleteFlag
    }

    fn tenant_condition(tenant_id: i64) -> Condition {
        Condition::all().add(product_category::Column::TenantId.eq(tenant_id))
    }

    fn empty_model() -> product_category::Model {
        product_category::Model {
            id: 0,
            tenant_id: 0,
            category_name: String::new(),
            category_number: None,
            parent_id: None,
            sort: None,
            remark: None,
            create_time: None,
            create_by: None,
            update_time: None,
            update_by: None,
            delete_flag: models::NOT_DELETED,
        }
    }

    fn insert_model(
        request: &CategoryRequest,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> product_category::ActiveModel {
        product_category::ActiveModel {
            id: Set(id),
            tenant_id: Set(ctx.current_tenant_id()),
            // Store the trimmed name so it equals the prechecked key.
            category_name: Set(non_blank(&request.category_name).unwrap_or_default()),
            category_number: Set(request.category_number.clone()),
            parent_id: Set(request.parent_id),
            sort: Set(request.sort),
            remark: Set(request.remark.clone()),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
    }

    fn update_model(
        current: product_category::Model,
        request: &CategoryRequest,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> product_category::ActiveModel {
        let mut active = current.into_active_model();
        if let Some(name) = non_blank(&request.category_name) {
            active.category_name = Set(name);
        }
        if let Some(number) = non_blank(&request.category_number) {
            active.category_number = Set(Some(number));
        }
        if let Some(parent_id) = request.parent_id {
            active.parent_id = Set(Some(parent_id));
        }
        if let Some(sort) = request.sort {
            active.sort = Set(Some(sort));
        }
        if let Some(remark) = non_blank(&request.remark) {
            active.remark = Set(Some(remark));
        }
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        active
    }
}

pub async fn add_or_update_category(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<CategoryRequest>,
) -> Response<String> {
    crud::add_or_update::<CategoryOps>(db, ctx, ids, request).await
}

pub async fn delete_categories(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: Option<Vec<i64>>,
) -> Response<String> {
    crud::delete_by_ids::<CategoryOps>(db, ctx, ids).await
}

pub async fn category_by_name(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    name: &str,
) -> product_category::Model {
    crud::get_by_name::<CategoryOps>(db, ctx, name).await
}

/// Unpaged list of the tenant's active categories, newest first, with the
/// parent names resolved through one bulk lookup.
pub async fn category_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
) -> Response<Vec<CategoryVo>> {
    let categories = match ProductCategory::find()
        .filter(product_category::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(product_category::Column::DeleteFlag.eq(models::NOT_DELETED))
        .order_by_desc(product_category::Column::CreateTime)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "product category list query failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, ctx.system_language());
        }
    };

    let parent_ids: Vec<i64> = categories
        .iter()
        .filter_map(|c| c.parent_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let mut parent_names: HashMap<i64, String> = HashMap::new();
    if !parent_ids.is_empty() {
        match ProductCategory::find()
            .filter(product_category::Column::Id.is_in(parent_ids))
            .all(db)
            .await
        {
            Ok(parents) => {
                for parent in parents {
                    parent_names.insert(parent.id, parent.category_name);
                }
            }
            Err(err) => warn!(error = %err, "parent category lookup failed"),
        }
    }

    let records = categories
        .into_iter()
        .map(|c| CategoryVo {
            id: c.id,
            parent_name: c.parent_id.and_then(|id| parent_names.get(&id).cloned()),
            category_name: c.category_name,
            category_number: c.category_number,
            parent_id: c.parent_id,
            sort: c.sort,
            remark: c.remark,
            create_time: c.create_time,
        })
        .collect();
    Response::data(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{en_context, get_db, zh_context};
    use common::snowflake::Snowflake;
    use sea_orm::PaginatorTrait;

    fn request(name: &str) -> CategoryRequest {
        CategoryRequest {
            category_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_and_list_with_parent_enrichment() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_category(&db, &ctx, &ids, Some(request("饮料"))).await;
        assert!(resp.is(&codes::CATEGORY.add_success));

        let parent = category_by_name(&db, &ctx, "饮料").await;
        assert_ne!(parent.id, 0);

        let child = CategoryRequest {
            parent_id: Some(parent.id),
            ..request("果汁")
        };
        let resp = add_or_update_category(&db, &ctx, &ids, Some(child)).await;
        assert!(resp.is(&codes::CATEGORY.add_success));

        let list = category_list(&db, &ctx).await;
        let records = list.data.unwrap();
        assert_eq!(records.len(), 2);
        let child_vo = records.iter().find(|r| r.category_name == "果汁").unwrap();
        assert_eq!(child_vo.parent_name.as_deref(), Some("饮料"));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_without_writing() {
        let db = get_db().await.unwrap();
        let ctx = en_context();
        let ids = Snowflake::default();

        add_or_update_category(&db, &ctx, &ids, Some(request("Beverages"))).await;
        let resp = add_or_update_category(&db, &ctx, &ids, Some(request("Beverages"))).await;
        assert!(resp.is(&codes::CATEGORY.key_exists));
        assert_eq!(resp.msg.as_deref(), Some(codes::CATEGORY.key_exists.en));

        let count = ProductCategory::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn update_keeps_fields_the_request_omits() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let full = CategoryRequest {
            category_number: Some("C-001".into()),
            sort: Some(5),
            remark: Some("初始备注".into()),
            ..request("酒水")
        };
        add_or_update_category(&db, &ctx, &ids, Some(full)).await;
        let created = category_by_name(&db, &ctx, "酒水").await;

        let partial = CategoryRequest {
            id: Some(created.id),
            sort: Some(9),
            ..Default::default()
        };
        let resp = add_or_update_category(&db, &ctx, &ids, Some(partial)).await;
        assert!(resp.is(&codes::CATEGORY.update_success));

        let updated = category_by_name(&db, &ctx, "酒水").await;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.sort, Some(9));
        assert_eq!(updated.category_number.as_deref(), Some("C-001"));
        assert_eq!(updated.remark.as_deref(), Some("初始备注"));
        assert_eq!(updated.create_by, created.create_by);
        assert_eq!(updated.create_time, created.create_time);
        assert!(updated.update_time.is_some());
    }

    #[tokio::test]
    async fn updating_a_missing_id_reports_update_error() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_category(
            &db,
            &ctx,
            &ids,
            Some(CategoryRequest {
                id: Some(424242),
                ..request("不存在")
            }),
        )
        .await;
        assert!(resp.is(&codes::CATEGORY.update_error));
    }

    #[tokio::test]
    async fn soft_delete_hides_but_keeps_the_row() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_category(&db, &ctx, &ids, Some(request("零食"))).await;
        let created = category_by_name(&db, &ctx, "零食").await;

        let resp = delete_categories(&db, &ctx, Some(vec![created.id])).await;
        assert!(resp.is(&codes::CATEGORY.delete_success));

        // Hidden from reads, physically retained.
        assert_eq!(category_by_name(&db, &ctx, "零食").await.id, 0);
        let raw = ProductCategory::find_by_id(created.id).one(&db).await.unwrap().unwrap();
        assert_eq!(raw.delete_flag, models::DELETED);

        // Re-deleting the same set still succeeds.
        let resp = delete_categories(&db, &ctx, Some(vec![created.id])).await;
        assert!(resp.is(&codes::CATEGORY.delete_success));

        // The name is reusable once the old row is inactive.
        let resp = add_or_update_category(&db, &ctx, &ids, Some(request("零食"))).await;
        assert!(resp.is(&codes::CATEGORY.add_success));
    }

    #[tokio::test]
    async fn null_arguments_are_rejected() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_category(&db, &ctx, &ids, None).await;
        assert!(resp.is(&codes::PARAMETER_NULL));
        assert_eq!(resp.msg.as_deref(), Some(codes::PARAMETER_NULL.zh_cn));

        let resp = delete_categories(&db, &ctx, Some(vec![])).await;
        assert!(resp.is(&codes::PARAMETER_NULL));
    }

    #[tokio::test]
    async fn blank_lookup_returns_empty_placeholder() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let model = category_by_name(&db, &ctx, "   ").await;
        assert_eq!(model.id, 0);
        assert!(model.category_name.is_empty());
    }

    #[tokio::test]
    async fn padded_names_are_trimmed_and_still_conflict() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_category(&db, &ctx, &ids, Some(request("  饮料  "))).await;
        assert!(resp.is(&codes::CATEGORY.add_success));

        // The stored name is the trimmed one.
        assert_ne!(category_by_name(&db, &ctx, "饮料").await.id, 0);

        // The bare name now collides with the padded submission.
        let resp = add_or_update_category(&db, &ctx, &ids, Some(request("饮料"))).await;
        assert!(resp.is(&codes::CATEGORY.key_exists));
        let count = ProductCategory::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn lookups_and_deletes_stay_inside_the_tenant() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_category(&db, &ctx, &ids, Some(request("生鲜"))).await;
        let created = category_by_name(&db, &ctx, "生鲜").await;
        assert_ne!(created.id, 0);

        let other = crate::context::StaticContext {
            user_id: 9,
            tenant_id: 999,
            language: common::locale::Locale::ZhCn,
        };
        assert_eq!(category_by_name(&db, &other, "生鲜").await.id, 0);

        let resp = delete_categories(&db, &other, Some(vec![created.id])).await;
        assert!(resp.is(&codes::CATEGORY.delete_error));
        assert_ne!(category_by_name(&db, &ctx, "生鲜").await.id, 0);
    }
}
