//! Role service. Roles carry no uniqueness rule, so two roles may share a
//! name; the platform admin role (id 0) never appears in listings.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::pagination::{PageResult, Pagination};
use common::response::Response;
use models::sys_role::{self, Entity as SysRole, ADMIN_ROLE_ID};
use models::sys_role_menu_rel::{self, Entity as SysRoleMenuRel};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{self, non_blank, CrudEntity, CrudMessages, DateTime};
use crate::system::{encode_bracket_ids, parse_bracket_ids};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleRequest {
    pub id: Option<i64>,
    pub role_name: Option<String>,
    pub role_type: Option<String>,
    pub price_limit: Option<f64>,
    pub status: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleQuery {
    pub role_name: Option<String>,
    pub status: Option<i32>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleStatusRequest {
    pub id: Option<i64>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolePermissionRequest {
    pub id: Option<i64>,
    pub menu_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleVo {
    pub id: i64,
    pub role_name: String,
    pub role_type: Option<String>,
    pub price_limit: Option<f64>,
    pub status: Option<i32>,
    pub description: Option<String>,
    pub create_time: Option<DateTime>,
    pub menu_ids: Vec<i64>,
}

fn role_vo(role: sys_role::Model, menu_ids: Vec<i64>) -> RoleVo {
    RoleVo {
        id: role.id,
        role_name: role.role_name,
        role_type: role.role_type,
        price_limit: role.price_limit,
        status: role.status,
        description: role.description,
        create_time: role.create_time,
        menu_ids,
    }
}

pub struct RoleOps;

impl CrudEntity for RoleOps {
    type Entity = SysRole;
    type Model = sys_role::Model;
    type ActiveModel = sys_role::ActiveModel;
    type Request = RoleRequest;

    fn messages() -> &'static CrudMessages {
        &codes::ROLE
    }

    fn request_id(request: &RoleRequest) -> Option<i64> {
        request.id
    }

    fn id_column() -> sys_role::Column {
        sys_role::Column::Id
    }

    fn delete_flag_column() -> sys_role::Column {
        sys_role::Column::DeleteFlag
    }

    fn tenant_condition(tenant_id: i64) -> Condition {
        Condition::all().add(sys_role::Column::TenantId.eq(tenant_id))
    }

    fn empty_model() -> sys_role::Model {
        sys_role::Model {
            id: 0,
            tenant_id: 0,
            role_name: String::new(),
            role_type: None,
            price_limit: None,
            status: None,
            description: None,
            create_time: None,
            create_by: None,
            update_time: None,
            update_by: None,
            delete_flag: models::NOT_DELETED,
        }
    }

    fn insert_model(
        request: &RoleRequest,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> sys_role::ActiveModel {
        sys_role::ActiveModel {
            id: Set(id),
            tenant_id: Set(ctx.current_tenant_id()),
            role_name: Set(request.role_name.clone().unwrap_or_default()),
            role_type: Set(request.role_type.clone()),
            price_limit: Set(request.price_limit),
            status: Set(request.status),
            description: Set(request.description.clone()),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
    }

    fn update_model(
        current: sys_role::Model,
        request: &RoleRequest,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> sys_role::ActiveModel {
        let mut active = current.into_active_model();
        if let Some(name) = non_blank(&request.role_name) {
            active.role_name = Set(name);
        }
        if let Some(role_type) = non_blank(&request.role_type) {
            active.role_type = Set(Some(role_type));
        }
        if let Some(price_limit) = request.price_limit {
            active.price_limit = Set(Some(price_limit));
        }
        if let Some(status) = request.status {
            active.status = Set(Some(status));
        }
        if let Some(description) = non_blank(&request.description) {
            active.description = Set(Some(description));
        }
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        active
    }
}

pub async fn add_or_update_role(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<RoleRequest>,
) -> Response<String> {
    crud::add_or_update::<RoleOps>(db, ctx, ids, request).await
}

pub async fn delete_role(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> Response<String> {
    crud::delete_by_ids::<RoleOps>(db, ctx, id.map(|id| vec![id])).await
}

/// Unpaged list of the tenant's active roles, without the admin role.
pub async fn role_list(db: &DatabaseConnection, ctx: &dyn RequestContext) -> Response<Vec<RoleVo>> {
    let roles = match SysRole::find()
        .filter(sys_role::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(sys_role::Column::DeleteFlag.eq(models::NOT_DELETED))
        .filter(sys_role::Column::Id.ne(ADMIN_ROLE_ID))
        .order_by_desc(sys_role::Column::CreateTime)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "role list query failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, ctx.system_language());
        }
    };
    let records = roles.into_iter().map(|r| role_vo(r, Vec::new())).collect();
    Response::data(records)
}

/// Paged role list with exact-match filters and the granted menu ids decoded
/// from the relation string.
pub async fn role_page_list(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    query: Option<RoleQuery>,
) -> Response<PageResult<RoleVo>> {
    let locale = ctx.system_language();
    let query = query.unwrap_or_default();
    let (page, page_size) = Pagination::new(query.page, query.page_size).normalize();

    let mut select = SysRole::find()
        .filter(sys_role::Column::TenantId.eq(ctx.current_tenant_id()))
        .filter(sys_role::Column::DeleteFlag.eq(models::NOT_DELETED))
        .filter(sys_role::Column::Id.ne(ADMIN_ROLE_ID))
        .order_by_desc(sys_role::Column::CreateTime);
    if let Some(name) = non_blank(&query.role_name) {
        select = select.filter(sys_role::Column::RoleName.eq(name));
    }
    if let Some(status) = query.status {
        select = select.filter(sys_role::Column::Status.eq(status));
    }

    let paginator = select.paginate(db, page_size);
    let (total, pages) = match paginator.num_items_and_pages().await {
        Ok(n) => (n.number_of_items, n.number_of_pages),
        Err(err) => {
            warn!(error = %err, "role count failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };
    let roles = match paginator.fetch_page(page).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "role page fetch failed");
            return Response::message(&codes::QUERY_DATA_EMPTY, locale);
        }
    };

    let role_ids: Vec<i64> = roles.iter().map(|r| r.id).collect();
    let mut menus_by_role: HashMap<i64, Vec<i64>> = HashMap::new();
    if !role_ids.is_empty() {
        match SysRoleMenuRel::find()
            .filter(sys_role_menu_rel::Column::RoleId.is_in(role_ids))
            .filter(sys_role_menu_rel::Column::DeleteFlag.eq(models::NOT_DELETED))
            .all(db)
            .await
        {
            Ok(rels) => {
                for rel in rels {
                    menus_by_role
                        .entry(rel.role_id)
                        .or_default()
                        .extend(parse_bracket_ids(&rel.menu_id));
                }
            }
            Err(err) => warn!(error = %err, "role menu relation lookup failed"),
        }
    }

    let records = roles
        .into_iter()
        .map(|r| {
            let menu_ids = menus_by_role.remove(&r.id).unwrap_or_default();
            role_vo(r, menu_ids)
        })
        .collect();
    Response::page(PageResult {
        records,
        total,
        pages,
        size: page_size,
    })
}

pub async fn update_role_status(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    request: Option<RoleStatusRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let (Some(id), Some(status)) = (request.id, request.status) else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };

    let result = SysRole::update_many()
        .col_expr(sys_role::Column::Status, Expr::value(status))
        .filter(sys_role::Column::Id.eq(id))
        .exec(db)
        .await;
    match result {
        Ok(res) if res.rows_affected > 0 => {
            Response::message(&codes::UPDATE_ROLE_STATUS_SUCCESS, locale)
        }
        Ok(_) => Response::message(&codes::UPDATE_ROLE_STATUS_ERROR, locale),
        Err(err) => {
            warn!(error = %err, "role status update failed");
            Response::message(&codes::UPDATE_ROLE_STATUS_ERROR, locale)
        }
    }
}

/// Replaces the role's menu grant with a freshly encoded relation row.
pub async fn role_permission(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<RolePermissionRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let Some(role_id) = request.id else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let menu_ids = match request.menu_ids {
        Some(list) if !list.is_empty() => list,
        _ => return Response::message(&codes::PARAMETER_NULL, locale),
    };

    if let Err(err) = SysRoleMenuRel::delete_many()
        .filter(sys_role_menu_rel::Column::RoleId.eq(role_id))
        .exec(db)
        .await
    {
        warn!(error = %err, "role menu relation cleanup failed");
        return Response::message(&codes::ROLE_PERMISSION_ERROR, locale);
    }

    let rel = sys_role_menu_rel::ActiveModel {
        id: Set(ids.next_id()),
        role_id: Set(role_id),
        menu_id: Set(encode_bracket_ids(&menu_ids)),
        create_time: Set(Some(chrono::Utc::now().naive_utc())),
        create_by: Set(Some(ctx.current_user_id())),
        update_time: Set(None),
        update_by: Set(None),
        delete_flag: Set(models::NOT_DELETED),
    };
    match rel.insert(db).await {
        Ok(_) => Response::message(&codes::ROLE_PERMISSION_SUCCESS, locale),
        Err(err) => {
            warn!(error = %err, "role menu relation insert failed");
            Response::message(&codes::ROLE_PERMISSION_ERROR, locale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, zh_context};
    use common::snowflake::Snowflake;

    fn request(name: &str) -> RoleRequest {
        RoleRequest {
            role_name: Some(name.to_string()),
            status: Some(0),
            ..Default::default()
        }
    }

    async fn seed_admin_role(db: &DatabaseConnection) {
        let ctx = zh_context();
        let admin = RoleOps::insert_model(
            &request("管理员"),
            ADMIN_ROLE_ID,
            &ctx,
            chrono::Utc::now().naive_utc(),
        );
        admin.insert(db).await.unwrap();
    }

    #[tokio::test]
    async fn roles_have_no_uniqueness_rule() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        assert!(add_or_update_role(&db, &ctx, &ids, Some(request("仓管")))
            .await
            .is(&codes::ROLE.add_success));
        assert!(add_or_update_role(&db, &ctx, &ids, Some(request("仓管")))
            .await
            .is(&codes::ROLE.add_success));

        let list = role_list(&db, &ctx).await.data.unwrap();
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn list_excludes_the_admin_role() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        seed_admin_role(&db).await;
        add_or_update_role(&db, &ctx, &ids, Some(request("采购"))).await;

        let list = role_list(&db, &ctx).await.data.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].role_name, "采购");

        let page = role_page_list(&db, &ctx, None).await.data.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn permission_assignment_round_trips_through_the_page_list() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_role(&db, &ctx, &ids, Some(request("销售"))).await;
        let role_id = role_list(&db, &ctx).await.data.unwrap()[0].id;

        let resp = role_permission(
            &db,
            &ctx,
            &ids,
            Some(RolePermissionRequest {
                id: Some(role_id),
                menu_ids: Some(vec![11, 12, 305]),
            }),
        )
        .await;
        assert!(resp.is(&codes::ROLE_PERMISSION_SUCCESS));

        let page = role_page_list(&db, &ctx, None).await.data.unwrap();
        assert_eq!(page.records[0].menu_ids, vec![11, 12, 305]);

        // Re-assigning replaces the previous grant.
        role_permission(
            &db,
            &ctx,
            &ids,
            Some(RolePermissionRequest {
                id: Some(role_id),
                menu_ids: Some(vec![7]),
            }),
        )
        .await;
        let page = role_page_list(&db, &ctx, None).await.data.unwrap();
        assert_eq!(page.records[0].menu_ids, vec![7]);
    }

    #[tokio::test]
    async fn status_and_delete_flow() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        add_or_update_role(&db, &ctx, &ids, Some(request("财务"))).await;
        let role_id = role_list(&db, &ctx).await.data.unwrap()[0].id;

        let resp = update_role_status(
            &db,
            &ctx,
            Some(RoleStatusRequest {
                id: Some(role_id),
                status: Some(1),
            }),
        )
        .await;
        assert!(resp.is(&codes::UPDATE_ROLE_STATUS_SUCCESS));

        assert!(delete_role(&db, &ctx, Some(role_id))
            .await
            .is(&codes::ROLE.delete_success));
        assert!(role_list(&db, &ctx).await.data.unwrap().is_empty());

        assert!(delete_role(&db, &ctx, None)
            .await
            .is(&codes::PARAMETER_NULL));
    }
}
