//! Menu service. Menus are platform-wide; a newly added menu is granted to
//! the admin role by appending its id to that role's relation string, and
//! `menu_list` resolves the caller's menus through user-role and role-menu
//! relations.

use std::collections::HashSet;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use common::response::Response;
use models::sys_menu::{self, Entity as SysMenu};
use models::sys_role::ADMIN_ROLE_ID;
use models::sys_role_menu_rel::{self, Entity as SysRoleMenuRel};
use models::sys_user_role_rel::{self, Entity as SysUserRoleRel};

use crate::codes;
use crate::context::{IdSource, RequestContext};
use crate::crud::{self, non_blank, CrudEntity, CrudMessages, DateTime};
use crate::system::parse_bracket_ids;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub menu_type: Option<i32>,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: Option<i32>,
    pub parent_id: Option<i64>,
    pub status: Option<i32>,
    pub hide_menu: Option<i32>,
    pub blank: Option<i32>,
    pub ignore_keep_alive: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuVo {
    pub id: i64,
    pub name: String,
    pub menu_type: Option<i32>,
    pub path: Option<String>,
    pub component: Option<String>,
    pub sort: Option<i32>,
    pub parent_id: Option<i64>,
    pub status: Option<i32>,
    pub blank: Option<i32>,
    pub create_time: Option<DateTime>,
    /// Frontend routing metadata (title, icon, visibility flags).
    pub meta: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MenuTree {
    pub total: usize,
    pub data: Vec<MenuVo>,
}

fn menu_vo(menu: sys_menu::Model) -> MenuVo {
    let meta = serde_json::json!({
        "title": menu.title,
        "icon": menu.icon,
        "hideMenu": menu.hide_menu.unwrap_or(0) != 0,
        "ignoreKeepAlive": menu.ignore_keep_alive.unwrap_or(0) != 0,
    });
    MenuVo {
        id: menu.id,
        name: menu.name,
        menu_type: menu.menu_type,
        path: menu.path,
        component: menu.component,
        sort: menu.sort,
        parent_id: menu.parent_id,
        status: menu.status,
        blank: menu.blank,
        create_time: menu.create_time,
        meta,
    }
}

pub struct MenuOps;

impl CrudEntity for MenuOps {
    type Entity = SysMenu;
    type Model = sys_menu::Model;
    type ActiveModel = sys_menu::ActiveModel;
    type Request = MenuRequest;

    fn messages() -> &'static CrudMessages {
        &codes::MENU
    }

    fn request_id(request: &MenuRequest) -> Option<i64> {
        request.id
    }

    fn id_column() -> sys_menu::Column {
        sys_menu::Column::Id
    }

    fn delete_flag_column() -> sys_menu::Column {
        sys_menu::Column::DeleteFlag
    }

    fn empty_model() -> sys_menu::Model {
        sys_menu::Model {
            id: 0,
            name: String::new(),
            title: None,
            menu_type: None,
            path: None,
            component: None,
            icon: None,
            sort: None,
            parent_id: None,
            status: None,
            hide_menu: None,
            blank: None,
            ignore_keep_alive: None,
            create_time: None,
            create_by: None,
            update_time: None,
            update_by: None,
            delete_flag: models::NOT_DELETED,
        }
    }

    fn insert_model(
        request: &MenuRequest,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> sys_menu::ActiveModel {
        sys_menu::ActiveModel {
            id: Set(id),
            name: Set(request.name.clone().unwrap_or_default()),
            title: Set(request.title.clone()),
            menu_type: Set(request.menu_type),
            path: Set(request.path.clone()),
            component: Set(request.component.clone()),
            icon: Set(request.icon.clone()),
            sort: Set(request.sort),
            parent_id: Set(request.parent_id),
            status: Set(request.status),
            hide_menu: Set(request.hide_menu),
            blank: Set(request.blank),
            ignore_keep_alive: Set(request.ignore_keep_alive),
            create_time: Set(Some(now)),
            create_by: Set(Some(ctx.current_user_id())),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        }
    }

    fn update_model(
        current: sys_menu::Model,
        request: &MenuRequest,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> sys_menu::ActiveModel {
        let mut active = current.into_active_model();
        if let Some(name) = non_blank(&request.name) {
            active.name = Set(name);
        }
        if let Some(title) = non_blank(&request.title) {
            active.title = Set(Some(title));
        }
        if let Some(menu_type) = request.menu_type {
            active.menu_type = Set(Some(menu_type));
        }
        if let Some(path) = non_blank(&request.path) {
            active.path = Set(Some(path));
        }
        if let Some(component) = non_blank(&request.component) {
            active.component = Set(Some(component));
        }
        if let Some(icon) = non_blank(&request.icon) {
            active.icon = Set(Some(icon));
        }
        if let Some(sort) = request.sort {
            active.sort = Set(Some(sort));
        }
        if let Some(parent_id) = request.parent_id {
            active.parent_id = Set(Some(parent_id));
        }
        if let Some(status) = request.status {
            active.status = Set(Some(status));
        }
        if let Some(hide_menu) = request.hide_menu {
            active.hide_menu = Set(Some(hide_menu));
        }
        if let Some(blank) = request.blank {
            active.blank = Set(Some(blank));
        }
        if let Some(ignore_keep_alive) = request.ignore_keep_alive {
            active.ignore_keep_alive = Set(Some(ignore_keep_alive));
        }
        active.update_time = Set(Some(now));
        active.update_by = Set(Some(ctx.current_user_id()));
        active
    }
}

/// Creates or updates a menu. A create also appends the new id to the admin
/// role's relation string; if that grant cannot be written the operation
/// reports the add error (the menu row itself is already saved, as in the
/// legacy flow).
pub async fn add_or_update_menu(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<MenuRequest>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    if request.id.is_some() {
        return crud::add_or_update::<MenuOps>(db, ctx, ids, Some(request)).await;
    }

    let menu_id = ids.next_id();
    let model = MenuOps::insert_model(&request, menu_id, ctx, chrono::Utc::now().naive_utc());
    if let Err(err) = model.insert(db).await {
        warn!(error = %err, "menu insert failed");
        return Response::message(&codes::MENU.add_error, locale);
    }

    match grant_to_admin_role(db, menu_id).await {
        Ok(true) => Response::message(&codes::MENU.add_success, locale),
        Ok(false) => Response::message(&codes::MENU.add_error, locale),
        Err(err) => {
            warn!(error = %err, "admin role grant failed");
            Response::message(&codes::MENU.add_error, locale)
        }
    }
}

async fn grant_to_admin_role(db: &DatabaseConnection, menu_id: i64) -> Result<bool, sea_orm::DbErr> {
    let rel = SysRoleMenuRel::find()
        .filter(sys_role_menu_rel::Column::RoleId.eq(ADMIN_ROLE_ID))
        .one(db)
        .await?;
    let menu_ids = match rel {
        Some(rel) => format!("{}[{menu_id}]", rel.menu_id),
        None => format!("[{menu_id}]"),
    };
    let result = SysRoleMenuRel::update_many()
        .col_expr(sys_role_menu_rel::Column::MenuId, Expr::value(menu_ids))
        .filter(sys_role_menu_rel::Column::RoleId.eq(ADMIN_ROLE_ID))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_menu(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> Response<String> {
    crud::delete_by_ids::<MenuOps>(db, ctx, id.map(|id| vec![id])).await
}

/// The caller's menus: user roles, then role-menu relations, then the active
/// menus of the decoded ids, ordered by `sort`.
pub async fn menu_list(db: &DatabaseConnection, ctx: &dyn RequestContext) -> Response<MenuTree> {
    let role_ids = match SysUserRoleRel::find()
        .filter(sys_user_role_rel::Column::UserId.eq(ctx.current_user_id()))
        .filter(sys_user_role_rel::Column::DeleteFlag.eq(models::NOT_DELETED))
        .all(db)
        .await
    {
        Ok(rels) => rels.into_iter().map(|r| r.role_id).collect::<Vec<_>>(),
        Err(err) => {
            warn!(error = %err, "user role lookup failed");
            return Response::data(MenuTree::default());
        }
    };
    if role_ids.is_empty() {
        return Response::data(MenuTree::default());
    }

    let menu_ids = match SysRoleMenuRel::find()
        .filter(sys_role_menu_rel::Column::RoleId.is_in(role_ids))
        .filter(sys_role_menu_rel::Column::DeleteFlag.eq(models::NOT_DELETED))
        .all(db)
        .await
    {
        Ok(rels) => rels
            .iter()
            .flat_map(|rel| parse_bracket_ids(&rel.menu_id))
            .collect::<HashSet<_>>(),
        Err(err) => {
            warn!(error = %err, "role menu relation lookup failed");
            return Response::data(MenuTree::default());
        }
    };
    if menu_ids.is_empty() {
        return Response::data(MenuTree::default());
    }

    let menus = match SysMenu::find()
        .filter(sys_menu::Column::Id.is_in(menu_ids))
        .filter(sys_menu::Column::DeleteFlag.eq(models::NOT_DELETED))
        .order_by_asc(sys_menu::Column::Sort)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "menu lookup failed");
            return Response::data(MenuTree::default());
        }
    };

    let data: Vec<MenuVo> = menus.into_iter().map(menu_vo).collect();
    Response::data(MenuTree {
        total: data.len(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, zh_context, TEST_TENANT, TEST_USER};
    use common::snowflake::Snowflake;
    use sea_orm::PaginatorTrait;

    fn request(name: &str, sort: i32) -> MenuRequest {
        MenuRequest {
            name: Some(name.to_string()),
            title: Some(name.to_string()),
            sort: Some(sort),
            status: Some(0),
            ..Default::default()
        }
    }

    async fn seed_admin_rel(db: &DatabaseConnection, ids: &Snowflake) {
        let rel = sys_role_menu_rel::ActiveModel {
            id: Set(ids.next_id()),
            role_id: Set(ADMIN_ROLE_ID),
            menu_id: Set(String::new()),
            create_time: Set(Some(chrono::Utc::now().naive_utc())),
            create_by: Set(Some(TEST_USER)),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        };
        rel.insert(db).await.unwrap();
    }

    async fn grant_role_to_test_user(db: &DatabaseConnection, ids: &Snowflake, role_id: i64) {
        let rel = sys_user_role_rel::ActiveModel {
            id: Set(ids.next_id()),
            tenant_id: Set(TEST_TENANT),
            user_id: Set(TEST_USER),
            role_id: Set(role_id),
            create_time: Set(Some(chrono::Utc::now().naive_utc())),
            create_by: Set(Some(TEST_USER)),
            update_time: Set(None),
            update_by: Set(None),
            delete_flag: Set(models::NOT_DELETED),
        };
        rel.insert(db).await.unwrap();
    }

    #[tokio::test]
    async fn adding_a_menu_extends_the_admin_grant() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_admin_rel(&db, &ids).await;

        let resp = add_or_update_menu(&db, &ctx, &ids, Some(request("库存", 1))).await;
        assert!(resp.is(&codes::MENU.add_success));

        let rel = SysRoleMenuRel::find()
            .filter(sys_role_menu_rel::Column::RoleId.eq(ADMIN_ROLE_ID))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(parse_bracket_ids(&rel.menu_id).len(), 1);
    }

    #[tokio::test]
    async fn add_without_admin_relation_reports_error_but_saves_the_row() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();

        let resp = add_or_update_menu(&db, &ctx, &ids, Some(request("报表", 1))).await;
        assert!(resp.is(&codes::MENU.add_error));

        let count = SysMenu::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn menu_list_resolves_roles_and_sorts_by_sort() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_admin_rel(&db, &ids).await;

        add_or_update_menu(&db, &ctx, &ids, Some(request("乙", 2))).await;
        add_or_update_menu(&db, &ctx, &ids, Some(request("甲", 1))).await;

        // The test user sees menus through the admin role.
        grant_role_to_test_user(&db, &ids, ADMIN_ROLE_ID).await;

        let tree = menu_list(&db, &ctx).await.data.unwrap();
        assert_eq!(tree.total, 2);
        assert_eq!(tree.data[0].name, "甲");
        assert_eq!(tree.data[1].name, "乙");
        assert_eq!(tree.data[0].meta["title"], "甲");
    }

    #[tokio::test]
    async fn user_without_roles_gets_an_empty_tree() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();

        let tree = menu_list(&db, &ctx).await.data.unwrap();
        assert_eq!(tree.total, 0);
        assert!(tree.data.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_menu() {
        let db = get_db().await.unwrap();
        let ctx = zh_context();
        let ids = Snowflake::default();
        seed_admin_rel(&db, &ids).await;

        add_or_update_menu(&db, &ctx, &ids, Some(request("设置", 5))).await;
        let menu = SysMenu::find().one(&db).await.unwrap().unwrap();

        let resp = add_or_update_menu(
            &db,
            &ctx,
            &ids,
            Some(MenuRequest {
                id: Some(menu.id),
                sort: Some(9),
                ..Default::default()
            }),
        )
        .await;
        assert!(resp.is(&codes::MENU.update_success));
        let updated = SysMenu::find().one(&db).await.unwrap().unwrap();
        assert_eq!(updated.sort, Some(9));
        assert_eq!(updated.name, "设置");

        assert!(delete_menu(&db, &ctx, Some(menu.id))
            .await
            .is(&codes::MENU.delete_success));
        let flagged = SysMenu::find_by_id(menu.id).one(&db).await.unwrap().unwrap();
        assert_eq!(flagged.delete_flag, models::DELETED);
    }
}
