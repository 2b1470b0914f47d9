//! Generic CRUD-with-soft-delete engine.
//!
//! Every master-data entity follows the same orchestration: null-check the
//! request, precheck the business key among active rows of the tenant, write
//! with application-assigned ids and audit stamps, soft-delete by flipping
//! `delete_flag`, and resolve every outcome to a localized envelope message.
//! The per-entity differences (key extraction, delete policy, field mapping)
//! are described once through [`CrudEntity`] and instantiated per entity.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter,
};
use tracing::warn;

use common::locale::Message;
use common::response::Response;

use crate::codes;
use crate::context::{IdSource, RequestContext};

pub type DateTime = chrono::NaiveDateTime;

/// How `delete_by_ids` removes rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Flip `delete_flag`, keep the row.
    Soft,
    /// Issue a real DELETE.
    Physical,
}

/// Localized outcome messages of one entity's CRUD operations.
#[derive(Debug, Clone, Copy)]
pub struct CrudMessages {
    pub add_success: Message,
    pub add_error: Message,
    pub update_success: Message,
    pub update_error: Message,
    pub delete_success: Message,
    pub delete_error: Message,
    pub key_exists: Message,
}

/// Per-entity configuration of the generic engine.
pub trait CrudEntity {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;
    type Request: Send + Sync;

    const DELETE_POLICY: DeletePolicy = DeletePolicy::Soft;

    fn messages() -> &'static CrudMessages;

    fn request_id(request: &Self::Request) -> Option<i64>;

    /// Value checked for uniqueness among active rows of the tenant.
    /// `None` disables the precheck (roles and menus have no key).
    fn business_key(_request: &Self::Request) -> Option<String> {
        None
    }

    fn key_column() -> Option<<Self::Entity as EntityTrait>::Column> {
        None
    }

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn delete_flag_column() -> <Self::Entity as EntityTrait>::Column;

    fn active_condition() -> Condition {
        Condition::all().add(Self::delete_flag_column().eq(models::NOT_DELETED))
    }

    /// Tenant scope of the uniqueness precheck. Global entities keep the
    /// default no-op condition.
    fn tenant_condition(_tenant_id: i64) -> Condition {
        Condition::all()
    }

    /// Placeholder returned by the permissive lookups on a miss.
    fn empty_model() -> Self::Model;

    fn insert_model(
        request: &Self::Request,
        id: i64,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> Self::ActiveModel;

    fn update_model(
        current: Self::Model,
        request: &Self::Request,
        ctx: &dyn RequestContext,
        now: DateTime,
    ) -> Self::ActiveModel;
}

/// Create or update one row, dispatching on the presence of `request.id`.
///
/// The uniqueness precheck and the write are two statements; a concurrent
/// insert between them can slip through. The legacy behavior is kept
/// deliberately, so no unique index backs the business key.
pub async fn add_or_update<S: CrudEntity>(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: &dyn IdSource,
    request: Option<S::Request>,
) -> Response<String> {
    let locale = ctx.system_language();
    let Some(request) = request else {
        return Response::message(&codes::PARAMETER_NULL, locale);
    };
    let msgs = S::messages();
    let failure = if S::request_id(&request).is_some() {
        &msgs.update_error
    } else {
        &msgs.add_error
    };

    if let (Some(key), Some(column)) = (S::business_key(&request), S::key_column()) {
        let mut query = S::Entity::find()
            .filter(column.eq(key))
            .filter(S::active_condition())
            .filter(S::tenant_condition(ctx.current_tenant_id()));
        if let Some(id) = S::request_id(&request) {
            query = query.filter(S::id_column().ne(id));
        }
        match query.count(db).await {
            Ok(0) => {}
            Ok(_) => return Response::message(&msgs.key_exists, locale),
            Err(err) => {
                warn!(error = %err, "business key precheck failed");
                return Response::message(failure, locale);
            }
        }
    }

    let now = Utc::now().naive_utc();
    match S::request_id(&request) {
        None => {
            let model = S::insert_model(&request, ids.next_id(), ctx, now);
            match model.insert(db).await {
                Ok(_) => Response::message(&msgs.add_success, locale),
                Err(err) => {
                    warn!(error = %err, "insert failed");
                    Response::message(&msgs.add_error, locale)
                }
            }
        }
        Some(id) => {
            let current = S::Entity::find()
                .filter(S::id_column().eq(id))
                .filter(S::active_condition())
                .filter(S::tenant_condition(ctx.current_tenant_id()))
                .one(db)
                .await;
            match current {
                Ok(Some(current)) => {
                    let model = S::update_model(current, &request, ctx, now);
                    match model.update(db).await {
                        Ok(_) => Response::message(&msgs.update_success, locale),
                        Err(err) => {
                            warn!(error = %err, "update failed");
                            Response::message(&msgs.update_error, locale)
                        }
                    }
                }
                Ok(None) => Response::message(&msgs.update_error, locale),
                Err(err) => {
                    warn!(error = %err, "update lookup failed");
                    Response::message(&msgs.update_error, locale)
                }
            }
        }
    }
}

/// Bulk delete by id, honoring the entity's [`DeletePolicy`].
pub async fn delete_by_ids<S: CrudEntity>(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    ids: Option<Vec<i64>>,
) -> Response<String> {
    let locale = ctx.system_language();
    let ids = match ids {
        Some(list) if !list.is_empty() => list,
        _ => return Response::message(&codes::PARAMETER_NULL, locale),
    };
    let msgs = S::messages();

    let affected = match S::DELETE_POLICY {
        DeletePolicy::Soft => S::Entity::update_many()
            .col_expr(S::delete_flag_column(), Expr::value(models::DELETED))
            .filter(S::id_column().is_in(ids))
            .filter(S::tenant_condition(ctx.current_tenant_id()))
            .exec(db)
            .await
            .map(|res| res.rows_affected),
        DeletePolicy::Physical => S::Entity::delete_many()
            .filter(S::id_column().is_in(ids))
            .filter(S::tenant_condition(ctx.current_tenant_id()))
            .exec(db)
            .await
            .map(|res| res.rows_affected),
    };

    match affected {
        Ok(0) => Response::message(&msgs.delete_error, locale),
        Ok(_) => Response::message(&msgs.delete_success, locale),
        Err(err) => {
            warn!(error = %err, "delete failed");
            Response::message(&msgs.delete_error, locale)
        }
    }
}

/// Exact-match lookup among the tenant's active rows. A blank name or a miss
/// yields the entity's empty placeholder, never an error.
pub async fn get_by_name<S: CrudEntity>(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    name: &str,
) -> S::Model {
    let Some(column) = S::key_column() else {
        return S::empty_model();
    };
    if name.trim().is_empty() {
        return S::empty_model();
    }
    match S::Entity::find()
        .filter(column.eq(name))
        .filter(S::active_condition())
        .filter(S::tenant_condition(ctx.current_tenant_id()))
        .one(db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => S::empty_model(),
        Err(err) => {
            warn!(error = %err, "lookup by name failed");
            S::empty_model()
        }
    }
}

/// Id lookup with the same permissive contract as [`get_by_name`].
pub async fn get_by_id<S: CrudEntity>(
    db: &DatabaseConnection,
    ctx: &dyn RequestContext,
    id: Option<i64>,
) -> S::Model {
    let Some(id) = id else {
        return S::empty_model();
    };
    match S::Entity::find()
        .filter(S::id_column().eq(id))
        .filter(S::active_condition())
        .filter(S::tenant_condition(ctx.current_tenant_id()))
        .one(db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => S::empty_model(),
        Err(err) => {
            warn!(error = %err, "lookup by id failed");
            S::empty_model()
        }
    }
}

/// Returns the trimmed value when it is present and non-blank.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Parses the date strings requests carry: "YYYY-MM-DD HH:MM:SS" or a bare
/// "YYYY-MM-DD" (midnight).
pub fn parse_date(raw: &str) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
