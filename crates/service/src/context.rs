use common::locale::Locale;
use common::snowflake::Snowflake;

/// Caller identity and language, resolved by the embedding application
/// (session, token, header) before it reaches the service layer.
pub trait RequestContext: Send + Sync {
    fn current_user_id(&self) -> i64;
    fn current_tenant_id(&self) -> i64;
    fn system_language(&self) -> Locale;
}

/// Fixed context value, enough for tests and single-operator embeddings.
#[derive(Debug, Clone, Copy)]
pub struct StaticContext {
    pub user_id: i64,
    pub tenant_id: i64,
    pub language: Locale,
}

impl RequestContext for StaticContext {
    fn current_user_id(&self) -> i64 {
        self.user_id
    }

    fn current_tenant_id(&self) -> i64 {
        self.tenant_id
    }

    fn system_language(&self) -> Locale {
        self.language
    }
}

/// Produces the ids assigned to new rows before insert.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> i64;
}

impl IdSource for Snowflake {
    fn next_id(&self) -> i64 {
        Snowflake::next_id(self)
    }
}
