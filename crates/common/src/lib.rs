//! Shared building blocks: result envelope, localized messages, pagination
//! and id generation. No persistence or business rules live here.

pub mod locale;
pub mod pagination;
pub mod response;
pub mod snowflake;
pub mod utils;
