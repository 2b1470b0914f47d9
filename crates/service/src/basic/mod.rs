//! Basic-data services. Members double as the payer directory of the
//! advance-charge receipts.

pub mod member;
