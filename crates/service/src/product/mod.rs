//! Product master data: categories, attributes and units.

pub mod attribute;
pub mod category;
pub mod unit;
