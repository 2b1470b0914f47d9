//! Business service layer: a generic CRUD-with-soft-delete engine plus the
//! per-entity services built on it. Every operation resolves to a
//! `common::response::Response`; database errors never cross this boundary.

pub mod codes;
pub mod context;
pub mod crud;
pub mod errors;

pub mod basic;
pub mod financial;
pub mod product;
pub mod system;

#[cfg(test)]
mod test_support;
