//! Row models and request DTOs, one module per table.

pub mod product;
pub mod user;
