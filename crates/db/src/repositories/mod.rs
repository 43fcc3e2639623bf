//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every mutation is a single
//! statement and commits on its own.

pub mod product_repo;
pub mod user_repo;

pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
