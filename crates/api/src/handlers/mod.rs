pub mod auth;
pub mod info;
pub mod product;
pub mod user;
