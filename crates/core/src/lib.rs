//! Domain primitives shared by the database and API crates.
//!
//! Nothing in here touches the network or the database.

pub mod api_keys;
pub mod error;
pub mod hashing;
pub mod types;
