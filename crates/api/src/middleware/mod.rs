//! Credential extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the current user from a JWT Bearer token.
//! - [`api_key::RequireApiKey`] -- Requires the shared `X-API-KEY` header.

pub mod api_key;
pub mod auth;
