pub mod auth;
pub mod health;
pub mod info;
pub mod product;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/token                    login, form body (public)
/// /auth/me                       current user (bearer)
///
/// /info/show                     service status (X-API-KEY)
///
/// /user                          list, create (bearer)
/// /user/{id}                     get, update, delete (bearer)
///
/// /product                       list, create (bearer)
/// /product/{id}                  get, update, patch, delete (bearer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/info", info::router())
        .nest("/user", user::router())
        .nest("/product", product::router())
}
