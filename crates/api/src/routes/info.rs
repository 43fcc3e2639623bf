//! Route definitions for the `/info` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::info;
use crate::state::AppState;

/// Routes mounted at `/info`. All require the `X-API-KEY` header.
///
/// ```text
/// GET /show  -> show
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/show", get(info::show))
}
