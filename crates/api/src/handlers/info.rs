//! Handlers for the `/info` resource (API-key gated).

use serde::Serialize;

use crate::extract::Json;
use crate::middleware::api_key::RequireApiKey;

/// Service status payload.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/v1/info/show
pub async fn show(_key: RequireApiKey) -> Json<InfoResponse> {
    Json(InfoResponse {
        status: "Storefront API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}
