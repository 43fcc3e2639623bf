//! Static API key extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::api_keys::{keys_match, API_KEY_HEADER};
use storefront_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Requires a valid `X-API-KEY` header. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn key_gated(_key: RequireApiKey) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("Not authenticated".into())))?;

        if !keys_match(presented, &state.config.api_key) {
            tracing::warn!("Rejected request with invalid API key");
            return Err(AppError::Core(CoreError::Forbidden(
                "Invalid API Key".into(),
            )));
        }

        Ok(RequireApiKey)
    }
}
