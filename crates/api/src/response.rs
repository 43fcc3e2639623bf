//! Shared response envelope for single-resource API responses.
//!
//! Mutations and single-item reads answer with `{ "message": ..., "data": ... }`.
//! Collection reads return a bare JSON array.

use serde::Serialize;

/// `{ "message": String, "data": T | null }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::new("Product patched successfully", product)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload with a human-readable message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}
