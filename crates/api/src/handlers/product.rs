//! Handlers for the `/product` resource.
//!
//! Every handler requires a bearer token via [`AuthUser`]. There is no
//! ownership: any authenticated user may modify any product.

use axum::extract::State;
use axum::http::StatusCode;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, PatchProduct, Product, UpdateProduct};
use storefront_db::repositories::ProductRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /api/v1/product
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/v1/product/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::new("Product found", product)))
}

/// POST /api/v1/product
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    input.validate()?;

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(product_id = product.id, actor = %auth.user.username, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Product created successfully", product)),
    ))
}

/// PUT /api/v1/product/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<ApiResponse<Product>>> {
    input.validate()?;

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, actor = %auth.user.username, "Product updated");
    Ok(Json(ApiResponse::new("Product updated successfully", product)))
}

/// PATCH /api/v1/product/{id}
///
/// An empty body is a no-op that still reports the current row.
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<PatchProduct>,
) -> AppResult<Json<ApiResponse<Product>>> {
    input.validate()?;

    let product = if input.is_empty() {
        ProductRepo::find_by_id(&state.pool, id).await?
    } else {
        ProductRepo::patch(&state.pool, id, &input).await?
    }
    .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, actor = %auth.user.username, "Product patched");
    Ok(Json(ApiResponse::new("Product patched successfully", product)))
}

/// DELETE /api/v1/product/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = ProductRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, actor = %auth.user.username, "Product deleted");
    Ok(Json(ApiResponse::new("Product removed successfully", product)))
}
