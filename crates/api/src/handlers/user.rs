//! Handlers for the `/user` resource.
//!
//! Every handler requires a bearer token via [`AuthUser`].

use axum::extract::State;
use axum::http::StatusCode;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::user::{RegisterUser, UpdateUser, UserResponse};
use storefront_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::handlers::auth::create_account;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// GET /api/v1/user
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/v1/user
///
/// Same rules as self-registration, but on behalf of an authenticated caller.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = create_account(&state, input).await?;
    tracing::info!(user_id = user.id, actor = %auth.user.username, "User created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "User created successfully",
            UserResponse::from(user),
        )),
    ))
}

/// GET /api/v1/user/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::new("User found", UserResponse::from(user))))
}

/// PUT /api/v1/user/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    input.validate()?;

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = id, actor = %auth.user.username, "User updated");
    Ok(Json(ApiResponse::new(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

/// DELETE /api/v1/user/{id}
///
/// Physically removes the row and returns it as it was.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = id, actor = %auth.user.username, "User deleted");
    Ok(Json(ApiResponse::new(
        "User deleted successfully",
        UserResponse::from(user),
    )))
}
