use axum::{Extension, Json, extract::State, http::StatusCode};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use db::models::user::Entity as UserEntity;

/// GET /api/auth/me
///
/// Returns the profile of the currently authenticated user.
///
/// ### Responses
/// - `200 OK` with the user record
/// - `404 Not Found` if the account behind the token no longer exists
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<UserResponse>>) {
    match UserEntity::find_by_id(claims.sub).one(app_state.db()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to load user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
