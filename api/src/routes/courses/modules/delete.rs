use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{load_module_in_course, load_owned_course};
use db::models::course_module::Model as ModuleModel;

/// DELETE /api/courses/{course_id}/modules/{module_id}
///
/// Removes a module from a course the caller owns. Existing progress rows
/// keep the stale module id until the next progress write drops it.
pub async fn delete_module(
    State(app_state): State<AppState>,
    Path((course_id, module_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if let Err((status, msg)) = load_owned_course(app_state.db(), course_id, &claims).await {
        return (status, Json(ApiResponse::error(msg)));
    }

    if let Err((status, msg)) = load_module_in_course(app_state.db(), course_id, module_id).await {
        return (status, Json(ApiResponse::error(msg)));
    }

    match ModuleModel::delete(app_state.db(), module_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Module deleted successfully")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to delete module");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
