use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::load_owned_course;
use db::models::course::Model as CourseModel;

/// DELETE /api/courses/{course_id}
///
/// Deletes a course. Owner or admin only. Modules, enrollments, progress and
/// quizzes go with it via foreign keys; the aggregate rows in the stats store
/// are cleaned up best-effort.
pub async fn delete_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if let Err((status, msg)) = load_owned_course(app_state.db(), course_id, &claims).await {
        return (status, Json(ApiResponse::error(msg)));
    }

    if let Err(e) = CourseModel::delete(app_state.db(), course_id).await {
        tracing::error!(error = %e, "failed to delete course");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        );
    }

    if let Err(e) = services::stats::remove_course_stats(app_state.stats_db(), course_id).await {
        tracing::warn!(course_id, error = %e, "failed to remove course stats rows");
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Course deleted successfully")),
    )
}
