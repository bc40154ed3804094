use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::progress::common::ProgressResponse;
use db::models::course::Entity as CourseEntity;
use db::models::progress::Model as ProgressModel;

/// GET /api/progress/course/{course_id}
///
/// Returns the caller's progress in one course. A student who enrolled but
/// never completed anything, or who has no stored record at all, gets a
/// zeroed view rather than a 404; only a missing course is an error.
pub async fn get_course_progress(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<ProgressResponse>>) {
    let db = app_state.db();

    match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Course not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load course");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    }

    match ProgressModel::find_by_pair(db, claims.sub, course_id).await {
        Ok(Some(progress)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProgressResponse::from(progress),
                "Progress retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProgressResponse::empty(claims.sub, course_id),
                "Progress retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to load progress");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
