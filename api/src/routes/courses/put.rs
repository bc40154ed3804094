use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use util::state::AppState;
use util::validation::format_validation_errors;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{CourseRequest, CourseResponse, load_owned_course};
use db::models::course;

/// PUT /api/courses/{course_id}
///
/// Edit a course's title and description. Owner or admin only.
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `403 Forbidden` when the caller is an instructor who does not own the course
/// - `404 Not Found` when the course does not exist
pub async fn edit_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CourseRequest>,
) -> (StatusCode, Json<ApiResponse<CourseResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let course = match load_owned_course(app_state.db(), course_id, &claims).await {
        Ok(course) => course,
        Err((status, msg)) => return (status, Json(ApiResponse::error(msg))),
    };

    let mut active: course::ActiveModel = course.into();
    active.title = Set(req.title);
    active.description = Set(req.description);
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CourseResponse::from(updated),
                "Course updated successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to update course");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
