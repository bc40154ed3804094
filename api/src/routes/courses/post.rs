//! Course creation route.
//!
//! Provides the `POST /api/courses` endpoint. The authenticated caller
//! becomes the course's instructor; a zeroed aggregate row is seeded in the
//! stats store so dashboards see the course immediately.

use axum::{Extension, Json, extract::State, http::StatusCode};
use util::state::AppState;
use util::validation::format_validation_errors;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{CourseRequest, CourseResponse};
use db::models::course::Model as CourseModel;
use db::stats::course_stats;

/// POST /api/courses
///
/// Create a new course owned by the calling instructor.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Intro to Rust",
///   "description": "Ownership without tears"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created` with the course record
/// - `422 Unprocessable Entity` when the title is empty
pub async fn create_course(
    State(app_state): State<AppState>,
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

    let course =
        match CourseModel::create(app_state.db(), &req.title, &req.description, claims.sub).await {
            Ok(course) => course,
            Err(e) => {
                tracing::error!(error = %e, "failed to create course");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(format!("Database error: {}", e))),
                );
            }
        };

    // The aggregate row is derived state; a failure here is healed by the
    // admin rebuild endpoint, not surfaced to the caller.
    if let Err(e) = course_stats::Model::init(app_state.stats_db(), course.id).await {
        tracing::warn!(course_id = course.id, error = %e, "failed to seed course stats row");
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            CourseResponse::from(course),
            "Course created successfully",
        )),
    )
}
