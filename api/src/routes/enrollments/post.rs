use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::service_error;
use db::models::enrollment;

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_at: String,
}

impl From<enrollment::Model> for EnrollmentResponse {
    fn from(enrollment: enrollment::Model) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            enrolled_at: enrollment.enrolled_at.to_rfc3339(),
        }
    }
}

/// POST /api/enrollments
///
/// Enrolls the calling student in a course. Also seeds an empty progress
/// record, bumps the course's enrollment counter in the stats store, and
/// leaves a notification for the student.
///
/// ### Request Body
/// ```json
/// { "course_id": 1 }
/// ```
///
/// ### Responses
/// - `201 Created` with the enrollment record
/// - `404 Not Found` when the course does not exist
/// - `409 Conflict` when the student is already enrolled
pub async fn enroll(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<EnrollRequest>,
) -> (StatusCode, Json<ApiResponse<EnrollmentResponse>>) {
    match services::enrollment::enroll(
        app_state.db(),
        app_state.stats_db(),
        claims.sub,
        req.course_id,
    )
    .await
    {
        Ok(enrollment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                EnrollmentResponse::from(enrollment),
                "Enrolled successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}
