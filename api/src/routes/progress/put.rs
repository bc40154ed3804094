use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::service_error;
use crate::routes::progress::common::ProgressResponse;

#[derive(Debug, Deserialize)]
pub struct SetProgressRequest {
    pub course_id: i64,
    #[serde(default)]
    pub completed_module_ids: Vec<i64>,
}

/// PUT /api/progress
///
/// Replaces the caller's completed-module set for a course. Ids that do not
/// belong to the course are dropped silently, duplicates collapse, and the
/// percentage is re-derived from the course's current module count. Marking
/// fewer modules than before is allowed.
///
/// ### Request Body
/// ```json
/// { "course_id": 1, "completed_module_ids": [4, 9] }
/// ```
///
/// ### Responses
/// - `200 OK` with the stored progress record
/// - `404 Not Found` when the course does not exist
pub async fn set_progress(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SetProgressRequest>,
) -> (StatusCode, Json<ApiResponse<ProgressResponse>>) {
    match services::progress::set_progress(
        app_state.db(),
        app_state.stats_db(),
        claims.sub,
        req.course_id,
        req.completed_module_ids,
    )
    .await
    {
        Ok(progress) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProgressResponse::from(progress),
                "Progress updated successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}
