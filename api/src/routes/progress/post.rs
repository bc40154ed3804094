use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::service_error;
use crate::routes::progress::common::ProgressResponse;

#[derive(Debug, Deserialize)]
pub struct CompleteModuleRequest {
    pub course_id: i64,
    pub module_id: i64,
}

/// POST /api/progress/complete
///
/// Adds one module to the caller's completed set. Unlike `PUT /progress`
/// this is monotonic: repeating the call changes nothing and the percentage
/// never decreases.
///
/// ### Request Body
/// ```json
/// { "course_id": 1, "module_id": 4 }
/// ```
///
/// ### Responses
/// - `200 OK` with the stored progress record
/// - `404 Not Found` when the course does not exist
/// - `422 Unprocessable Entity` when the module belongs to another course
pub async fn complete_module(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CompleteModuleRequest>,
) -> (StatusCode, Json<ApiResponse<ProgressResponse>>) {
    match services::progress::mark_module_complete(
        app_state.db(),
        app_state.stats_db(),
        claims.sub,
        req.course_id,
        req.module_id,
    )
    .await
    {
        Ok(progress) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProgressResponse::from(progress),
                "Module marked complete",
            )),
        ),
        Err(err) => service_error(err),
    }
}
