use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;
use util::validation::format_validation_errors;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{ModuleRequest, ModuleResponse, load_owned_course};
use db::models::course_module::Model as ModuleModel;

/// POST /api/courses/{course_id}/modules
///
/// Adds a content module to a course the caller owns.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Getting started",
///   "content": "Install the toolchain...",
///   "module_order": 1,
///   "video_url": "https://videos.example.com/intro",
///   "resources": ["https://doc.rust-lang.org/book/"]
/// }
/// ```
///
/// ### Validation Rules
/// * `title`: required, non-empty
/// * `module_order`: required, must be a positive integer; defines the
///   presentation order within the course
///
/// ### Responses
/// - `201 Created` with the module record
/// - `404 Not Found` when the course does not exist
/// - `422 Unprocessable Entity` on validation failure
pub async fn create_module(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ModuleRequest>,
) -> (StatusCode, Json<ApiResponse<ModuleResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    if let Err((status, msg)) = load_owned_course(app_state.db(), course_id, &claims).await {
        return (status, Json(ApiResponse::error(msg)));
    }

    match ModuleModel::create(
        app_state.db(),
        course_id,
        &req.title,
        &req.content,
        req.module_order,
        req.video_url,
        req.resources,
    )
    .await
    {
        Ok(module) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ModuleResponse::from(module),
                "Module created successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to create module");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
