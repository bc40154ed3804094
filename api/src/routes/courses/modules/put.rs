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
use crate::routes::courses::common::{
    ModuleRequest, ModuleResponse, load_module_in_course, load_owned_course,
};
use db::models::course_module::{self, ResourceList};

/// PUT /api/courses/{course_id}/modules/{module_id}
///
/// Replaces a module's content fields. Owner or admin only; the module must
/// belong to the course named in the path.
pub async fn edit_module(
    State(app_state): State<AppState>,
    Path((course_id, module_id)): Path<(i64, i64)>,
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

    let module = match load_module_in_course(app_state.db(), course_id, module_id).await {
        Ok(module) => module,
        Err((status, msg)) => return (status, Json(ApiResponse::error(msg))),
    };

    let mut active: course_module::ActiveModel = module.into();
    active.title = Set(req.title);
    active.content = Set(req.content);
    active.module_order = Set(req.module_order);
    active.video_url = Set(req.video_url);
    active.resources = Set(ResourceList(req.resources));
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ModuleResponse::from(updated),
                "Module updated successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to update module");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
