use axum::http::StatusCode;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::Claims;
use db::models::course;
use db::models::course_module;
use db::models::user::Role;

#[derive(Debug, Deserialize, Validate)]
pub struct CourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ModuleRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[validate(range(min = 1, message = "Module order must be a positive integer"))]
    pub module_order: i32,
    pub video_url: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            instructor_id: course.instructor_id,
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ModuleResponse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: String,
    pub module_order: i32,
    pub video_url: Option<String>,
    pub resources: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<course_module::Model> for ModuleResponse {
    fn from(module: course_module::Model) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            title: module.title,
            content: module.content,
            module_order: module.module_order,
            video_url: module.video_url,
            resources: module.resources.0,
            created_at: module.created_at.to_rfc3339(),
            updated_at: module.updated_at.to_rfc3339(),
        }
    }
}

/// Catalog entry: a course plus its instructor's display name.
#[derive(Debug, Default, Serialize)]
pub struct CourseListItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Full course view: the course, its modules in presentation order, and the
/// ids of currently enrolled students.
#[derive(Debug, Default, Serialize)]
pub struct CourseDetailResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub modules: Vec<course_module::Model>,
    pub enrolled_student_ids: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Loads a course and enforces the write rule: admins may modify any course,
/// instructors only their own.
///
/// Returns the status and message to report when the check fails, so callers
/// can wrap them in their own response payload type.
pub async fn load_owned_course(
    db: &DatabaseConnection,
    course_id: i64,
    claims: &Claims,
) -> Result<course::Model, (StatusCode, String)> {
    let course = match course::Entity::find_by_id(course_id).one(db).await {
        Ok(Some(course)) => course,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Course not found".to_string())),
        Err(e) => {
            tracing::error!(error = %e, "failed to load course");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ));
        }
    };

    let is_admin = claims.role.parse::<Role>() == Ok(Role::Admin);
    if !is_admin && course.instructor_id != claims.sub {
        return Err((
            StatusCode::FORBIDDEN,
            "You do not have permission to modify this course".to_string(),
        ));
    }

    Ok(course)
}

/// Loads a module and confirms it belongs to the course named in the path.
/// A module reached through the wrong course id reads as absent.
pub async fn load_module_in_course(
    db: &DatabaseConnection,
    course_id: i64,
    module_id: i64,
) -> Result<course_module::Model, (StatusCode, String)> {
    match course_module::Entity::find_by_id(module_id).one(db).await {
        Ok(Some(module)) if module.course_id == course_id => Ok(module),
        Ok(_) => Err((
            StatusCode::NOT_FOUND,
            "Module not found in this course".to_string(),
        )),
        Err(e) => {
            tracing::error!(error = %e, "failed to load module");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ))
        }
    }
}
