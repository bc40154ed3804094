use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::courses::common::{CourseDetailResponse, CourseListItem};
use db::models::course::{Column as CourseColumn, Entity as CourseEntity};
use db::models::course_module::Model as ModuleModel;
use db::models::course_student::Model as CourseStudentModel;
use db::models::user::{Column as UserColumn, Entity as UserEntity};

/// GET /api/courses
///
/// Lists the course catalog, newest first, with instructor names resolved in
/// one batched lookup.
pub async fn list_courses(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<CourseListItem>>>) {
    let db = app_state.db();

    let courses = match CourseEntity::find()
        .order_by_desc(CourseColumn::CreatedAt)
        .all(db)
        .await
    {
        Ok(courses) => courses,
        Err(e) => {
            tracing::error!(error = %e, "failed to list courses");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let mut instructor_ids: Vec<i64> = courses.iter().map(|c| c.instructor_id).collect();
    instructor_ids.sort_unstable();
    instructor_ids.dedup();

    let instructor_names: HashMap<i64, String> = if instructor_ids.is_empty() {
        HashMap::new()
    } else {
        match UserEntity::find()
            .filter(UserColumn::Id.is_in(instructor_ids))
            .all(db)
            .await
        {
            Ok(users) => users.into_iter().map(|u| (u.id, u.name)).collect(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load instructors");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(format!("Database error: {}", e))),
                );
            }
        }
    };

    let items: Vec<CourseListItem> = courses
        .into_iter()
        .map(|course| CourseListItem {
            id: course.id,
            title: course.title,
            description: course.description,
            instructor_id: course.instructor_id,
            instructor_name: instructor_names
                .get(&course.instructor_id)
                .cloned()
                .unwrap_or_default(),
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(items, "Courses retrieved successfully")),
    )
}

/// GET /api/courses/{course_id}
///
/// Returns one course with its modules in presentation order and the ids of
/// enrolled students.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "title": "Intro to Rust",
///     "description": "Ownership without tears",
///     "instructor_id": 2,
///     "instructor_name": "Sam Naidoo",
///     "modules": [{ "id": 1, "title": "Getting started", "module_order": 1 }],
///     "enrolled_student_ids": [7, 9],
///     "created_at": "2025-05-23T18:00:00+00:00",
///     "updated_at": "2025-05-23T18:00:00+00:00"
///   },
///   "message": "Course retrieved successfully"
/// }
/// ```
///
/// - `404 Not Found` if the course does not exist
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CourseDetailResponse>>) {
    let db = app_state.db();

    let course = match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(course)) => course,
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
    };

    let modules = match ModuleModel::find_by_course(db, course_id).await {
        Ok(modules) => modules,
        Err(e) => {
            tracing::error!(error = %e, "failed to load modules");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let enrolled_student_ids = match CourseStudentModel::student_ids(db, course_id).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "failed to load roster");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let instructor_name = match UserEntity::find_by_id(course.instructor_id).one(db).await {
        Ok(user) => user.map(|u| u.name).unwrap_or_default(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load instructor");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let detail = CourseDetailResponse {
        id: course.id,
        title: course.title,
        description: course.description,
        instructor_id: course.instructor_id,
        instructor_name,
        modules,
        enrolled_student_ids,
        created_at: course.created_at.to_rfc3339(),
        updated_at: course.updated_at.to_rfc3339(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(detail, "Course retrieved successfully")),
    )
}
