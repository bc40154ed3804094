use axum::{Extension, Json, extract::State, http::StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::course::{self, Column as CourseColumn, Entity as CourseEntity};
use db::models::enrollment::Model as EnrollmentModel;
use db::models::progress::{self, Column as ProgressColumn, Entity as ProgressEntity};

/// One entry in the student's course list: the course summary joined with
/// the student's own progress.
#[derive(Debug, Default, Serialize)]
pub struct EnrolledCourse {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: i64,
    pub enrolled_at: String,
    pub completed_modules: Vec<i64>,
    pub progress_percentage: f64,
}

/// GET /api/enrollments/my-courses
///
/// Lists the calling student's enrollments, most recent first. Courses
/// deleted since enrollment are skipped rather than reported as errors.
pub async fn my_courses(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<EnrolledCourse>>>) {
    let db = app_state.db();

    let enrollments = match EnrollmentModel::find_by_student(db, claims.sub).await {
        Ok(enrollments) => enrollments,
        Err(e) => {
            tracing::error!(error = %e, "failed to load enrollments");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    if enrollments.is_empty() {
        return (
            StatusCode::OK,
            Json(ApiResponse::success(
                Vec::new(),
                "Enrolled courses retrieved successfully",
            )),
        );
    }

    let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();

    let courses: HashMap<i64, course::Model> = match CourseEntity::find()
        .filter(CourseColumn::Id.is_in(course_ids.clone()))
        .all(db)
        .await
    {
        Ok(courses) => courses.into_iter().map(|c| (c.id, c)).collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load courses");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let progress_rows: HashMap<i64, progress::Model> = match ProgressEntity::find()
        .filter(ProgressColumn::StudentId.eq(claims.sub))
        .filter(ProgressColumn::CourseId.is_in(course_ids))
        .all(db)
        .await
    {
        Ok(rows) => rows.into_iter().map(|p| (p.course_id, p)).collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load progress");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let items: Vec<EnrolledCourse> = enrollments
        .into_iter()
        .filter_map(|enrollment| {
            let course = courses.get(&enrollment.course_id)?;
            let progress = progress_rows.get(&enrollment.course_id);
            Some(EnrolledCourse {
                course_id: course.id,
                title: course.title.clone(),
                description: course.description.clone(),
                instructor_id: course.instructor_id,
                enrolled_at: enrollment.enrolled_at.to_rfc3339(),
                completed_modules: progress
                    .map(|p| p.completed_modules.0.clone())
                    .unwrap_or_default(),
                progress_percentage: progress.map(|p| p.progress_percentage).unwrap_or(0.0),
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            items,
            "Enrolled courses retrieved successfully",
        )),
    )
}
