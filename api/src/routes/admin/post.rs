use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::service_error;
use db::stats::{course_stats, quiz_stats};

#[derive(Debug, Default, Serialize)]
pub struct CourseStatsResponse {
    pub course_id: i64,
    pub total_enrollments: i64,
    pub total_completions: i64,
    pub average_progress: f64,
    pub updated_at: String,
}

impl From<course_stats::Model> for CourseStatsResponse {
    fn from(row: course_stats::Model) -> Self {
        Self {
            course_id: row.course_id,
            total_enrollments: row.total_enrollments,
            total_completions: row.total_completions,
            average_progress: row.average_progress,
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct QuizStatsResponse {
    pub quiz_id: i64,
    pub course_id: i64,
    pub total_submissions: i64,
    pub average_score: f64,
    pub pass_rate: f64,
    pub updated_at: String,
}

impl From<quiz_stats::Model> for QuizStatsResponse {
    fn from(row: quiz_stats::Model) -> Self {
        Self {
            quiz_id: row.quiz_id,
            course_id: row.course_id,
            total_submissions: row.total_submissions,
            average_score: row.average_score,
            pass_rate: row.pass_rate,
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}

/// POST /api/admin/stats/courses/{course_id}/rebuild
///
/// Recomputes a course's aggregate row from the entity store, replacing
/// whatever the stats store currently holds. This is the recovery path when
/// the two stores drift (crash between writes, manual edits, restored
/// backups).
pub async fn rebuild_course_stats(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CourseStatsResponse>>) {
    match services::stats::rebuild_course_stats(app_state.db(), app_state.stats_db(), course_id)
        .await
    {
        Ok(row) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CourseStatsResponse::from(row),
                "Course stats rebuilt successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}

/// POST /api/admin/stats/quizzes/{quiz_id}/rebuild
///
/// Recomputes a quiz's aggregate row and replays its score events from the
/// recorded submissions.
pub async fn rebuild_quiz_stats(
    State(app_state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<QuizStatsResponse>>) {
    match services::stats::rebuild_quiz_stats(app_state.db(), app_state.stats_db(), quiz_id).await {
        Ok(row) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                QuizStatsResponse::from(row),
                "Quiz stats rebuilt successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}
