use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::service_error;
use services::dashboard::{CourseAnalytics, DashboardSummary};

/// GET /api/analytics/course/{course_id}
///
/// Returns the aggregate rows for one course: the course-level counters and
/// the per-quiz aggregates. `stats` is `null` when the derived row has not
/// been built yet; only a missing course is an error. The numbers are served
/// from the stats store as-is and may briefly trail the entity store.
pub async fn course_analytics(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CourseAnalytics>>) {
    match services::dashboard::course_analytics(app_state.db(), app_state.stats_db(), course_id)
        .await
    {
        Ok(analytics) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                analytics,
                "Course analytics retrieved successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}

/// GET /api/analytics/dashboard
///
/// Returns the caller's teaching dashboard: totals across their courses and
/// the per-course aggregate rows.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total_courses": 2,
///     "total_enrollments": 40,
///     "total_completions": 11,
///     "average_progress": 52.5,
///     "course_stats": [
///       {
///         "course_id": 1,
///         "total_enrollments": 25,
///         "total_completions": 8,
///         "average_progress": 61.0,
///         "updated_at": "2025-05-23T18:00:00Z"
///       }
///     ]
///   },
///   "message": "Dashboard retrieved successfully"
/// }
/// ```
pub async fn dashboard(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<DashboardSummary>>) {
    match services::dashboard::instructor_dashboard(app_state.db(), app_state.stats_db(), claims.sub)
        .await
    {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                summary,
                "Dashboard retrieved successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}
