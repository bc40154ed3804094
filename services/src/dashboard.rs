use db::models::course;
use db::stats::{course_stats, quiz_stats};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use crate::error::ServiceError;
use crate::stats;

/// Aggregated view over all courses an instructor teaches.
///
/// Sums come from the per-course aggregate rows; `average_progress` is the
/// mean of the per-course averages that have a row, so a course whose
/// aggregates were never initialized does not drag the mean down.
#[derive(Debug, Default, Serialize)]
pub struct DashboardSummary {
    pub total_courses: usize,
    pub total_enrollments: i64,
    pub total_completions: i64,
    pub average_progress: f64,
    pub course_stats: Vec<course_stats::Model>,
}

/// Per-course analytics: the course's aggregate row (if one exists) plus the
/// aggregate rows of every quiz in the course.
#[derive(Debug, Default, Serialize)]
pub struct CourseAnalytics {
    pub stats: Option<course_stats::Model>,
    pub quizzes: Vec<quiz_stats::Model>,
}

/// Builds the instructor's dashboard summary.
///
/// Course ownership is resolved against the entity store; everything else is
/// read from the stats store in one batched query. An instructor with no
/// courses gets a zeroed summary without touching the stats store.
pub async fn instructor_dashboard(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    instructor_id: i64,
) -> Result<DashboardSummary, ServiceError> {
    let courses = course::Model::find_by_instructor(db, instructor_id).await?;
    if courses.is_empty() {
        return Ok(DashboardSummary {
            total_courses: 0,
            total_enrollments: 0,
            total_completions: 0,
            average_progress: 0.0,
            course_stats: Vec::new(),
        });
    }

    let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
    let rows = course_stats::Model::find_by_courses(stats_db, &course_ids).await?;

    let total_enrollments = rows.iter().map(|r| r.total_enrollments).sum();
    let total_completions = rows.iter().map(|r| r.total_completions).sum();
    let averages: Vec<f64> = rows.iter().map(|r| r.average_progress).collect();

    Ok(DashboardSummary {
        total_courses: courses.len(),
        total_enrollments,
        total_completions,
        average_progress: stats::mean(&averages),
        course_stats: rows,
    })
}

/// Fetches the analytics bundle for one course.
///
/// The course must exist in the entity store; its aggregate row is optional
/// since stats rows are derived and may lag or be missing entirely.
pub async fn course_analytics(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    course_id: i64,
) -> Result<CourseAnalytics, ServiceError> {
    if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("Course not found"));
    }

    let stats = course_stats::Model::find_by_course(stats_db, course_id).await?;
    let quizzes = quiz_stats::Model::find_by_course(stats_db, course_id).await?;

    Ok(CourseAnalytics { stats, quizzes })
}
