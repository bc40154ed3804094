use serde::Serialize;

use db::models::progress;

/// A student's progress in one course. For students who have never touched
/// the course there is no stored row; the API then reports a zeroed view
/// with `last_accessed` absent.
#[derive(Debug, Default, Serialize)]
pub struct ProgressResponse {
    pub student_id: i64,
    pub course_id: i64,
    pub completed_modules: Vec<i64>,
    pub progress_percentage: f64,
    pub last_accessed: Option<String>,
}

impl ProgressResponse {
    pub fn empty(student_id: i64, course_id: i64) -> Self {
        Self {
            student_id,
            course_id,
            completed_modules: Vec::new(),
            progress_percentage: 0.0,
            last_accessed: None,
        }
    }
}

impl From<progress::Model> for ProgressResponse {
    fn from(progress: progress::Model) -> Self {
        Self {
            student_id: progress.student_id,
            course_id: progress.course_id,
            completed_modules: progress.completed_modules.0,
            progress_percentage: progress.progress_percentage,
            last_accessed: Some(progress.last_accessed.to_rfc3339()),
        }
    }
}
