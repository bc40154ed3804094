use serde::{Deserialize, Serialize};
use validator::Validate;

use db::models::{quiz, quiz_question};
use services::quiz::{GradedSubmission, NewQuestion};

#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    pub course_id: i64,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub time_limit_minutes: Option<i32>,
    /// Percentage threshold; defaults to the platform-wide passing score.
    pub passing_score: Option<f64>,
    pub questions: Vec<QuestionRequest>,
}

/// One question as submitted by an instructor. Structural rules (at least
/// two options, a correct index in range, positive points) are enforced by
/// the quiz service.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub points: Option<i32>,
}

impl From<QuestionRequest> for NewQuestion {
    fn from(req: QuestionRequest) -> Self {
        NewQuestion {
            text: req.text,
            options: req.options,
            correct_index: req.correct_index,
            points: req.points.unwrap_or(1),
        }
    }
}

/// Quiz with its questions, as returned to instructors and students alike.
#[derive(Debug, Default, Serialize)]
pub struct QuizDetailResponse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub time_limit_minutes: Option<i32>,
    pub passing_score: f64,
    pub created_at: String,
    pub questions: Vec<quiz_question::Model>,
}

impl QuizDetailResponse {
    pub fn new(quiz: quiz::Model, questions: Vec<quiz_question::Model>) -> Self {
        Self {
            id: quiz.id,
            course_id: quiz.course_id,
            title: quiz.title,
            time_limit_minutes: quiz.time_limit_minutes,
            passing_score: quiz.passing_score,
            created_at: quiz.created_at.to_rfc3339(),
            questions,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub answers: Vec<i32>,
    pub score: f64,
    pub passed: bool,
    pub submitted_at: String,
}

impl From<GradedSubmission> for SubmissionResponse {
    fn from(graded: GradedSubmission) -> Self {
        Self {
            id: graded.submission.id,
            quiz_id: graded.submission.quiz_id,
            student_id: graded.submission.student_id,
            answers: graded.submission.answers.0.clone(),
            score: graded.score,
            passed: graded.passed,
            submitted_at: graded.submission.submitted_at.to_rfc3339(),
        }
    }
}
