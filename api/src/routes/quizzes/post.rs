//! Quiz creation and submission routes.
//!
//! Creating a quiz persists its questions and seeds a zeroed aggregate row
//! in the stats store. Submitting grades server-side, records the write-once
//! submission, and folds the score into the quiz's aggregates.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use util::state::AppState;
use util::validation::format_validation_errors;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::service_error;
use crate::routes::courses::common::load_owned_course;
use crate::routes::quizzes::common::{QuizDetailResponse, QuizRequest, SubmissionResponse};
use services::quiz::NewQuestion;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<i32>,
}

/// POST /api/quizzes
///
/// Create a quiz with its questions in one request. The caller must own the
/// target course (admins may target any course).
///
/// ### Request Body
/// ```json
/// {
///   "course_id": 1,
///   "title": "Ownership basics",
///   "time_limit_minutes": 20,
///   "passing_score": 60.0,
///   "questions": [
///     {
///       "text": "Who owns a moved value?",
///       "options": ["The caller", "The new binding"],
///       "correct_index": 1,
///       "points": 2
///     }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the quiz and its questions
/// - `403 Forbidden` when the caller does not own the course
/// - `404 Not Found` when the course does not exist
/// - `422 Unprocessable Entity` when a question is malformed
pub async fn create_quiz(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<QuizRequest>,
) -> (StatusCode, Json<ApiResponse<QuizDetailResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    if let Err((status, msg)) = load_owned_course(app_state.db(), req.course_id, &claims).await {
        return (status, Json(ApiResponse::error(msg)));
    }

    let questions: Vec<NewQuestion> = req.questions.into_iter().map(Into::into).collect();

    match services::quiz::create_quiz(
        app_state.db(),
        app_state.stats_db(),
        req.course_id,
        &req.title,
        req.time_limit_minutes,
        req.passing_score,
        questions,
    )
    .await
    {
        Ok((quiz, questions)) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                QuizDetailResponse::new(quiz, questions),
                "Quiz created successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}

/// POST /api/quizzes/{quiz_id}/submit
///
/// Grades the calling student's answers and records the submission. Each
/// student gets exactly one attempt per quiz.
///
/// ### Request Body
/// ```json
/// { "answers": [1, 0, 2] }
/// ```
///
/// ### Responses
/// - `201 Created` with the graded submission, score and pass flag
/// - `404 Not Found` when the quiz does not exist
/// - `409 Conflict` on a second attempt
/// - `422 Unprocessable Entity` when the answer count does not match the
///   question count
pub async fn submit_quiz(
    State(app_state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SubmitRequest>,
) -> (StatusCode, Json<ApiResponse<SubmissionResponse>>) {
    match services::quiz::submit_quiz(
        app_state.db(),
        app_state.stats_db(),
        quiz_id,
        claims.sub,
        req.answers,
    )
    .await
    {
        Ok(graded) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SubmissionResponse::from(graded),
                "Quiz submitted successfully",
            )),
        ),
        Err(err) => service_error(err),
    }
}
