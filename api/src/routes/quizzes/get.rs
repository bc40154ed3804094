use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::quizzes::common::QuizDetailResponse;
use db::models::course::Entity as CourseEntity;
use db::models::quiz::{self, Model as QuizModel};
use db::models::quiz_question::Model as QuestionModel;

/// GET /api/quizzes/course/{course_id}
///
/// Lists the quizzes of one course, newest first.
pub async fn list_course_quizzes(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<quiz::Model>>>) {
    let db = app_state.db();

    match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(_)) => {}
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
    }

    match QuizModel::find_by_course(db, course_id).await {
        Ok(quizzes) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                quizzes,
                "Quizzes retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to list quizzes");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}

/// GET /api/quizzes/{quiz_id}
///
/// Returns one quiz with its questions in position order. The full question
/// records are returned, including the correct option index and weights, so
/// clients can render reviews after submission.
pub async fn get_quiz(
    State(app_state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<QuizDetailResponse>>) {
    let db = app_state.db();

    let quiz = match quiz::Entity::find_by_id(quiz_id).one(db).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Quiz not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load quiz");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    match QuestionModel::find_by_quiz(db, quiz_id).await {
        Ok(questions) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                QuizDetailResponse::new(quiz, questions),
                "Quiz retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to load questions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
