//! # Quizzes Routes Module
//!
//! Defines and wires up routes for the `/api/quizzes` endpoint group.
//!
//! ## Structure
//! - `post.rs` — POST handlers (create quiz, submit answers)
//! - `get.rs` — GET handlers (quizzes of a course, quiz detail)
//! - `common.rs` — request/response shapes shared by the handlers

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_instructor_or_admin, allow_student};
use get::{get_quiz, list_course_quizzes};
use post::{create_quiz, submit_quiz};

/// Builds the `/quizzes` route group.
///
/// - `POST /quizzes` → create a quiz with its questions (instructor/admin)
/// - `GET /quizzes/course/{course_id}` → quizzes of one course
/// - `GET /quizzes/{quiz_id}` → quiz detail with questions
/// - `POST /quizzes/{quiz_id}/submit` → grade and record a submission (student)
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_quiz).route_layer(from_fn(allow_instructor_or_admin)),
        )
        .route(
            "/course/{course_id}",
            get(list_course_quizzes).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{quiz_id}",
            get(get_quiz).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{quiz_id}/submit",
            post(submit_quiz).route_layer(from_fn(allow_student)),
        )
}
