//! # Enrollments Routes Module
//!
//! Defines and wires up routes for the `/api/enrollments` endpoint group.
//! The whole group is student-only; the guard is applied where the group is
//! mounted.
//!
//! ## Structure
//! - `post.rs` — POST handlers (enroll in a course)
//! - `get.rs` — GET handlers (the caller's enrolled courses with progress)

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use get::my_courses;
use post::enroll;

/// Builds the `/enrollments` route group.
///
/// - `POST /enrollments` → enroll the calling student in a course
/// - `GET /enrollments/my-courses` → list the caller's courses with progress
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll))
        .route("/my-courses", get(my_courses))
}
