//! # Admin Routes Module
//!
//! Defines and wires up routes for the `/api/admin` endpoint group. These
//! are the repair tools for the derived stats store; the admin guard is
//! applied where the group is mounted.

pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

use post::{rebuild_course_stats, rebuild_quiz_stats};

/// Builds the `/admin` route group.
///
/// - `POST /admin/stats/courses/{course_id}/rebuild` → recompute one course's aggregates
/// - `POST /admin/stats/quizzes/{quiz_id}/rebuild` → recompute one quiz's aggregates
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stats/courses/{course_id}/rebuild",
            post(rebuild_course_stats),
        )
        .route("/stats/quizzes/{quiz_id}/rebuild", post(rebuild_quiz_stats))
}
