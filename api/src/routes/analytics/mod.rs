//! # Analytics Routes Module
//!
//! Defines and wires up routes for the `/api/analytics` endpoint group.
//! The whole group requires the instructor or admin role; the guard is
//! applied where the group is mounted.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::{course_analytics, dashboard};

/// Builds the `/analytics` route group.
///
/// - `GET /analytics/course/{course_id}` → one course's aggregate rows
/// - `GET /analytics/dashboard` → summary across the caller's courses
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/course/{course_id}", get(course_analytics))
        .route("/dashboard", get(dashboard))
}
