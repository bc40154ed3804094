//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (authentication, courses, enrollments,
//! quizzes, progress, analytics, admin), each protected via appropriate
//! access control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration, login and current-user info
//! - `/courses` → Course catalog and module management
//! - `/enrollments` → Student enrollment (student-only)
//! - `/quizzes` → Quiz catalog and submissions
//! - `/progress` → Module completion tracking
//! - `/analytics` → Aggregate dashboards (instructor/admin)
//! - `/admin` → Stats store rebuild operations (admin-only)

use crate::auth::guards::{allow_admin, allow_instructor_or_admin, allow_student};
use crate::response::ApiResponse;
use crate::routes::{
    admin::admin_routes, analytics::analytics_routes, auth::auth_routes, courses::course_routes,
    enrollments::enrollment_routes, health::health_routes, progress::progress_routes,
    quizzes::quiz_routes,
};
use axum::http::StatusCode;
use axum::{Json, Router, middleware::from_fn};
use util::state::AppState;

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod progress;
pub mod quizzes;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router owns its state and mounts all core API routes under
/// their respective base paths.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/auth` → Register, login and `GET /auth/me`.
/// - `/courses` → Course and module CRUD; reads for any authenticated user,
///   writes for instructors and admins.
/// - `/enrollments` → Enrollment and `my-courses` (students only).
/// - `/quizzes` → Quiz reads, creation and submissions.
/// - `/progress` → Per-student progress reads and writes.
/// - `/analytics` → Course analytics and the instructor dashboard.
/// - `/admin` → Rebuild endpoints for the derived stats store.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/courses", course_routes())
        .nest(
            "/enrollments",
            enrollment_routes().route_layer(from_fn(allow_student)),
        )
        .nest("/quizzes", quiz_routes())
        .nest("/progress", progress_routes())
        .nest(
            "/analytics",
            analytics_routes().route_layer(from_fn(allow_instructor_or_admin)),
        )
        .nest("/admin", admin_routes().route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}

/// Envelope-shaped 404 for paths no route matches.
pub async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}
