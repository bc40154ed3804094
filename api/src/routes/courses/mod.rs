//! # Courses Routes Module
//!
//! Defines and wires up routes for the `/api/courses` endpoint group.
//!
//! ## Structure
//! - `post.rs` — POST handlers (create course)
//! - `get.rs` — GET handlers (catalog listing, course detail)
//! - `put.rs` — PUT handlers (edit course)
//! - `delete.rs` — DELETE handlers (delete course)
//! - `modules/` — nested module management under `/courses/{course_id}/modules`
//!
//! Reads require authentication; writes require the instructor or admin
//! role, and ownership is checked per course inside the handlers.

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_instructor_or_admin};
use delete::delete_course;
use get::{get_course, list_courses};
use modules::module_routes;
use post::create_course;
use put::edit_course;

pub mod common;
pub mod delete;
pub mod get;
pub mod modules;
pub mod post;
pub mod put;

/// Builds and returns the `/courses` route group.
///
/// Routes:
/// - `GET    /courses`              → list the catalog (any authenticated user)
/// - `POST   /courses`              → create a course (instructor/admin)
/// - `GET    /courses/{course_id}`  → course detail with modules and roster
/// - `PUT    /courses/{course_id}`  → edit title/description (owner or admin)
/// - `DELETE /courses/{course_id}`  → delete the course (owner or admin)
///
/// Nested module routes live under `/courses/{course_id}/modules`.
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_courses).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/",
            post(create_course).route_layer(from_fn(allow_instructor_or_admin)),
        )
        .route(
            "/{course_id}",
            get(get_course).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{course_id}",
            put(edit_course).route_layer(from_fn(allow_instructor_or_admin)),
        )
        .route(
            "/{course_id}",
            delete(delete_course).route_layer(from_fn(allow_instructor_or_admin)),
        )
        .nest(
            "/{course_id}/modules",
            module_routes().route_layer(from_fn(allow_instructor_or_admin)),
        )
}
