//! # Progress Routes Module
//!
//! Defines and wires up routes for the `/api/progress` endpoint group.
//!
//! ## Structure
//! - `get.rs` — GET handlers (a student's progress in one course)
//! - `put.rs` — PUT handlers (replace the completed-module set)
//! - `post.rs` — POST handlers (mark a single module complete)
//! - `common.rs` — the progress view shared by the handlers

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_student};
use get::get_course_progress;
use post::complete_module;
use put::set_progress;

/// Builds the `/progress` route group.
///
/// - `GET /progress/course/{course_id}` → the caller's progress in a course
/// - `PUT /progress` → replace the completed set (student)
/// - `POST /progress/complete` → mark one module complete (student)
pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/course/{course_id}",
            get(get_course_progress).route_layer(from_fn(allow_authenticated)),
        )
        .route("/", put(set_progress).route_layer(from_fn(allow_student)))
        .route(
            "/complete",
            post(complete_module).route_layer(from_fn(allow_student)),
        )
}
