//! Module management nested under `/api/courses/{course_id}/modules`.
//!
//! All three routes require the instructor or admin role (enforced where the
//! group is mounted) plus ownership of the parent course (checked in each
//! handler).

pub mod delete;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{delete, post, put},
};
use util::state::AppState;

use delete::delete_module;
use post::create_module;
use put::edit_module;

/// Builds the nested module route group.
///
/// - `POST   /` → add a module to the course
/// - `PUT    /{module_id}` → edit a module
/// - `DELETE /{module_id}` → remove a module
pub fn module_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_module))
        .route("/{module_id}", put(edit_module))
        .route("/{module_id}", delete(delete_module))
}
