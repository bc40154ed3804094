//! HTTP layer for the learning platform.
//!
//! Route handlers stay thin: they validate and shape requests, call into
//! `services` for anything that touches both stores, and wrap results in
//! [`response::ApiResponse`].

pub mod auth;
pub mod response;
pub mod routes;
