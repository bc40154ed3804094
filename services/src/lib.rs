//! Core domain services: enrollment, progress tracking, quiz scoring, and
//! dashboard aggregation, plus the stats primitives they share.
//!
//! Every service reads and writes the entity store first, then performs a
//! read-modify-write against the stats store. The two stores are separate
//! databases; a stats failure after a successful entity write is surfaced to
//! the caller but the entity write stands (see [`stats`] for the rebuild
//! operations that heal drift).
//!
//! Authorization is the HTTP layer's job. These services trust the caller's
//! identity and verify only existence and state invariants.

pub mod dashboard;
pub mod enrollment;
pub mod error;
pub mod notification;
pub mod progress;
pub mod quiz;
pub mod stats;

pub use error::ServiceError;
