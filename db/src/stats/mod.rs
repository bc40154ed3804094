//! Entities of the stats store, a separate database from the entity store.
//!
//! Everything here is derived state: rolling counters per course and per
//! quiz, plus the flat score-event log that pass-rate counting scans. Rows
//! may drift from the entity store after a partial failure; the rebuild
//! operations recompute them from an entity scan.

pub mod course_stats;
pub mod quiz_stats;
pub mod score_event;
