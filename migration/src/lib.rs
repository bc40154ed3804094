pub mod migrations;
pub mod migrator;
pub mod stats_migrations;

pub use migrator::{Migrator, StatsMigrator};
