use sea_orm_migration::prelude::*;

use crate::{migrations, stats_migrations};

/// Migrator for the entity store.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608150001_create_users::Migration),
            Box::new(migrations::m202608150002_create_courses::Migration),
            Box::new(migrations::m202608150003_create_course_modules::Migration),
            Box::new(migrations::m202608150004_create_course_students::Migration),
            Box::new(migrations::m202608150005_create_quizzes::Migration),
            Box::new(migrations::m202608150006_create_quiz_questions::Migration),
            Box::new(migrations::m202608150007_create_enrollments::Migration),
            Box::new(migrations::m202608150008_create_progress::Migration),
            Box::new(migrations::m202608150009_create_quiz_submissions::Migration),
            Box::new(migrations::m202608150010_create_notifications::Migration),
        ]
    }
}

/// Migrator for the stats store. A separate database, so a separate schema
/// history.
pub struct StatsMigrator;

#[async_trait::async_trait]
impl MigratorTrait for StatsMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(stats_migrations::m202608160001_create_course_stats::Migration),
            Box::new(stats_migrations::m202608160002_create_quiz_stats::Migration),
            Box::new(stats_migrations::m202608160003_create_score_events::Migration),
        ]
    }
}
