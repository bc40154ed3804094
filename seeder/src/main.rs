use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    course::CourseSeeder, enrollment::EnrollmentSeeder, quiz::QuizSeeder,
    submission::SubmissionSeeder, user::UserSeeder,
};
use migration::{Migrator, StatsMigrator};
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = db::connect().await;
    let stats_db = db::connect_stats().await;

    Migrator::up(&db, None)
        .await
        .expect("Failed to migrate database");
    StatsMigrator::up(&stats_db, None)
        .await
        .expect("Failed to migrate stats database");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(CourseSeeder), "Course"),
        (Box::new(QuizSeeder), "Quiz"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
        (Box::new(SubmissionSeeder), "Submission"),
    ] {
        run_seeder(&*seeder, name, &db, &stats_db).await;
    }
}
