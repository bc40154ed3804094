use crate::seed::Seeder;
use db::models::{enrollment, quiz, quiz_question};
use sea_orm::{DatabaseConnection, EntityTrait};
use services::quiz::submit_quiz;

pub struct SubmissionSeeder;

#[async_trait::async_trait]
impl Seeder for SubmissionSeeder {
    async fn seed(&self, db: &DatabaseConnection, stats_db: &DatabaseConnection) {
        let enrollments = enrollment::Entity::find()
            .all(db)
            .await
            .expect("Failed to fetch enrollments");

        for e in &enrollments {
            let quizzes = quiz::Model::find_by_course(db, e.course_id)
                .await
                .expect("Failed to fetch quizzes");

            for q in &quizzes {
                // Roughly half the enrolled students attempt each quiz.
                if fastrand::bool() {
                    continue;
                }

                let questions = quiz_question::Model::find_by_quiz(db, q.id)
                    .await
                    .expect("Failed to fetch questions");
                let answers = questions.iter().map(|_| fastrand::i32(0..4)).collect();

                let _ = submit_quiz(db, stats_db, q.id, e.student_id, answers).await;
            }
        }
    }
}
