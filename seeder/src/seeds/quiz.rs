use crate::seed::Seeder;
use db::models::course;
use sea_orm::{DatabaseConnection, EntityTrait};
use services::quiz::{NewQuestion, create_quiz};

pub struct QuizSeeder;

#[async_trait::async_trait]
impl Seeder for QuizSeeder {
    async fn seed(&self, db: &DatabaseConnection, stats_db: &DatabaseConnection) {
        let courses = course::Entity::find()
            .all(db)
            .await
            .expect("Failed to fetch courses");

        for c in &courses {
            for week in 1..=2 {
                let questions = (1..=4)
                    .map(|n| NewQuestion {
                        text: format!("Question {n} of the week {week} checkpoint"),
                        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                        correct_index: fastrand::i32(0..4),
                        points: 1 + fastrand::i32(0..3),
                    })
                    .collect();

                let _ = create_quiz(
                    db,
                    stats_db,
                    c.id,
                    &format!("Week {week} Checkpoint"),
                    Some(15),
                    None,
                    questions,
                )
                .await;
            }
        }
    }
}
