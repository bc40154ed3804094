use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only log of graded submissions, one row per score.
///
/// Pass-rate counting scans this log rather than the entity store, keeping
/// the whole quiz-aggregate update inside one stats-store transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "score_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub student_id: i64,
    pub course_id: i64,
    pub quiz_id: i64,

    pub score: f64,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn append<C>(
        db: &C,
        student_id: i64,
        course_id: i64,
        quiz_id: i64,
        score: f64,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let event = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            quiz_id: Set(quiz_id),
            score: Set(score),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        event.insert(db).await
    }

    /// Number of events for a quiz meeting or exceeding the passing threshold.
    pub async fn count_passing<C>(db: &C, quiz_id: i64, threshold: f64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::QuizId.eq(quiz_id))
            .filter(Column::Score.gte(threshold))
            .count(db)
            .await
    }

    pub async fn delete_by_quiz<C>(db: &C, quiz_id: i64) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::delete_many()
            .filter(Column::QuizId.eq(quiz_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
