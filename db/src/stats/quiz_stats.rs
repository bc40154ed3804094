use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rolling per-quiz counters, keyed by the entity-store quiz id.
///
/// `average_score` is maintained incrementally from the prior average and
/// count; `pass_rate` is a percentage recomputed from the score-event log on
/// every submission. `course_id` is carried for per-course drill-down.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quiz_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub quiz_id: i64,

    pub course_id: i64,

    pub total_submissions: i64,
    pub average_score: f64,
    pub pass_rate: f64,

    pub updated_at: DateTime<Utc>,
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
    /// Inserts the zeroed row for a freshly created quiz.
    pub async fn init<C>(db: &C, quiz_id: i64, course_id: i64) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let row = ActiveModel {
            quiz_id: Set(quiz_id),
            course_id: Set(course_id),
            total_submissions: Set(0),
            average_score: Set(0.0),
            pass_rate: Set(0.0),
            updated_at: Set(Utc::now()),
        };

        row.insert(db).await
    }

    pub async fn find_by_quiz<C>(db: &C, quiz_id: i64) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find_by_id(quiz_id).one(db).await
    }

    pub async fn find_by_course<C>(db: &C, course_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .all(db)
            .await
    }

    pub async fn delete<C>(db: &C, quiz_id: i64) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::delete_by_id(quiz_id).exec(db).await?;
        Ok(())
    }

    pub async fn delete_by_course<C>(db: &C, course_id: i64) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
