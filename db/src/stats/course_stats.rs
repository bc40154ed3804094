use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rolling per-course counters, keyed by the entity-store course id.
///
/// `total_enrollments` is incremented on enroll; `total_completions` and
/// `average_progress` are recomputed by a full rescan of the course's
/// progress records. All mutation happens inside a stats-store transaction
/// scoped to one row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "course_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    pub total_enrollments: i64,
    pub total_completions: i64,
    pub average_progress: f64,

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
    /// Inserts the zeroed row for a freshly created course.
    pub async fn init<C>(db: &C, course_id: i64) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let row = ActiveModel {
            course_id: Set(course_id),
            total_enrollments: Set(0),
            total_completions: Set(0),
            average_progress: Set(0.0),
            updated_at: Set(Utc::now()),
        };

        row.insert(db).await
    }

    pub async fn find_by_course<C>(db: &C, course_id: i64) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find_by_id(course_id).one(db).await
    }

    /// Batched fetch for a set of course ids, one `WHERE course_id IN (...)`.
    pub async fn find_by_courses<C>(db: &C, course_ids: &[i64]) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        Entity::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .all(db)
            .await
    }

    pub async fn delete<C>(db: &C, course_id: i64) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::delete_by_id(course_id).exec(db).await?;
        Ok(())
    }
}
