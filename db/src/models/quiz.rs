use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// A quiz attached to one course. Questions live in `quiz_questions`,
/// ordered by their `position` column.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,

    pub title: String,

    /// Optional time limit in minutes. Informational; not enforced server-side.
    pub time_limit_minutes: Option<i32>,

    /// Passing threshold as a percentage; submissions scoring at or above it pass.
    pub passing_score: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(has_many = "super::quiz_question::Entity")]
    QuizQuestion,

    #[sea_orm(has_many = "super::quiz_submission::Entity")]
    QuizSubmission,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::quiz_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizQuestion.def()
    }
}

impl Related<super::quiz_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizSubmission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        title: &str,
        time_limit_minutes: Option<i32>,
        passing_score: f64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let quiz = ActiveModel {
            course_id: Set(course_id),
            title: Set(title.to_owned()),
            time_limit_minutes: Set(time_limit_minutes),
            passing_score: Set(passing_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        quiz.insert(db).await
    }

    /// Quizzes of a course, newest first.
    pub async fn find_by_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }
}
