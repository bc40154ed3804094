use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A graded quiz submission, write-once per `(quiz_id, student_id)`.
///
/// The unique composite index enforces the write-once rule; there is no
/// update path and no re-grading.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quiz_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub quiz_id: i64,
    pub student_id: i64,

    /// Selected option index per question, aligned by question position.
    pub answers: AnswerList,

    /// Percentage of weighted points earned, in [0, 100].
    pub score: f64,

    pub submitted_at: DateTime<Utc>,
}

/// JSON-backed ordered list of selected option indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AnswerList(pub Vec<i32>);

impl AnswerList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id",
        on_delete = "Cascade"
    )]
    Quiz,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts the submission. A duplicate `(quiz, student)` pair surfaces as
    /// a unique violation `DbErr` for the caller to map.
    pub async fn create(
        db: &DbConn,
        quiz_id: i64,
        student_id: i64,
        answers: Vec<i32>,
        score: f64,
    ) -> Result<Model, DbErr> {
        let submission = ActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            answers: Set(AnswerList(answers)),
            score: Set(score),
            submitted_at: Set(Utc::now()),
            ..Default::default()
        };

        submission.insert(db).await
    }

    /// All submissions for a quiz, the input to a stats rebuild.
    pub async fn find_by_quiz(db: &DbConn, quiz_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::QuizId.eq(quiz_id))
            .all(db)
            .await
    }
}
