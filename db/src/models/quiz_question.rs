use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, QueryOrder};
use serde::{Deserialize, Serialize};

/// One question of a quiz.
///
/// `position` is 0-based and contiguous within a quiz; answer vectors align
/// to it positionally. `correct_index` points into `options`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub quiz_id: i64,

    pub position: i32,
    pub text: String,
    pub options: OptionList,
    pub correct_index: i32,
    pub points: i32,
}

/// JSON-backed list of answer option strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OptionList(pub Vec<String>);

impl OptionList {
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
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        quiz_id: i64,
        position: i32,
        text: &str,
        options: Vec<String>,
        correct_index: i32,
        points: i32,
    ) -> Result<Model, DbErr> {
        let question = ActiveModel {
            quiz_id: Set(quiz_id),
            position: Set(position),
            text: Set(text.to_owned()),
            options: Set(OptionList(options)),
            correct_index: Set(correct_index),
            points: Set(points),
            ..Default::default()
        };

        question.insert(db).await
    }

    /// Questions of a quiz in answer-vector order.
    pub async fn find_by_quiz(db: &DbConn, quiz_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::QuizId.eq(quiz_id))
            .order_by_asc(Column::Position)
            .all(db)
            .await
    }
}
