use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use serde::{Deserialize, Serialize};

/// A course's enrolled-student set, one row per member.
///
/// The composite primary key gives membership set semantics; inserts go
/// through [`Model::add_if_absent`] so concurrent enrollments never produce
/// duplicate members.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "course_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    pub added_at: DateTime<Utc>,
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

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Adds a student to the course's member set, `ON CONFLICT DO NOTHING`.
    ///
    /// Idempotent: inserting an existing member is a no-op, not an error.
    pub async fn add_if_absent(
        db: &DbConn,
        course_id: i64,
        student_id: i64,
    ) -> Result<(), DbErr> {
        let row = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            added_at: Set(Utc::now()),
        };

        let insert = Entity::insert(row).on_conflict(
            OnConflict::columns([Column::CourseId, Column::StudentId])
                .do_nothing()
                .to_owned(),
        );

        match insert.exec(db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Student ids currently in the course's member set.
    pub async fn student_ids(db: &DbConn, course_id: i64) -> Result<Vec<i64>, DbErr> {
        use sea_orm::QuerySelect;

        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .select_only()
            .column(Column::StudentId)
            .into_tuple()
            .all(db)
            .await
    }
}
