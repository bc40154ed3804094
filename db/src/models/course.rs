use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Represents a course in the `courses` table.
///
/// Modules live in `course_modules` (ordered by their `module_order` column)
/// and the enrolled-student set lives in `course_students`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub description: String,

    /// Owning instructor (foreign key to `users`).
    pub instructor_id: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InstructorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Instructor,

    #[sea_orm(has_many = "super::course_module::Entity")]
    CourseModule,

    #[sea_orm(has_many = "super::course_student::Entity")]
    CourseStudent,

    #[sea_orm(has_many = "super::quiz::Entity")]
    Quiz,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,

    #[sea_orm(has_many = "super::progress::Entity")]
    Progress,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseModule.def()
    }
}

impl Related<super::course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
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
        title: &str,
        description: &str,
        instructor_id: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            instructor_id: Set(instructor_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        course.insert(db).await
    }

    /// All courses owned by one instructor.
    pub async fn find_by_instructor(
        db: &DbConn,
        instructor_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .all(db)
            .await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
