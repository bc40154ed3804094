use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A student's completion state for one course.
///
/// Unique per `(student_id, course_id)`. The percentage is always re-derived
/// from the course's current module count when the record is written; it is
/// never incrementally patched.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub student_id: i64,
    pub course_id: i64,

    pub completed_modules: CompletedModules,
    pub progress_percentage: f64,

    pub last_accessed: DateTime<Utc>,
}

/// JSON-backed set of completed module ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CompletedModules(pub Vec<i64>);

impl CompletedModules {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, module_id: i64) -> bool {
        self.0.contains(&module_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        student_id: i64,
        course_id: i64,
        completed_modules: Vec<i64>,
        progress_percentage: f64,
    ) -> Result<Model, DbErr> {
        let progress = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            completed_modules: Set(CompletedModules(completed_modules)),
            progress_percentage: Set(progress_percentage),
            last_accessed: Set(Utc::now()),
            ..Default::default()
        };

        progress.insert(db).await
    }

    pub async fn find_by_pair(
        db: &DbConn,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// All progress records of a course, the input to the aggregate rescan.
    pub async fn find_by_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .all(db)
            .await
    }
}
