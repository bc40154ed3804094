use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// An ordered content unit within a course.
///
/// `module_order` is an explicit total order (> 0); listings must sort by it,
/// never by insertion order or id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "course_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,

    pub title: String,
    pub content: String,
    pub module_order: i32,
    pub video_url: Option<String>,
    pub resources: ResourceList,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JSON-backed list of resource URLs attached to a module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ResourceList(pub Vec<String>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
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
        course_id: i64,
        title: &str,
        content: &str,
        module_order: i32,
        video_url: Option<String>,
        resources: Vec<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let module = ActiveModel {
            course_id: Set(course_id),
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            module_order: Set(module_order),
            video_url: Set(video_url),
            resources: Set(ResourceList(resources)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        module.insert(db).await
    }

    /// Modules of a course in presentation order.
    pub async fn find_by_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::ModuleOrder)
            .all(db)
            .await
    }

    /// Current module-id set of a course, used for progress computation.
    pub async fn ids_for_course(db: &DbConn, course_id: i64) -> Result<Vec<i64>, DbErr> {
        let rows: Vec<i64> = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .select_only()
            .column(Column::Id)
            .into_tuple()
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
