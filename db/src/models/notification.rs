use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A typed event record delivered to one user.
///
/// Written fire-and-forget from the services; a failed insert is logged and
/// never fails the operation that triggered it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i64,

    pub notification_type: String,
    pub title: String,
    pub message: String,

    pub course_id: Option<i64>,
    pub read: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        user_id: i64,
        notification_type: &str,
        title: &str,
        message: &str,
        course_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let notification = ActiveModel {
            user_id: Set(user_id),
            notification_type: Set(notification_type.to_owned()),
            title: Set(title.to_owned()),
            message: Set(message.to_owned()),
            course_id: Set(course_id),
            read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        notification.insert(db).await
    }
}
