use db::models::notification;
use sea_orm::DatabaseConnection;

/// Fire-and-forget notification emission.
///
/// A failed insert is logged at warn level and swallowed so it can never
/// taint the operation that triggered it.
pub async fn emit(
    db: &DatabaseConnection,
    user_id: i64,
    notification_type: &str,
    title: &str,
    message: &str,
    course_id: Option<i64>,
) {
    if let Err(e) =
        notification::Model::create(db, user_id, notification_type, title, message, course_id)
            .await
    {
        tracing::warn!(
            user_id,
            notification_type,
            error = %e,
            "failed to record notification"
        );
    }
}
