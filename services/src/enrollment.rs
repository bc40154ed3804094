use db::models::{course, course_student, enrollment, progress};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::error::ServiceError;
use crate::{notification, stats};

/// Enrolls a student in a course.
///
/// On success the student is added to the course's member set, a fresh
/// progress record is created at 0%, the course's enrollment counter is
/// bumped, and an enrollment notification is emitted. Uniqueness of the
/// `(student, course)` pair is enforced by the store's composite index, so
/// two concurrent calls yield exactly one enrollment and one `Conflict`.
///
/// Writes that follow the enrollment insert are not rolled back if a later
/// step fails; the enrollment is authoritative once inserted.
pub async fn enroll(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
) -> Result<enrollment::Model, ServiceError> {
    let course = course::Entity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Course not found"))?;

    let created = enrollment::Model::create(db, student_id, course_id)
        .await
        .map_err(|e| ServiceError::conflict_on_unique(e, "Already enrolled in this course"))?;

    course_student::Model::add_if_absent(db, course_id, student_id).await?;

    progress::Model::create(db, student_id, course_id, Vec::new(), 0.0).await?;

    stats::increment_course_enrollments(stats_db, course_id).await?;

    notification::emit(
        db,
        student_id,
        "enrollment",
        "Course Enrollment",
        &format!("You have successfully enrolled in {}", course.title),
        Some(course_id),
    )
    .await;

    Ok(created)
}
