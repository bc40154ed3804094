use chrono::Utc;
use db::models::progress::CompletedModules;
use db::models::{course, course_module, progress};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

use crate::error::ServiceError;
use crate::stats;

/// Completion percentage for `completed` out of `total` modules, 0 when the
/// course has no modules.
pub fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed as f64 / total as f64) * 100.0
}

/// Overwrites a student's completed-module set for a course.
///
/// The stored set is the submitted ids intersected with the course's current
/// modules, deduplicated; ids of deleted modules drop out, which keeps the
/// percentage in [0,100] and self-correcting as the course changes. The set
/// may shrink: this is the explicit overwrite operation, "uncompleting" is
/// allowed. Use [`mark_module_complete`] for the monotonic variant.
///
/// After the upsert the course aggregate is recomputed by a full rescan of
/// the course's progress records.
pub async fn set_progress(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
    completed_module_ids: Vec<i64>,
) -> Result<progress::Model, ServiceError> {
    if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("Course not found"));
    }

    let module_ids = course_module::Model::ids_for_course(db, course_id).await?;
    let completed = retain_known(completed_module_ids, &module_ids);

    write_progress(db, stats_db, student_id, course_id, completed, module_ids.len()).await
}

/// Adds one module to a student's completed set (set union, monotonic).
///
/// Fails with `Validation` when the module does not belong to the course.
/// Repeating the call is idempotent and the percentage never decreases.
pub async fn mark_module_complete(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
    module_id: i64,
) -> Result<progress::Model, ServiceError> {
    if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("Course not found"));
    }

    let module_ids = course_module::Model::ids_for_course(db, course_id).await?;
    if !module_ids.contains(&module_id) {
        return Err(ServiceError::validation(
            "Module does not belong to this course",
        ));
    }

    let mut completed = match progress::Model::find_by_pair(db, student_id, course_id).await? {
        Some(existing) => existing.completed_modules.0,
        None => Vec::new(),
    };
    completed.push(module_id);
    let completed = retain_known(completed, &module_ids);

    write_progress(db, stats_db, student_id, course_id, completed, module_ids.len()).await
}

/// Upserts the progress row, then rescans the course for its aggregate.
async fn write_progress(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
    completed: Vec<i64>,
    total_modules: usize,
) -> Result<progress::Model, ServiceError> {
    let percentage = completion_percentage(completed.len(), total_modules);

    let updated = match progress::Model::find_by_pair(db, student_id, course_id).await? {
        Some(existing) => {
            let mut am: progress::ActiveModel = existing.into();
            am.completed_modules = Set(CompletedModules(completed));
            am.progress_percentage = Set(percentage);
            am.last_accessed = Set(Utc::now());
            am.update(db).await?
        }
        None => progress::Model::create(db, student_id, course_id, completed, percentage).await?,
    };

    let percentages: Vec<f64> = progress::Model::find_by_course(db, course_id)
        .await?
        .iter()
        .map(|p| p.progress_percentage)
        .collect();
    stats::apply_progress_rescan(stats_db, course_id, &percentages).await?;

    Ok(updated)
}

/// Keeps ids that exist in the course's current module set, deduplicated,
/// preserving first-seen order.
fn retain_known(submitted: Vec<i64>, module_ids: &[i64]) -> Vec<i64> {
    let mut kept = Vec::with_capacity(submitted.len());
    for id in submitted {
        if module_ids.contains(&id) && !kept.contains(&id) {
            kept.push(id);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_zero_modules_is_zero() {
        assert_eq!(completion_percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_follows_module_count() {
        // A four-module course: one completed is 25%, all four is 100%.
        assert_eq!(completion_percentage(1, 4), 25.0);
        assert_eq!(completion_percentage(4, 4), 100.0);
        assert_eq!(completion_percentage(2, 3), 200.0 / 3.0);
    }

    #[test]
    fn retain_known_drops_stale_and_duplicate_ids() {
        let kept = retain_known(vec![3, 1, 3, 99, 2], &[1, 2, 3, 4]);
        assert_eq!(kept, vec![3, 1, 2]);
    }

    #[test]
    fn retain_known_of_empty_input_is_empty() {
        assert!(retain_known(Vec::new(), &[1, 2]).is_empty());
    }
}
