//! Shared aggregate primitives for the stats store, plus the rebuild
//! operations that recompute a row from an entity-store scan.
//!
//! Mutations that read an aggregate row before writing it run inside a
//! single stats-store transaction so two concurrent updates to the same key
//! serialize instead of losing one (the classic read-modify-write race on
//! the incremental quiz average). The enrollment counter bump is a single
//! `SET x = x + 1` expression and needs no transaction.

use chrono::Utc;
use db::models::{course, enrollment, progress, quiz, quiz_submission};
use db::stats::{course_stats, quiz_stats, score_event};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};

use crate::error::ServiceError;

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Number of progress percentages at exactly 100.
pub fn completion_count(percentages: &[f64]) -> i64 {
    percentages.iter().filter(|p| **p == 100.0).count() as i64
}

/// Incremental running average: fold one new score into the prior average.
pub fn next_average(old_average: f64, old_count: i64, score: f64) -> f64 {
    (old_average * old_count as f64 + score) / (old_count + 1) as f64
}

/// Bumps a course's enrollment counter by one.
///
/// Mirrors `SET total_enrollments = total_enrollments + 1`; a missing row is
/// a no-op (the row is created with the course and healed by rebuild).
pub async fn increment_course_enrollments(
    stats_db: &DatabaseConnection,
    course_id: i64,
) -> Result<(), DbErr> {
    course_stats::Entity::update_many()
        .col_expr(
            course_stats::Column::TotalEnrollments,
            Expr::col(course_stats::Column::TotalEnrollments).add(1),
        )
        .col_expr(course_stats::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(course_stats::Column::CourseId.eq(course_id))
        .exec(stats_db)
        .await?;
    Ok(())
}

/// Writes the result of a full course rescan: completion count and mean
/// progress over all current progress records.
///
/// Upserts inside one transaction. A row created here starts with zero
/// enrollments; only rebuild recounts them.
pub async fn apply_progress_rescan(
    stats_db: &DatabaseConnection,
    course_id: i64,
    percentages: &[f64],
) -> Result<course_stats::Model, DbErr> {
    let completions = completion_count(percentages);
    let average = mean(percentages);

    let txn = stats_db.begin().await?;
    let updated =
        upsert_course_row(&txn, course_id, None, Some((completions, average))).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Folds one graded submission into a quiz's aggregate row.
///
/// Inside a single transaction: append the score event, then recompute the
/// row from its prior values. The event is appended before the pass count so
/// the current submission is part of its own pass rate.
pub async fn apply_submission_score(
    stats_db: &DatabaseConnection,
    quiz_id: i64,
    course_id: i64,
    student_id: i64,
    score: f64,
    passing_score: f64,
) -> Result<quiz_stats::Model, DbErr> {
    let txn = stats_db.begin().await?;

    score_event::Model::append(&txn, student_id, course_id, quiz_id, score).await?;

    let row = match quiz_stats::Model::find_by_quiz(&txn, quiz_id).await? {
        Some(row) => row,
        None => quiz_stats::Model::init(&txn, quiz_id, course_id).await?,
    };

    let new_count = row.total_submissions + 1;
    let new_average = next_average(row.average_score, row.total_submissions, score);
    let passed_count = score_event::Model::count_passing(&txn, quiz_id, passing_score).await?;
    let pass_rate = (passed_count as f64 / new_count as f64) * 100.0;

    let mut am: quiz_stats::ActiveModel = row.into();
    am.total_submissions = Set(new_count);
    am.average_score = Set(new_average);
    am.pass_rate = Set(pass_rate);
    am.updated_at = Set(Utc::now());
    let updated = am.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Recomputes one course's aggregate row from an entity-store scan.
///
/// The maintenance path for aggregate drift: enrollments are recounted, not
/// just completions and the average.
pub async fn rebuild_course_stats(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    course_id: i64,
) -> Result<course_stats::Model, ServiceError> {
    if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("Course not found"));
    }

    let enrollments = enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(course_id))
        .count(db)
        .await? as i64;

    let percentages: Vec<f64> = progress::Model::find_by_course(db, course_id)
        .await?
        .iter()
        .map(|p| p.progress_percentage)
        .collect();

    let completions = completion_count(&percentages);
    let average = mean(&percentages);

    let txn = stats_db.begin().await?;
    let updated = upsert_course_row(
        &txn,
        course_id,
        Some(enrollments),
        Some((completions, average)),
    )
    .await?;
    txn.commit().await?;
    Ok(updated)
}

/// Recomputes one quiz's aggregate row from the entity-store submission set
/// and replaces the quiz's score-event log to match.
pub async fn rebuild_quiz_stats(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    quiz_id: i64,
) -> Result<quiz_stats::Model, ServiceError> {
    let quiz = quiz::Entity::find_by_id(quiz_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Quiz not found"))?;

    let submissions = quiz_submission::Model::find_by_quiz(db, quiz_id).await?;
    let scores: Vec<f64> = submissions.iter().map(|s| s.score).collect();

    let total = scores.len() as i64;
    let average = mean(&scores);
    let passed = scores.iter().filter(|s| **s >= quiz.passing_score).count() as i64;
    let pass_rate = if total > 0 {
        (passed as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let txn = stats_db.begin().await?;

    score_event::Model::delete_by_quiz(&txn, quiz_id).await?;
    for s in &submissions {
        score_event::Model::append(&txn, s.student_id, quiz.course_id, quiz_id, s.score).await?;
    }

    let row = match quiz_stats::Model::find_by_quiz(&txn, quiz_id).await? {
        Some(row) => row,
        None => quiz_stats::Model::init(&txn, quiz_id, quiz.course_id).await?,
    };
    let mut am: quiz_stats::ActiveModel = row.into();
    am.total_submissions = Set(total);
    am.average_score = Set(average);
    am.pass_rate = Set(pass_rate);
    am.updated_at = Set(Utc::now());
    let updated = am.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Removes a deleted course's aggregate rows. Score events stay; the log is
/// append-only history.
pub async fn remove_course_stats(
    stats_db: &DatabaseConnection,
    course_id: i64,
) -> Result<(), DbErr> {
    course_stats::Model::delete(stats_db, course_id).await?;
    quiz_stats::Model::delete_by_course(stats_db, course_id).await?;
    Ok(())
}

async fn upsert_course_row(
    txn: &DatabaseTransaction,
    course_id: i64,
    enrollments: Option<i64>,
    rescan: Option<(i64, f64)>,
) -> Result<course_stats::Model, DbErr> {
    let existing = course_stats::Model::find_by_course(txn, course_id).await?;

    let mut am: course_stats::ActiveModel = match existing {
        Some(row) => row.into(),
        None => course_stats::Model::init(txn, course_id).await?.into(),
    };

    if let Some(enrollments) = enrollments {
        am.total_enrollments = Set(enrollments);
    }
    if let Some((completions, average)) = rescan {
        am.total_completions = Set(completions);
        am.average_progress = Set(average);
    }
    am.updated_at = Set(Utc::now());
    am.update(txn).await
}
