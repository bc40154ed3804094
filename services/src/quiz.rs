use db::models::{course, quiz, quiz_question, quiz_submission};
use db::stats::quiz_stats;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::error::ServiceError;
use crate::stats;

/// Default passing threshold when a quiz is created without one.
pub const DEFAULT_PASSING_SCORE: f64 = 60.0;

/// One question of a quiz being created.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub points: i32,
}

/// A graded submission with its derived outcome.
#[derive(Debug)]
pub struct GradedSubmission {
    pub submission: quiz_submission::Model,
    pub score: f64,
    pub passed: bool,
}

/// Creates a quiz with its questions and the zeroed aggregate row.
///
/// A quiz must have at least one question; each question needs at least two
/// options, a correct index inside them, and a positive point weight. These
/// are creation-time invariants so scoring never divides by zero.
pub async fn create_quiz(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    course_id: i64,
    title: &str,
    time_limit_minutes: Option<i32>,
    passing_score: Option<f64>,
    questions: Vec<NewQuestion>,
) -> Result<(quiz::Model, Vec<quiz_question::Model>), ServiceError> {
    if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("Course not found"));
    }

    validate_questions(&questions)?;
    let passing_score = passing_score.unwrap_or(DEFAULT_PASSING_SCORE);
    if !(0.0..=100.0).contains(&passing_score) {
        return Err(ServiceError::validation(
            "Passing score must be between 0 and 100",
        ));
    }

    let created = quiz::Model::create(db, course_id, title, time_limit_minutes, passing_score).await?;

    let mut rows = Vec::with_capacity(questions.len());
    for (position, q) in questions.into_iter().enumerate() {
        let row = quiz_question::Model::create(
            db,
            created.id,
            position as i32,
            &q.text,
            q.options,
            q.correct_index,
            q.points,
        )
        .await?;
        rows.push(row);
    }

    quiz_stats::Model::init(stats_db, created.id, course_id).await?;

    Ok((created, rows))
}

/// Grades an answer vector positionally against a quiz's questions.
///
/// Each question contributes its points to the total; a matching selected
/// index earns them. Out-of-range or non-matching indices simply earn
/// nothing. Returns the percentage of weighted points earned, 0 when there
/// are no points to earn.
pub fn score_answers(questions: &[quiz_question::Model], answers: &[i32]) -> f64 {
    let mut total_points: i64 = 0;
    let mut earned_points: i64 = 0;

    for (i, question) in questions.iter().enumerate() {
        total_points += question.points as i64;
        if answers.get(i).copied() == Some(question.correct_index) {
            earned_points += question.points as i64;
        }
    }

    if total_points == 0 {
        return 0.0;
    }
    (earned_points as f64 / total_points as f64) * 100.0
}

/// Grades and persists a student's submission, then folds the score into the
/// quiz's aggregate row.
///
/// Submissions are write-once per `(quiz, student)`: the second attempt
/// fails with `Conflict` off the unique index, under any interleaving. The
/// answer vector must have exactly one entry per question, aligned by
/// position.
pub async fn submit_quiz(
    db: &DatabaseConnection,
    stats_db: &DatabaseConnection,
    quiz_id: i64,
    student_id: i64,
    answers: Vec<i32>,
) -> Result<GradedSubmission, ServiceError> {
    let quiz = quiz::Entity::find_by_id(quiz_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Quiz not found"))?;

    let questions = quiz_question::Model::find_by_quiz(db, quiz_id).await?;
    if answers.len() != questions.len() {
        return Err(ServiceError::validation(format!(
            "Expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let score = score_answers(&questions, &answers);
    let passed = score >= quiz.passing_score;

    let submission = quiz_submission::Model::create(db, quiz_id, student_id, answers, score)
        .await
        .map_err(|e| ServiceError::conflict_on_unique(e, "Quiz already submitted"))?;

    stats::apply_submission_score(
        stats_db,
        quiz_id,
        quiz.course_id,
        student_id,
        score,
        quiz.passing_score,
    )
    .await?;

    Ok(GradedSubmission {
        submission,
        score,
        passed,
    })
}

fn validate_questions(questions: &[NewQuestion]) -> Result<(), ServiceError> {
    if questions.is_empty() {
        return Err(ServiceError::validation(
            "A quiz must have at least one question",
        ));
    }

    for (i, q) in questions.iter().enumerate() {
        if q.options.len() < 2 {
            return Err(ServiceError::validation(format!(
                "Question {} must have at least two options",
                i + 1
            )));
        }
        if q.correct_index < 0 || q.correct_index as usize >= q.options.len() {
            return Err(ServiceError::validation(format!(
                "Question {} has an out-of-range correct answer",
                i + 1
            )));
        }
        if q.points < 1 {
            return Err(ServiceError::validation(format!(
                "Question {} must be worth at least one point",
                i + 1
            )));
        }
    }

    Ok(())
}
