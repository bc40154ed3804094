#[cfg(test)]
mod tests {
    use db::models::user::Role;
    use db::models::{course, quiz_submission, user};
    use db::stats::{course_stats, quiz_stats, score_event};
    use db::test_utils::{setup_test_db, setup_test_stats_db};
    use sea_orm::ActiveValue::Set;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
        QueryFilter,
    };
    use services::quiz::NewQuestion;

    struct TestCtx {
        db: DatabaseConnection,
        stats_db: DatabaseConnection,
        student: user::Model,
        course: course::Model,
    }

    async fn setup() -> TestCtx {
        let db = setup_test_db().await;
        let stats_db = setup_test_stats_db().await;

        let instructor = user::Model::create(
            &db,
            "Quiz Instructor",
            "quiz_instructor@test.com",
            "password123",
            Role::Instructor,
        )
        .await
        .unwrap();
        let student = user::Model::create(
            &db,
            "Quiz Student",
            "quiz_student@test.com",
            "password123",
            Role::Student,
        )
        .await
        .unwrap();
        let course = course::Model::create(&db, "Traits and Generics", "Bounds.", instructor.id)
            .await
            .unwrap();
        course_stats::Model::init(&stats_db, course.id).await.unwrap();

        TestCtx {
            db,
            stats_db,
            student,
            course,
        }
    }

    fn question(options: &[&str], correct_index: i32, points: i32) -> NewQuestion {
        NewQuestion {
            text: "Pick one".into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
            points,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    // ---------------------------
    // create_quiz
    // ---------------------------

    #[tokio::test]
    async fn test_create_quiz_persists_questions_and_zeroed_stats() {
        let ctx = setup().await;

        let (quiz, questions) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Week 1 Check",
            Some(30),
            None,
            vec![question(&["a", "b"], 0, 1), question(&["a", "b", "c"], 2, 3)],
        )
        .await
        .unwrap();

        assert_eq!(quiz.course_id, ctx.course.id);
        assert_eq!(quiz.passing_score, services::quiz::DEFAULT_PASSING_SCORE);
        assert_eq!(quiz.time_limit_minutes, Some(30));

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].position, 0);
        assert_eq!(questions[1].position, 1);
        assert_eq!(questions[1].points, 3);

        let stats = quiz_stats::Model::find_by_quiz(&ctx.stats_db, quiz.id)
            .await
            .unwrap()
            .expect("zeroed aggregate row");
        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.pass_rate, 0.0);
    }

    #[tokio::test]
    async fn test_create_quiz_rejects_bad_input() {
        let ctx = setup().await;

        let cases: Vec<(Vec<NewQuestion>, Option<f64>)> = vec![
            (vec![], None),
            (vec![question(&["only"], 0, 1)], None),
            (vec![question(&["a", "b"], 5, 1)], None),
            (vec![question(&["a", "b"], -1, 1)], None),
            (vec![question(&["a", "b"], 0, 0)], None),
            (vec![question(&["a", "b"], 0, 1)], Some(150.0)),
        ];
        for (questions, passing) in cases {
            let err = services::quiz::create_quiz(
                &ctx.db,
                &ctx.stats_db,
                ctx.course.id,
                "Broken",
                None,
                passing,
                questions,
            )
            .await
            .unwrap_err();
            assert_eq!(err.kind(), "validation");
        }

        let err = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            9999,
            "Orphan",
            None,
            None,
            vec![question(&["a", "b"], 0, 1)],
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    // ---------------------------
    // submit_quiz
    // ---------------------------

    #[tokio::test]
    async fn test_submission_is_graded_by_point_weight() {
        let ctx = setup().await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Weighted",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1), question(&["a", "b", "c"], 2, 3)],
        )
        .await
        .unwrap();

        let graded = services::quiz::submit_quiz(
            &ctx.db,
            &ctx.stats_db,
            quiz.id,
            ctx.student.id,
            vec![0, 1],
        )
        .await
        .unwrap();

        assert_eq!(graded.score, 25.0);
        assert!(!graded.passed);
        assert_eq!(graded.submission.answers.0, vec![0, 1]);
        assert_eq!(graded.submission.score, 25.0);

        let stored = quiz_submission::Model::find_by_quiz(&ctx.db, quiz.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].student_id, ctx.student.id);
    }

    #[tokio::test]
    async fn test_double_submit_is_conflict() {
        let ctx = setup().await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Once Only",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1)],
        )
        .await
        .unwrap();

        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, ctx.student.id, vec![0])
            .await
            .unwrap();
        let err =
            services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, ctx.student.id, vec![1])
                .await
                .unwrap_err();
        assert_eq!(err.kind(), "conflict");

        let stored = quiz_submission::Model::find_by_quiz(&ctx.db, quiz.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1, "first answers stay authoritative");
        assert_eq!(stored[0].score, 100.0);

        let stats = quiz_stats::Model::find_by_quiz(&ctx.stats_db, quiz.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.total_submissions, 1, "the losing attempt must not count");
    }

    #[tokio::test]
    async fn test_wrong_answer_count_is_validation() {
        let ctx = setup().await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Two Questions",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1), question(&["a", "b"], 1, 1)],
        )
        .await
        .unwrap();

        let err =
            services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, ctx.student.id, vec![0])
                .await
                .unwrap_err();
        assert_eq!(err.kind(), "validation");

        let stored = quiz_submission::Model::find_by_quiz(&ctx.db, quiz.id)
            .await
            .unwrap();
        assert!(stored.is_empty(), "rejected submissions must not persist");
    }

    #[tokio::test]
    async fn test_out_of_range_answer_counts_as_wrong() {
        let ctx = setup().await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Loose Input",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1)],
        )
        .await
        .unwrap();

        let graded =
            services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, ctx.student.id, vec![7])
                .await
                .unwrap();
        assert_eq!(graded.score, 0.0);
        assert!(!graded.passed);
    }

    #[tokio::test]
    async fn test_submit_to_missing_quiz_is_not_found() {
        let ctx = setup().await;

        let err =
            services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, 9999, ctx.student.id, vec![0])
                .await
                .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    // ---------------------------
    // quiz aggregates
    // ---------------------------

    async fn three_students(ctx: &TestCtx) -> Vec<user::Model> {
        let mut students = vec![ctx.student.clone()];
        for i in 0..2 {
            let extra = user::Model::create(
                &ctx.db,
                &format!("Extra Student {i}"),
                &format!("quiz_extra{i}@test.com"),
                "password123",
                Role::Student,
            )
            .await
            .unwrap();
            students.push(extra);
        }
        students
    }

    #[tokio::test]
    async fn test_average_and_pass_rate_fold_per_submission() {
        let ctx = setup().await;
        let students = three_students(&ctx).await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Folded",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1)],
        )
        .await
        .unwrap();

        // First submission counts itself: one passing score is a 100% rate.
        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, students[0].id, vec![0])
            .await
            .unwrap();
        let after_one = quiz_stats::Model::find_by_quiz(&ctx.stats_db, quiz.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_one.total_submissions, 1);
        assert_close(after_one.average_score, 100.0);
        assert_close(after_one.pass_rate, 100.0);

        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, students[1].id, vec![1])
            .await
            .unwrap();
        let after_two = quiz_stats::Model::find_by_quiz(&ctx.stats_db, quiz.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_two.total_submissions, 2);
        assert_close(after_two.average_score, 50.0);
        assert_close(after_two.pass_rate, 50.0);

        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, students[2].id, vec![0])
            .await
            .unwrap();
        let after_three = quiz_stats::Model::find_by_quiz(&ctx.stats_db, quiz.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_three.total_submissions, 3);
        assert_close(after_three.average_score, 200.0 / 3.0);
        assert_close(after_three.pass_rate, 200.0 / 3.0);

        let events = score_event::Entity::find()
            .filter(score_event::Column::QuizId.eq(quiz.id))
            .count(&ctx.stats_db)
            .await
            .unwrap();
        assert_eq!(events, 3);
    }

    #[tokio::test]
    async fn test_rebuild_restores_a_corrupted_row() {
        let ctx = setup().await;
        let students = three_students(&ctx).await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Rebuilt",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1)],
        )
        .await
        .unwrap();

        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, students[0].id, vec![0])
            .await
            .unwrap();
        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, students[1].id, vec![1])
            .await
            .unwrap();

        let row = quiz_stats::Model::find_by_quiz(&ctx.stats_db, quiz.id)
            .await
            .unwrap()
            .unwrap();
        let mut corrupted: quiz_stats::ActiveModel = row.into();
        corrupted.total_submissions = Set(99);
        corrupted.average_score = Set(1.0);
        corrupted.pass_rate = Set(3.0);
        corrupted.update(&ctx.stats_db).await.unwrap();

        let rebuilt = services::stats::rebuild_quiz_stats(&ctx.db, &ctx.stats_db, quiz.id)
            .await
            .unwrap();
        assert_eq!(rebuilt.total_submissions, 2);
        assert_close(rebuilt.average_score, 50.0);
        assert_close(rebuilt.pass_rate, 50.0);

        let events = score_event::Entity::find()
            .filter(score_event::Column::QuizId.eq(quiz.id))
            .count(&ctx.stats_db)
            .await
            .unwrap();
        assert_eq!(events, 2, "the event log is replaced, not appended to");
    }

    #[tokio::test]
    async fn test_rebuild_recreates_a_deleted_row() {
        let ctx = setup().await;
        let (quiz, _) = services::quiz::create_quiz(
            &ctx.db,
            &ctx.stats_db,
            ctx.course.id,
            "Healed",
            None,
            Some(60.0),
            vec![question(&["a", "b"], 0, 1)],
        )
        .await
        .unwrap();
        services::quiz::submit_quiz(&ctx.db, &ctx.stats_db, quiz.id, ctx.student.id, vec![0])
            .await
            .unwrap();

        quiz_stats::Model::delete(&ctx.stats_db, quiz.id).await.unwrap();

        let rebuilt = services::stats::rebuild_quiz_stats(&ctx.db, &ctx.stats_db, quiz.id)
            .await
            .unwrap();
        assert_eq!(rebuilt.total_submissions, 1);
        assert_close(rebuilt.average_score, 100.0);
        assert_close(rebuilt.pass_rate, 100.0);
    }

    #[tokio::test]
    async fn test_rebuild_course_recounts_from_the_entity_store() {
        let ctx = setup().await;

        services::enrollment::enroll(&ctx.db, &ctx.stats_db, ctx.student.id, ctx.course.id)
            .await
            .unwrap();

        let row = course_stats::Model::find_by_course(&ctx.stats_db, ctx.course.id)
            .await
            .unwrap()
            .unwrap();
        let mut corrupted: course_stats::ActiveModel = row.into();
        corrupted.total_enrollments = Set(1000);
        corrupted.average_progress = Set(12.3);
        corrupted.update(&ctx.stats_db).await.unwrap();

        let rebuilt = services::stats::rebuild_course_stats(&ctx.db, &ctx.stats_db, ctx.course.id)
            .await
            .unwrap();
        assert_eq!(rebuilt.total_enrollments, 1);
        assert_eq!(rebuilt.total_completions, 0);
        assert_close(rebuilt.average_progress, 0.0);
    }
}
