#[cfg(test)]
mod tests {
    use db::models::user::Role;
    use db::models::{course, course_module, progress, user};
    use db::stats::course_stats;
    use db::test_utils::{setup_test_db, setup_test_stats_db};
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

    struct TestCtx {
        db: DatabaseConnection,
        stats_db: DatabaseConnection,
        student: user::Model,
        course: course::Model,
        modules: Vec<course_module::Model>,
    }

    async fn setup() -> TestCtx {
        let db = setup_test_db().await;
        let stats_db = setup_test_stats_db().await;

        let instructor = user::Model::create(
            &db,
            "Progress Instructor",
            "progress_instructor@test.com",
            "password123",
            Role::Instructor,
        )
        .await
        .unwrap();
        let student = user::Model::create(
            &db,
            "Progress Student",
            "progress_student@test.com",
            "password123",
            Role::Student,
        )
        .await
        .unwrap();
        let course = course::Model::create(&db, "Error Handling", "Results.", instructor.id)
            .await
            .unwrap();
        course_stats::Model::init(&stats_db, course.id).await.unwrap();

        let mut modules = Vec::new();
        for i in 0..4 {
            let module = course_module::Model::create(
                &db,
                course.id,
                &format!("Unit {}", i + 1),
                "Reading and exercises.",
                i,
                None,
                Vec::new(),
            )
            .await
            .unwrap();
            modules.push(module);
        }

        TestCtx {
            db,
            stats_db,
            student,
            course,
            modules,
        }
    }

    async fn course_aggregate(ctx: &TestCtx) -> course_stats::Model {
        course_stats::Model::find_by_course(&ctx.stats_db, ctx.course.id)
            .await
            .unwrap()
            .expect("course aggregate row")
    }

    // ---------------------------
    // set_progress
    // ---------------------------

    #[tokio::test]
    async fn test_percentage_follows_completed_count() {
        let ctx = setup().await;

        let one = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            vec![ctx.modules[0].id],
        )
        .await
        .unwrap();
        assert_eq!(one.progress_percentage, 25.0);

        let all = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            ctx.modules.iter().map(|m| m.id).collect(),
        )
        .await
        .unwrap();
        assert_eq!(all.progress_percentage, 100.0);

        let stats = course_aggregate(&ctx).await;
        assert_eq!(stats.total_completions, 1);
        assert_eq!(stats.average_progress, 100.0);
    }

    #[tokio::test]
    async fn test_set_progress_is_idempotent() {
        let ctx = setup().await;
        let set = vec![ctx.modules[0].id, ctx.modules[1].id];

        let first = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            set.clone(),
        )
        .await
        .unwrap();
        let second = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            set,
        )
        .await
        .unwrap();

        assert_eq!(first.progress_percentage, 50.0);
        assert_eq!(second.progress_percentage, 50.0);
        assert_eq!(second.completed_modules, first.completed_modules);

        let rows = progress::Entity::find().count(&ctx.db).await.unwrap();
        assert_eq!(rows, 1, "repeat writes must reuse the one record");

        let stats = course_aggregate(&ctx).await;
        assert_eq!(stats.total_completions, 0);
        assert_eq!(stats.average_progress, 50.0);
    }

    #[tokio::test]
    async fn test_set_progress_may_shrink_the_set() {
        let ctx = setup().await;

        services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            ctx.modules.iter().map(|m| m.id).collect(),
        )
        .await
        .unwrap();

        let shrunk = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            vec![ctx.modules[0].id],
        )
        .await
        .unwrap();
        assert_eq!(shrunk.progress_percentage, 25.0);

        let stats = course_aggregate(&ctx).await;
        assert_eq!(stats.total_completions, 0, "no longer complete");
        assert_eq!(stats.average_progress, 25.0);
    }

    #[tokio::test]
    async fn test_unknown_and_duplicate_ids_are_dropped() {
        let ctx = setup().await;

        let written = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            vec![ctx.modules[0].id, 9999, ctx.modules[0].id],
        )
        .await
        .unwrap();

        assert_eq!(written.completed_modules.0, vec![ctx.modules[0].id]);
        assert_eq!(written.progress_percentage, 25.0);
    }

    #[tokio::test]
    async fn test_set_progress_on_missing_course_is_not_found() {
        let ctx = setup().await;

        let err = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            9999,
            vec![1],
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_course_without_modules_stays_at_zero() {
        let ctx = setup().await;
        let bare = course::Model::create(&ctx.db, "Placeholder", "No content yet.", ctx.course.instructor_id)
            .await
            .unwrap();
        course_stats::Model::init(&ctx.stats_db, bare.id).await.unwrap();

        let written = services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            bare.id,
            vec![9999],
        )
        .await
        .unwrap();

        assert!(written.completed_modules.0.is_empty());
        assert_eq!(written.progress_percentage, 0.0);
    }

    // ---------------------------
    // mark_module_complete
    // ---------------------------

    #[tokio::test]
    async fn test_mark_module_complete_is_monotonic_and_idempotent() {
        let ctx = setup().await;

        let first = services::progress::mark_module_complete(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            ctx.modules[0].id,
        )
        .await
        .unwrap();
        assert_eq!(first.progress_percentage, 25.0);

        let repeat = services::progress::mark_module_complete(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            ctx.modules[0].id,
        )
        .await
        .unwrap();
        assert_eq!(repeat.progress_percentage, 25.0);
        assert_eq!(repeat.completed_modules.0, vec![ctx.modules[0].id]);

        let second = services::progress::mark_module_complete(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            ctx.modules[1].id,
        )
        .await
        .unwrap();
        assert_eq!(second.progress_percentage, 50.0);
        assert!(second.progress_percentage >= repeat.progress_percentage);
    }

    #[tokio::test]
    async fn test_mark_module_from_another_course_is_validation() {
        let ctx = setup().await;
        let other = course::Model::create(&ctx.db, "Other", "Elsewhere.", ctx.course.instructor_id)
            .await
            .unwrap();
        let foreign = course_module::Model::create(
            &ctx.db,
            other.id,
            "Foreign Unit",
            "Belongs elsewhere.",
            0,
            None,
            Vec::new(),
        )
        .await
        .unwrap();

        let err = services::progress::mark_module_complete(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            foreign.id,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "validation");

        let row = progress::Model::find_by_pair(&ctx.db, ctx.student.id, ctx.course.id)
            .await
            .unwrap();
        assert!(row.is_none(), "a rejected mark must not create a record");
    }

    // ---------------------------
    // course aggregate
    // ---------------------------

    #[tokio::test]
    async fn test_aggregate_averages_over_all_students() {
        let ctx = setup().await;
        let second = user::Model::create(
            &ctx.db,
            "Second Student",
            "progress_second@test.com",
            "password123",
            Role::Student,
        )
        .await
        .unwrap();

        services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            ctx.student.id,
            ctx.course.id,
            ctx.modules.iter().map(|m| m.id).collect(),
        )
        .await
        .unwrap();
        services::progress::set_progress(
            &ctx.db,
            &ctx.stats_db,
            second.id,
            ctx.course.id,
            vec![ctx.modules[0].id, ctx.modules[1].id],
        )
        .await
        .unwrap();

        let stats = course_aggregate(&ctx).await;
        assert_eq!(stats.total_completions, 1);
        assert_eq!(stats.average_progress, 75.0);
    }
}
