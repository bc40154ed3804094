mod helpers;

#[cfg(test)]
mod tests {
    use crate::helpers::app::{make_test_app, seed_user, send_json};
    use axum::Router;
    use axum::http::StatusCode;
    use db::models::user::Role;
    use db::stats::course_stats;
    use serde_json::json;

    async fn create_course(app: &Router, token: &str, title: &str) -> i64 {
        let (status, json) = send_json(
            app,
            "POST",
            "/api/courses",
            Some(token),
            Some(json!({ "title": title, "description": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().expect("Course id missing")
    }

    async fn add_module(app: &Router, token: &str, course_id: i64, order: i32) -> i64 {
        let (status, json) = send_json(
            app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(token),
            Some(json!({ "title": format!("Module {order}"), "module_order": order })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().expect("Module id missing")
    }

    async fn enroll(app: &Router, token: &str, course_id: i64) {
        let (status, _) = send_json(
            app,
            "POST",
            "/api/enrollments",
            Some(token),
            Some(json!({ "course_id": course_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_progress_lifecycle_over_a_four_module_course() {
        let (app, state) = make_test_app().await;
        let (_, instructor_token) =
            seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;
        let course_id = create_course(&app, &instructor_token, "Intro to Proofs").await;

        let mut modules = Vec::new();
        for order in 1..=4 {
            modules.push(add_module(&app, &instructor_token, course_id, order).await);
        }
        enroll(&app, &student_token, course_id).await;

        // Overwrite with two of the four modules.
        let (status, json) = send_json(
            &app,
            "PUT",
            "/api/progress",
            Some(&student_token),
            Some(json!({
                "course_id": course_id,
                "completed_module_ids": [modules[0], modules[1]],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Progress updated successfully");
        assert_eq!(json["data"]["progress_percentage"], 50.0);

        let (status, json) = send_json(
            &app,
            "GET",
            &format!("/api/progress/course/{course_id}"),
            Some(&student_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["progress_percentage"], 50.0);
        assert_eq!(json["data"]["completed_modules"].as_array().unwrap().len(), 2);

        // Mark a third one complete; repeating it changes nothing.
        let (status, json) = send_json(
            &app,
            "POST",
            "/api/progress/complete",
            Some(&student_token),
            Some(json!({ "course_id": course_id, "module_id": modules[2] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Module marked complete");
        assert_eq!(json["data"]["progress_percentage"], 75.0);

        let (status, json) = send_json(
            &app,
            "POST",
            "/api/progress/complete",
            Some(&student_token),
            Some(json!({ "course_id": course_id, "module_id": modules[2] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["progress_percentage"], 75.0);
        assert_eq!(json["data"]["completed_modules"].as_array().unwrap().len(), 3);

        // Ids that are not modules of this course drop out on overwrite.
        let (status, json) = send_json(
            &app,
            "PUT",
            "/api/progress",
            Some(&student_token),
            Some(json!({ "course_id": course_id, "completed_module_ids": [999] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["progress_percentage"], 0.0);
        assert_eq!(json["data"]["completed_modules"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_full_completion_updates_the_course_aggregate() {
        let (app, state) = make_test_app().await;
        let (_, instructor_token) =
            seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;
        let course_id = create_course(&app, &instructor_token, "Intro to Proofs").await;
        let module_id = add_module(&app, &instructor_token, course_id, 1).await;
        enroll(&app, &student_token, course_id).await;

        let (status, json) = send_json(
            &app,
            "POST",
            "/api/progress/complete",
            Some(&student_token),
            Some(json!({ "course_id": course_id, "module_id": module_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["progress_percentage"], 100.0);

        let stats = course_stats::Model::find_by_course(state.stats_db(), course_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.total_enrollments, 1);
        assert_eq!(stats.total_completions, 1);
        assert_eq!(stats.average_progress, 100.0);
    }

    #[tokio::test]
    async fn test_complete_rejects_a_module_from_another_course() {
        let (app, state) = make_test_app().await;
        let (_, instructor_token) =
            seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;
        let proofs = create_course(&app, &instructor_token, "Intro to Proofs").await;
        let algebra = create_course(&app, &instructor_token, "Linear Algebra").await;
        let foreign_module = add_module(&app, &instructor_token, algebra, 1).await;
        enroll(&app, &student_token, proofs).await;

        let (status, json) = send_json(
            &app,
            "POST",
            "/api/progress/complete",
            Some(&student_token),
            Some(json!({ "course_id": proofs, "module_id": foreign_module })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Module does not belong to this course");
    }

    #[tokio::test]
    async fn test_get_progress_without_a_record_is_zeroed() {
        let (app, state) = make_test_app().await;
        let (_, instructor_token) =
            seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let (student, student_token) =
            seed_user(&state, "Sam", "sam@test.com", Role::Student).await;
        let course_id = create_course(&app, &instructor_token, "Intro to Proofs").await;

        let (status, json) = send_json(
            &app,
            "GET",
            &format!("/api/progress/course/{course_id}"),
            Some(&student_token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["student_id"], student.id);
        assert_eq!(json["data"]["course_id"], course_id);
        assert_eq!(json["data"]["progress_percentage"], 0.0);
        assert!(json["data"]["last_accessed"].is_null());
    }

    #[tokio::test]
    async fn test_progress_routes_reject_missing_courses() {
        let (app, state) = make_test_app().await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;

        let (status, _) = send_json(
            &app,
            "GET",
            "/api/progress/course/999",
            Some(&student_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = send_json(
            &app,
            "PUT",
            "/api/progress",
            Some(&student_token),
            Some(json!({ "course_id": 999, "completed_module_ids": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }

    #[tokio::test]
    async fn test_progress_writes_are_student_only() {
        let (app, state) = make_test_app().await;
        let (_, instructor_token) =
            seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let course_id = create_course(&app, &instructor_token, "Intro to Proofs").await;

        let (status, _) = send_json(
            &app,
            "PUT",
            "/api/progress",
            Some(&instructor_token),
            Some(json!({ "course_id": course_id, "completed_module_ids": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/progress/complete",
            Some(&instructor_token),
            Some(json!({ "course_id": course_id, "module_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Reads are open to any authenticated user.
        let (status, _) = send_json(
            &app,
            "GET",
            &format!("/api/progress/course/{course_id}"),
            Some(&instructor_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
