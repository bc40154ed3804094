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
            Some(json!({ "title": title, "description": "A tour of the material" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().expect("Course id missing")
    }

    // --- Creation ---

    #[tokio::test]
    async fn test_create_course_requires_instructor_or_admin() {
        let (app, state) = make_test_app().await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;

        let body = json!({ "title": "Intro to Proofs", "description": "" });

        let (status, _) = send_json(&app, "POST", "/api/courses", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = send_json(
            &app,
            "POST",
            "/api/courses",
            Some(&student_token),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Instructor or admin access required");
    }

    #[tokio::test]
    async fn test_create_course_seeds_a_stats_row() {
        let (app, state) = make_test_app().await;
        let (instructor, token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;

        let (status, json) = send_json(
            &app,
            "POST",
            "/api/courses",
            Some(&token),
            Some(json!({ "title": "Intro to Proofs", "description": "Logic first" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["title"], "Intro to Proofs");
        assert_eq!(json["data"]["instructor_id"], instructor.id);
        let course_id = json["data"]["id"].as_i64().unwrap();

        let stats = course_stats::Model::find_by_course(state.stats_db(), course_id)
            .await
            .unwrap()
            .expect("Stats row was not seeded");
        assert_eq!(stats.total_enrollments, 0);
        assert_eq!(stats.total_completions, 0);
        assert_eq!(stats.average_progress, 0.0);
    }

    #[tokio::test]
    async fn test_create_course_rejects_empty_title() {
        let (app, state) = make_test_app().await;
        let (_, token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;

        let (status, json) = send_json(
            &app,
            "POST",
            "/api/courses",
            Some(&token),
            Some(json!({ "title": "", "description": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
    }

    // --- Listing and detail ---

    #[tokio::test]
    async fn test_list_courses_includes_instructor_names() {
        let (app, state) = make_test_app().await;
        let (_, instructor_token) =
            seed_user(&state, "Ina Instructor", "ina@test.com", Role::Instructor).await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;

        create_course(&app, &instructor_token, "Intro to Proofs").await;
        create_course(&app, &instructor_token, "Linear Algebra").await;

        let (status, json) =
            send_json(&app, "GET", "/api/courses", Some(&student_token), None).await;

        assert_eq!(status, StatusCode::OK);
        let items = json["data"].as_array().expect("Expected a course list");
        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item["instructor_name"], "Ina Instructor");
        }
    }

    #[tokio::test]
    async fn test_get_course_detail_orders_modules() {
        let (app, state) = make_test_app().await;
        let (_, token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let course_id = create_course(&app, &token, "Intro to Proofs").await;

        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(&token),
            Some(json!({ "title": "Induction", "content": "Later", "module_order": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(&token),
            Some(json!({ "title": "Logic", "content": "First", "module_order": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send_json(
            &app,
            "GET",
            &format!("/api/courses/{course_id}"),
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let modules = json["data"]["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0]["title"], "Logic");
        assert_eq!(modules[1]["title"], "Induction");
        assert_eq!(
            json["data"]["enrolled_student_ids"].as_array().unwrap().len(),
            0
        );
    }

    #[tokio::test]
    async fn test_get_missing_course_is_not_found() {
        let (app, state) = make_test_app().await;
        let (_, token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;

        let (status, json) = send_json(&app, "GET", "/api/courses/999", Some(&token), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }

    // --- Editing and ownership ---

    #[tokio::test]
    async fn test_edit_course_enforces_ownership() {
        let (app, state) = make_test_app().await;
        let (_, owner_token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let (_, other_token) = seed_user(&state, "Omar", "omar@test.com", Role::Instructor).await;
        let (_, admin_token) = seed_user(&state, "Ada", "ada@test.com", Role::Admin).await;
        let course_id = create_course(&app, &owner_token, "Intro to Proofs").await;

        let body = json!({ "title": "Proofs, revised", "description": "New outline" });

        let (status, json) = send_json(
            &app,
            "PUT",
            &format!("/api/courses/{course_id}"),
            Some(&other_token),
            Some(body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json["message"],
            "You do not have permission to modify this course"
        );

        let (status, json) = send_json(
            &app,
            "PUT",
            &format!("/api/courses/{course_id}"),
            Some(&owner_token),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Proofs, revised");

        let (status, _) = send_json(
            &app,
            "PUT",
            &format!("/api/courses/{course_id}"),
            Some(&admin_token),
            Some(json!({ "title": "Proofs, final", "description": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_course_clears_its_stats() {
        let (app, state) = make_test_app().await;
        let (_, token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let course_id = create_course(&app, &token, "Intro to Proofs").await;

        let (status, json) = send_json(
            &app,
            "DELETE",
            &format!("/api/courses/{course_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Course deleted successfully");

        let (status, _) = send_json(
            &app,
            "GET",
            &format!("/api/courses/{course_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let stats = course_stats::Model::find_by_course(state.stats_db(), course_id)
            .await
            .unwrap();
        assert!(stats.is_none());
    }

    // --- Modules ---

    #[tokio::test]
    async fn test_module_crud_and_validation() {
        let (app, state) = make_test_app().await;
        let (_, token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let course_id = create_course(&app, &token, "Intro to Proofs").await;

        let (status, json) = send_json(
            &app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(&token),
            Some(json!({ "title": "Logic", "module_order": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Module order must be a positive integer")
        );

        let (status, json) = send_json(
            &app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(&token),
            Some(json!({
                "title": "Logic",
                "content": "Truth tables",
                "module_order": 1,
                "video_url": "https://videos.test/logic",
                "resources": ["https://notes.test/logic.pdf"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let module_id = json["data"]["id"].as_i64().unwrap();
        assert_eq!(json["data"]["resources"][0], "https://notes.test/logic.pdf");

        let (status, json) = send_json(
            &app,
            "PUT",
            &format!("/api/courses/{course_id}/modules/{module_id}"),
            Some(&token),
            Some(json!({ "title": "Logic", "content": "Truth tables, expanded", "module_order": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["content"], "Truth tables, expanded");

        // The module must be addressed through its own course.
        let other_course = create_course(&app, &token, "Linear Algebra").await;
        let (status, json) = send_json(
            &app,
            "PUT",
            &format!("/api/courses/{other_course}/modules/{module_id}"),
            Some(&token),
            Some(json!({ "title": "Logic", "module_order": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Module not found in this course");

        let (status, _) = send_json(
            &app,
            "DELETE",
            &format!("/api/courses/{course_id}/modules/{module_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send_json(
            &app,
            "GET",
            &format!("/api/courses/{course_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(json["data"]["modules"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_module_routes_enforce_role_and_ownership() {
        let (app, state) = make_test_app().await;
        let (_, owner_token) = seed_user(&state, "Ina", "ina@test.com", Role::Instructor).await;
        let (_, other_token) = seed_user(&state, "Omar", "omar@test.com", Role::Instructor).await;
        let (_, student_token) = seed_user(&state, "Sam", "sam@test.com", Role::Student).await;
        let course_id = create_course(&app, &owner_token, "Intro to Proofs").await;

        let body = json!({ "title": "Logic", "module_order": 1 });

        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(&student_token),
            Some(body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send_json(
            &app,
            "POST",
            &format!("/api/courses/{course_id}/modules"),
            Some(&other_token),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json["message"],
            "You do not have permission to modify this course"
        );
    }
}
