use crate::seed::Seeder;
use db::models::{course, course_module, user};
use db::stats::course_stats;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct CourseSeeder;

const COURSES: &[(&str, &str)] = &[
    (
        "Intro to Programming",
        "Variables, control flow, and a first taste of debugging.",
    ),
    (
        "Data Structures",
        "Lists, trees, and maps, and when each one earns its keep.",
    ),
    (
        "Databases",
        "Relational modelling, SQL, and what transactions actually promise.",
    ),
    (
        "Operating Systems",
        "Processes, scheduling, and memory management.",
    ),
    ("Computer Networks", "From sockets up to routing."),
];

const MODULE_TOPICS: &[&str] = &[
    "Getting Started",
    "Core Concepts",
    "Worked Examples",
    "Common Pitfalls",
    "Review and Practice",
];

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection, stats_db: &DatabaseConnection) {
        let instructor = user::Entity::find()
            .filter(user::Column::Email.eq("instructor@test.com"))
            .one(db)
            .await
            .expect("Failed to fetch instructor")
            .expect("Instructor user is not seeded");

        for (title, description) in COURSES {
            let course = course::Model::create(db, title, description, instructor.id)
                .await
                .expect("Failed to create course");

            let module_count = 2 + fastrand::usize(..4);
            for order in 1..=module_count {
                let topic = MODULE_TOPICS[(order - 1) % MODULE_TOPICS.len()];
                let video_url = if fastrand::bool() {
                    Some(format!(
                        "https://videos.learnpath.test/{}/{}",
                        course.id, order
                    ))
                } else {
                    None
                };
                let resources = vec![format!(
                    "https://cdn.learnpath.test/{}/notes-{}.pdf",
                    course.id, order
                )];

                let _ = course_module::Model::create(
                    db,
                    course.id,
                    &format!("{order}. {topic}"),
                    &format!("Auto seeded content for {topic}."),
                    order as i32,
                    video_url,
                    resources,
                )
                .await;
            }

            let _ = course_stats::Model::init(stats_db, course.id).await;
        }
    }
}
