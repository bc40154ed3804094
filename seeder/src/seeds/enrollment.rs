use crate::seed::Seeder;
use db::models::user::Role;
use db::models::{course, course_module, user};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use services::{enrollment, progress};

pub struct EnrollmentSeeder;

#[async_trait::async_trait]
impl Seeder for EnrollmentSeeder {
    async fn seed(&self, db: &DatabaseConnection, stats_db: &DatabaseConnection) {
        let students = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Student))
            .all(db)
            .await
            .expect("Failed to fetch students");
        let courses = course::Entity::find()
            .all(db)
            .await
            .expect("Failed to fetch courses");
        if courses.is_empty() {
            return;
        }

        for (i, student) in students.iter().enumerate() {
            let first = i % courses.len();
            let count = 1 + fastrand::usize(..2);
            for offset in 0..count {
                let course = &courses[(first + offset) % courses.len()];

                // Conflicts on a re-run are fine, the student is already in.
                if enrollment::enroll(db, stats_db, student.id, course.id)
                    .await
                    .is_err()
                {
                    continue;
                }

                let module_ids = course_module::Model::ids_for_course(db, course.id)
                    .await
                    .expect("Failed to fetch module ids");
                let completed = module_ids[..fastrand::usize(..=module_ids.len())].to_vec();
                if !completed.is_empty() {
                    let _ =
                        progress::set_progress(db, stats_db, student.id, course.id, completed).await;
                }
            }
        }
    }
}
