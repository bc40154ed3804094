use crate::seed::Seeder;
use db::models::user::{Model, Role};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use sea_orm::DatabaseConnection;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection, _stats_db: &DatabaseConnection) {
        // Fixed logins for local development
        let _ = Model::create(
            db,
            "Test Student",
            "student@test.com",
            "password123",
            Role::Student,
        )
        .await;
        let _ = Model::create(
            db,
            "Test Instructor",
            "instructor@test.com",
            "password123",
            Role::Instructor,
        )
        .await;
        let _ = Model::create(db, "Test Admin", "admin@test.com", "password123", Role::Admin).await;

        // Random student accounts
        for _ in 0..10 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let _ = Model::create(db, &name, &email, "password123", Role::Student).await;
        }
    }
}
