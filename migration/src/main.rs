use migration::{Migrator, StatsMigrator};
use sea_orm_migration::MigratorTrait;
use std::{env, fs, path::Path};

mod runner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "data/entities.db".into());
    let stats_path = env::var("STATS_DATABASE_PATH").unwrap_or_else(|_| "data/stats.db".into());
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
            remove_db_file(&stats_path);
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            remove_db_file(&stats_path);
            run_both(&db_path, &stats_path).await;
        }
        _ => {
            run_both(&db_path, &stats_path).await;
        }
    }
}

async fn run_both(db_path: &str, stats_path: &str) {
    create_db_dir(db_path);
    create_db_dir(stats_path);

    let db_url = format!("sqlite://{}?mode=rwc", db_path);
    let stats_url = format!("sqlite://{}?mode=rwc", stats_path);

    println!("Entity store: {}", db_path);
    runner::run_all_migrations(&db_url, Migrator::migrations()).await;

    println!("Stats store: {}", stats_path);
    runner::run_all_migrations(&stats_url, StatsMigrator::migrations()).await;
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).expect("Failed to create DB directory");
    }
}
