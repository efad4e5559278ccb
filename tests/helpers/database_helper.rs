//! Test database helper utilities
//!
//! Database tests run against `TEST_DATABASE_URL` and are skipped when it is
//! not set. Each test starts from empty tables.

use std::sync::Once;
use sqlx::PgPool;
use SchoolDesk::database::{run_migrations, DatabaseService};

static INIT: Once = Once::new();

pub struct TestDatabase {
    pub pool: PgPool,
    pub service: DatabaseService,
}

impl TestDatabase {
    /// Connect, migrate and truncate; `None` when no test database is configured
    pub async fn connect() -> Option<Self> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });

        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL not set, skipping database test");
                return None;
            }
        };

        let pool = PgPool::connect(&url).await.expect("Failed to connect to test database");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let db = Self {
            service: DatabaseService::new(pool.clone()),
            pool,
        };
        db.truncate().await;
        Some(db)
    }

    pub async fn truncate(&self) {
        sqlx::query(
            "TRUNCATE class_registrations, subscriptions, classes, students, parents RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await
        .expect("Failed to truncate tables");
    }
}
