//! Parent repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::parent::{Parent, CreateParentRequest, UpdateParentRequest};
use crate::utils::errors::SchoolDeskError;

#[derive(Clone, Debug)]
pub struct ParentRepository {
    pool: PgPool,
}

impl ParentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new parent
    pub async fn create(&self, request: CreateParentRequest) -> Result<Parent, SchoolDeskError> {
        let parent = sqlx::query_as::<_, Parent>(
            r#"
            INSERT INTO parents (name, phone, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, name, phone, email, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.phone)
        .bind(request.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(parent)
    }

    /// Find parent by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Parent>, SchoolDeskError> {
        let parent = sqlx::query_as::<_, Parent>(
            "SELECT id, name, phone, email, created_at, updated_at FROM parents WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(parent)
    }

    /// Update parent; absent fields keep their value
    pub async fn update(&self, id: i64, request: UpdateParentRequest) -> Result<Option<Parent>, SchoolDeskError> {
        let parent = sqlx::query_as::<_, Parent>(
            r#"
            UPDATE parents
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                updated_at = $5
            WHERE id = $1
            RETURNING id, name, phone, email, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.phone)
        .bind(request.email)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(parent)
    }

    /// List all parents
    pub async fn list(&self) -> Result<Vec<Parent>, SchoolDeskError> {
        let parents = sqlx::query_as::<_, Parent>(
            "SELECT id, name, phone, email, created_at, updated_at FROM parents ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(parents)
    }
}
