use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author_name: String,
    pub body: String,
    pub created_by: String, // owner's email
    pub created_date: Date,
    pub updated_datetime: Option<OffsetDateTime>,
}

impl Blog {
    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, author_name, body, created_by, created_date, updated_datetime
            FROM blogs
            ORDER BY created_date DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, author_name, body, created_by, created_date, updated_datetime
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(blog)
    }

    pub async fn find_by_title(db: &PgPool, title: &str) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, author_name, body, created_by, created_date, updated_datetime
            FROM blogs
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_optional(db)
        .await?;
        Ok(blog)
    }

    /// Uniqueness of (title, author_name) is enforced by the database
    /// constraint; callers map the violation to Conflict.
    pub async fn create(
        db: &PgPool,
        title: &str,
        author_name: &str,
        body: &str,
        created_by: &str,
    ) -> anyhow::Result<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (title, author_name, body, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author_name, body, created_by, created_date, updated_datetime
            "#,
        )
        .bind(title)
        .bind(author_name)
        .bind(body)
        .bind(created_by)
        .fetch_one(db)
        .await?;
        Ok(blog)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        title: &str,
        author_name: &str,
        body: &str,
    ) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title = $2, author_name = $3, body = $4, updated_datetime = now()
            WHERE id = $1
            RETURNING id, title, author_name, body, created_by, created_date, updated_datetime
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(author_name)
        .bind(body)
        .fetch_optional(db)
        .await?;
        Ok(blog)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
