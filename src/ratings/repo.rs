use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Per-user rating of a blog, referencing the blog by title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: Uuid,
    pub rating: i32,
    pub email: String, // the rater
    pub blog_name: String,
}

impl Rating {
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Rating>> {
        let rows = sqlx::query_as::<_, Rating>(
            r#"
            SELECT id, rating, email, blog_name
            FROM ratings
            ORDER BY blog_name, email
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_blog_name(db: &PgPool, blog_name: &str) -> anyhow::Result<Vec<Rating>> {
        let rows = sqlx::query_as::<_, Rating>(
            r#"
            SELECT id, rating, email, blog_name
            FROM ratings
            WHERE blog_name = $1
            ORDER BY email
            "#,
        )
        .bind(blog_name)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_blog_and_email(
        db: &PgPool,
        blog_name: &str,
        email: &str,
    ) -> anyhow::Result<Option<Rating>> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            SELECT id, rating, email, blog_name
            FROM ratings
            WHERE blog_name = $1 AND email = $2
            LIMIT 1
            "#,
        )
        .bind(blog_name)
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(rating)
    }

    pub async fn find_any_by_blog_name(
        db: &PgPool,
        blog_name: &str,
    ) -> anyhow::Result<Option<Rating>> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            SELECT id, rating, email, blog_name
            FROM ratings
            WHERE blog_name = $1
            LIMIT 1
            "#,
        )
        .bind(blog_name)
        .fetch_optional(db)
        .await?;
        Ok(rating)
    }

    pub async fn create(
        db: &PgPool,
        rating: i32,
        email: &str,
        blog_name: &str,
    ) -> anyhow::Result<Rating> {
        let row = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (rating, email, blog_name)
            VALUES ($1, $2, $3)
            RETURNING id, rating, email, blog_name
            "#,
        )
        .bind(rating)
        .bind(email)
        .bind(blog_name)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update_value(db: &PgPool, id: Uuid, rating: i32) -> anyhow::Result<Rating> {
        let row = sqlx::query_as::<_, Rating>(
            r#"
            UPDATE ratings
            SET rating = $2
            WHERE id = $1
            RETURNING id, rating, email, blog_name
            "#,
        )
        .bind(id)
        .bind(rating)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
