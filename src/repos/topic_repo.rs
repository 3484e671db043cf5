/*
 * Responsibility
 * - topics テーブル向け SQLx 操作 (CRUD + ページング)
 * - courseName フィルタは courses との JOIN で解決
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub title: String,
    pub post: String,
    pub status: String,
    pub user_id: Option<i64>,
    pub course_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Detail projection: topic joined with its (possibly deleted) author.
#[derive(Debug, Clone, FromRow)]
pub struct TopicDetailRow {
    pub id: i64,
    pub title: String,
    pub post: String,
    pub status: String,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn list(
    db: &PgPool,
    course_name: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<TopicRow>, RepoError> {
    let rows = match course_name {
        Some(name) => {
            sqlx::query_as::<_, TopicRow>(
                r#"
                SELECT t.id, t.title, t.post, t.status, t.user_id, t.course_id, t.created_at
                FROM topics t
                JOIN courses c ON c.id = t.course_id
                WHERE c.name = $1
                ORDER BY t.created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(name)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, TopicRow>(
                r#"
                SELECT id, title, post, status, user_id, course_id, created_at
                FROM topics
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?
        }
    };

    Ok(rows)
}

pub async fn count(db: &PgPool, course_name: Option<&str>) -> Result<i64, RepoError> {
    let total = match course_name {
        Some(name) => {
            sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM topics t
                JOIN courses c ON c.id = t.course_id
                WHERE c.name = $1
                "#,
            )
            .bind(name)
            .fetch_one(db)
            .await?
        }
        None => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM topics")
                .fetch_one(db)
                .await?
        }
    };

    Ok(total)
}

pub async fn create(
    db: &PgPool,
    title: &str,
    post: &str,
    user_id: i64,
    course_id: i64,
) -> Result<TopicRow, RepoError> {
    let row = sqlx::query_as::<_, TopicRow>(
        r#"
        INSERT INTO topics (title, post, user_id, course_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, post, status, user_id, course_id, created_at
        "#,
    )
    .bind(title)
    .bind(post)
    .bind(user_id)
    .bind(course_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get_detail(db: &PgPool, topic_id: i64) -> Result<Option<TopicDetailRow>, RepoError> {
    let row = sqlx::query_as::<_, TopicDetailRow>(
        r#"
        SELECT t.id, t.title, t.post, t.status, u.name AS author_name, t.created_at
        FROM topics t
        LEFT JOIN users u ON u.id = t.user_id
        WHERE t.id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    topic_id: i64,
    title: &str,
    post: &str,
) -> Result<Option<TopicRow>, RepoError> {
    let row = sqlx::query_as::<_, TopicRow>(
        r#"
        UPDATE topics
        SET title = $2,
            post = $3
        WHERE id = $1
        RETURNING id, title, post, status, user_id, course_id, created_at
        "#,
    )
    .bind(topic_id)
    .bind(title)
    .bind(post)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, topic_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM topics
        WHERE id = $1
        "#,
    )
    .bind(topic_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
