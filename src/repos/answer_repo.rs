/*
 * Responsibility
 * - answers テーブル向け SQLx 操作
 * - topic 詳細表示のための読み取りのみ
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct AnswerRow {
    pub id: i64,
    pub post: String,
    pub resolved: bool,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn list_by_topic(db: &PgPool, topic_id: i64) -> Result<Vec<AnswerRow>, RepoError> {
    let rows = sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT a.id, a.post, a.resolved, u.name AS author_name, a.created_at
        FROM answers a
        LEFT JOIN users u ON u.id = a.user_id
        WHERE a.topic_id = $1
        ORDER BY a.created_at ASC
        "#,
    )
    .bind(topic_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
