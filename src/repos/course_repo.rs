/*
 * Responsibility
 * - courses テーブル向け SQLx 操作
 * - topic 作成時の courseName 解決に使う
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub name: String,
    pub category: String,
}

pub async fn find_by_name(db: &PgPool, name: &str) -> Result<Option<CourseRow>, RepoError> {
    let row = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT id, name, category
        FROM courses
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
