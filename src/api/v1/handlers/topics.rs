/*
 * Responsibility
 * - /topic 系 CRUD handler
 * - DTO validation → repo 呼び出し → response DTO への変換
 * - 作成時の author は AuthCtx (認証済み identity) から取る
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    api::v1::{
        dto::{
            page::Page,
            topics::{
                CreateTopicRequest, TopicDetailResponse, TopicResponse, UpdateTopicRequest,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::{AppError, FieldError},
    repos::{answer_repo, course_repo, topic_repo},
    state::AppState,
};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListTopicsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(rename = "courseName")]
    pub course_name: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl ListTopicsQuery {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.page < 1 {
            errors.push(FieldError {
                field: "page",
                message: "page must be >= 1",
            });
        }
        if self.limit < 1 || self.limit > MAX_LIMIT {
            errors.push(FieldError {
                field: "limit",
                message: "limit must be 1-100",
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

pub async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<ListTopicsQuery>,
) -> Result<Json<Page<TopicResponse>>, AppError> {
    query.validate().map_err(AppError::Validation)?;

    let course = query.course_name.as_deref();
    let offset = (query.page - 1) * query.limit;

    let rows = topic_repo::list(&state.db, course, query.limit, offset).await?;
    let total = topic_repo::count(&state.db, course).await?;

    let items = rows.into_iter().map(TopicResponse::from).collect();

    Ok(Json(Page::new(items, total, query.page, query.limit)))
}

pub async fn create_topic(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<TopicResponse>), AppError> {
    req.validate().map_err(AppError::Validation)?;

    let course = course_repo::find_by_name(&state.db, req.course_name.trim())
        .await?
        .ok_or_else(|| {
            AppError::Validation(vec![FieldError {
                field: "courseName",
                message: "unknown course",
            }])
        })?;

    let row = topic_repo::create(&state.db, req.title.trim(), req.post.trim(), ctx.user_id, course.id)
        .await?;

    Ok((StatusCode::CREATED, Json(TopicResponse::from(row))))
}

pub async fn get_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> Result<Json<TopicDetailResponse>, AppError> {
    let topic = topic_repo::get_detail(&state.db, topic_id)
        .await?
        .ok_or_else(|| AppError::not_found("topic"))?;

    let answers = answer_repo::list_by_topic(&state.db, topic_id).await?;

    Ok(Json(TopicDetailResponse::from_parts(topic, answers)))
}

pub async fn update_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Json(req): Json<UpdateTopicRequest>,
) -> Result<Json<TopicResponse>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let row = topic_repo::update(&state.db, topic_id, req.title.trim(), req.post.trim())
        .await?
        .ok_or_else(|| AppError::not_found("topic"))?;

    Ok(Json(TopicResponse::from(row)))
}

pub async fn delete_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = topic_repo::delete(&state.db, topic_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("topic"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_rejects_out_of_range_paging() {
        let query = ListTopicsQuery {
            page: 0,
            limit: 500,
            course_name: None,
        };

        let errors = query.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["page", "limit"]);
    }

    #[test]
    fn list_query_defaults_are_valid() {
        let query = ListTopicsQuery {
            page: default_page(),
            limit: default_limit(),
            course_name: None,
        };
        assert!(query.validate().is_ok());
    }
}
