/*
 * Responsibility
 * - Topics の request/response DTO
 * - validate() は構造化された field error のリストを返す
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::repos::answer_repo::AnswerRow;
use crate::repos::topic_repo::{TopicDetailRow, TopicRow};

const TITLE_MIN_LEN: usize = 5;
const POST_MIN_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    NotAnswered,
    NotSolved,
    Solved,
    Closed,
}

impl TopicStatus {
    /// Rows store the status as text; anything unexpected reads as the
    /// initial state rather than failing the whole response.
    pub fn parse(value: &str) -> Self {
        match value {
            "NOT_SOLVED" => Self::NotSolved,
            "SOLVED" => Self::Solved,
            "CLOSED" => Self::Closed,
            _ => Self::NotAnswered,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
    pub post: String,
    #[serde(rename = "courseName")]
    pub course_name: String,
}

impl CreateTopicRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_title(&self.title, &mut errors);
        validate_post(&self.post, &mut errors);

        if self.course_name.trim().is_empty() {
            errors.push(FieldError {
                field: "courseName",
                message: "courseName is required",
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTopicRequest {
    pub title: String,
    pub post: String,
}

impl UpdateTopicRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_title(&self.title, &mut errors);
        validate_post(&self.post, &mut errors);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_title(title: &str, errors: &mut Vec<FieldError>) {
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: "title",
            message: "title is required",
        });
    } else if title.trim().chars().count() < TITLE_MIN_LEN {
        errors.push(FieldError {
            field: "title",
            message: "title must be at least 5 characters",
        });
    }
}

fn validate_post(post: &str, errors: &mut Vec<FieldError>) {
    if post.trim().is_empty() {
        errors.push(FieldError {
            field: "post",
            message: "post is required",
        });
    } else if post.trim().chars().count() < POST_MIN_LEN {
        errors.push(FieldError {
            field: "post",
            message: "post must be at least 10 characters",
        });
    }
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub title: String,
    pub post: String,
    pub created_at: DateTime<Utc>,
}

impl From<TopicRow> for TopicResponse {
    fn from(row: TopicRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            post: row.post,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: i64,
    pub post: String,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AnswerRow> for AnswerResponse {
    fn from(row: AnswerRow) -> Self {
        Self {
            id: row.id,
            post: row.post,
            author_name: row.author_name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicDetailResponse {
    pub id: i64,
    pub title: String,
    pub post: String,
    pub author_name: Option<String>,
    pub status: TopicStatus,
    pub answers: Vec<AnswerResponse>,
    pub created_at: DateTime<Utc>,
}

impl TopicDetailResponse {
    pub fn from_parts(topic: TopicDetailRow, answers: Vec<AnswerRow>) -> Self {
        Self {
            id: topic.id,
            title: topic.title,
            post: topic.post,
            author_name: topic.author_name,
            status: TopicStatus::parse(&topic.status),
            answers: answers.into_iter().map(AnswerResponse::from).collect(),
            created_at: topic.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(title: &str, post: &str, course_name: &str) -> CreateTopicRequest {
        CreateTopicRequest {
            title: title.to_string(),
            post: post.to_string(),
            course_name: course_name.to_string(),
        }
    }

    #[test]
    fn valid_create_request_passes() {
        let req = create_request("Borrow checker", "Why does this not compile?", "Rust");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn short_title_and_post_are_both_reported() {
        let req = create_request("Hey", "too short", "Rust");

        let errors = req.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "post"]);
    }

    #[test]
    fn missing_course_name_is_reported() {
        let req = create_request("Borrow checker", "Why does this not compile?", "  ");

        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "courseName");
    }

    #[test]
    fn update_request_requires_both_fields() {
        let req = UpdateTopicRequest {
            title: "".to_string(),
            post: "".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "post"]);
    }

    #[test]
    fn unknown_status_text_reads_as_not_answered() {
        assert_eq!(TopicStatus::parse("SOLVED"), TopicStatus::Solved);
        assert_eq!(TopicStatus::parse("bogus"), TopicStatus::NotAnswered);
    }
}
