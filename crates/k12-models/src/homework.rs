use crate::document::{collections, impl_document};
use crate::ids::{HomeworkId, UserId, validate_required_id};
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored field names, for queries.
pub mod fields {
    pub const HOMEWORK_ID: &str = "homeworkId";
    pub const CLASS_NAME: &str = "className";
    pub const CREATED_AT: &str = "createdAt";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HomeworkStatus {
    #[default]
    Assigned,
    Submitted,
    Graded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    #[serde(rename = "homeworkId")]
    pub id: HomeworkId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub class_name: String,
    #[validate(custom(function = "validate_required_id"))]
    pub assigned_by: UserId,
    pub assigned_date: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub status: HomeworkStatus,
    pub created_at: i64,
}

impl_document!(Homework, HomeworkId, collections::HOMEWORK, "homeworkId");

impl Homework {
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        class_name: impl Into<String>,
        assigned_by: UserId,
        assigned_date: chrono::NaiveDate,
        due_date: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: HomeworkId::empty(),
            title: title.into(),
            description: String::new(),
            subject: subject.into(),
            class_name: class_name.into(),
            assigned_by,
            assigned_date,
            due_date,
            status: HomeworkStatus::Assigned,
            created_at: now_millis(),
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }
}
