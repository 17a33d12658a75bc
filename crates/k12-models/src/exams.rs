use crate::document::{collections, impl_document};
use crate::ids::{ExamId, UserId, validate_required_id};
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Stored field names, for queries.
pub mod fields {
    pub const EXAM_ID: &str = "examId";
    pub const CLASS_NAME: &str = "className";
    pub const CREATED_AT: &str = "createdAt";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_marks"))]
pub struct Exam {
    #[serde(rename = "examId")]
    pub id: ExamId,
    #[validate(length(min = 1, max = 200))]
    pub exam_name: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub class_name: String,
    pub exam_date: chrono::NaiveDate,
    /// Display times as entered, e.g. "09:30".
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub total_marks: u32,
    pub passing_marks: u32,
    #[serde(default)]
    pub syllabus: String,
    #[validate(custom(function = "validate_required_id"))]
    pub created_by: UserId,
    pub created_at: i64,
}

impl_document!(Exam, ExamId, collections::EXAMS, "examId");

fn validate_marks(exam: &Exam) -> Result<(), ValidationError> {
    if exam.passing_marks > exam.total_marks {
        return Err(ValidationError::new("passing_marks")
            .with_message(Cow::Borrowed("passing marks cannot exceed total marks")));
    }
    Ok(())
}

impl Exam {
    pub fn new(
        exam_name: impl Into<String>,
        subject: impl Into<String>,
        class_name: impl Into<String>,
        exam_date: chrono::NaiveDate,
        total_marks: u32,
        passing_marks: u32,
        created_by: UserId,
    ) -> Self {
        Self {
            id: ExamId::empty(),
            exam_name: exam_name.into(),
            subject: subject.into(),
            class_name: class_name.into(),
            exam_date,
            start_time: String::new(),
            end_time: String::new(),
            total_marks,
            passing_marks,
            syllabus: String::new(),
            created_by,
            created_at: now_millis(),
        }
    }

    pub fn with_schedule(self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..self
        }
    }

    pub fn with_syllabus(self, syllabus: impl Into<String>) -> Self {
        Self {
            syllabus: syllabus.into(),
            ..self
        }
    }
}
