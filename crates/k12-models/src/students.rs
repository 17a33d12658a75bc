//! Student records.

use crate::document::{collections, impl_document};
use crate::ids::{StudentId, UserId};
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored field names, for queries.
pub mod fields {
    pub const STUDENT_ID: &str = "studentId";
    pub const CLASS_NAME: &str = "className";
    pub const ROLL_NUMBER: &str = "rollNumber";
    pub const PARENT_ID: &str = "parentId";
}

/// A student enrolled in a class.
///
/// The roll number is a display string. Ordering by it is lexicographic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "studentId")]
    pub id: StudentId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub class_name: String,
    #[validate(length(min = 1, max = 10))]
    pub roll_number: String,
    /// Empty until a parent account is linked.
    #[serde(default)]
    pub parent_id: UserId,
    #[serde(default)]
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub created_at: i64,
}

impl_document!(Student, StudentId, collections::STUDENTS, "studentId");

impl Student {
    pub fn new(
        name: impl Into<String>,
        class_name: impl Into<String>,
        roll_number: impl Into<String>,
    ) -> Self {
        Self {
            id: StudentId::empty(),
            name: name.into(),
            class_name: class_name.into(),
            roll_number: roll_number.into(),
            parent_id: UserId::empty(),
            date_of_birth: None,
            created_at: now_millis(),
        }
    }

    pub fn with_parent(self, parent_id: UserId) -> Self {
        Self { parent_id, ..self }
    }

    pub fn with_date_of_birth(self, date_of_birth: chrono::NaiveDate) -> Self {
        Self {
            date_of_birth: Some(date_of_birth),
            ..self
        }
    }
}
