use crate::document::{collections, impl_document};
use crate::ids::{FeeId, StudentId, validate_required_id};
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored field names, for queries.
pub mod fields {
    pub const FEE_ID: &str = "feeId";
    pub const STUDENT_ID: &str = "studentId";
    pub const CREATED_AT: &str = "createdAt";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    PartiallyPaid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    #[serde(rename = "feeId")]
    pub id: FeeId,
    #[validate(custom(function = "validate_required_id"))]
    pub student_id: StudentId,
    pub student_name: String,
    pub class_name: String,
    /// Tuition, Transport, and so on.
    #[validate(length(min = 1))]
    pub fee_type: String,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    pub due_date: chrono::NaiveDate,
    pub status: FeeStatus,
    #[serde(default)]
    pub payment_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub remarks: String,
    pub created_at: i64,
}

impl_document!(Fee, FeeId, collections::FEES, "feeId");

impl Fee {
    pub fn new(
        student_id: StudentId,
        student_name: impl Into<String>,
        class_name: impl Into<String>,
        fee_type: impl Into<String>,
        amount: f64,
        due_date: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: FeeId::empty(),
            student_id,
            student_name: student_name.into(),
            class_name: class_name.into(),
            fee_type: fee_type.into(),
            amount,
            due_date,
            status: FeeStatus::Pending,
            payment_date: None,
            remarks: String::new(),
            created_at: now_millis(),
        }
    }

    /// Record of a payment made on `payment_date`.
    pub fn paid_on(self, payment_date: chrono::NaiveDate) -> Self {
        Self {
            status: FeeStatus::Paid,
            payment_date: Some(payment_date),
            ..self
        }
    }
}
