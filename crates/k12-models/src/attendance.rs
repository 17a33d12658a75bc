//! Attendance records.
//!
//! Each submission creates a new record; corrections are new records too.

use crate::document::{collections, impl_document};
use crate::ids::{AttendanceId, StudentId, UserId, validate_required_id};
use crate::students::Student;
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored field names, for queries.
pub mod fields {
    pub const ATTENDANCE_ID: &str = "attendanceId";
    pub const STUDENT_ID: &str = "studentId";
    pub const CLASS_NAME: &str = "className";
    pub const CREATED_AT: &str = "createdAt";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    HalfDay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[serde(rename = "attendanceId")]
    pub id: AttendanceId,
    #[validate(custom(function = "validate_required_id"))]
    pub student_id: StudentId,
    pub student_name: String,
    #[validate(length(min = 1))]
    pub class_name: String,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    /// Teacher who took the register.
    #[validate(custom(function = "validate_required_id"))]
    pub marked_by: UserId,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub remarks: String,
    pub created_at: i64,
}

impl_document!(Attendance, AttendanceId, collections::ATTENDANCE, "attendanceId");

impl Attendance {
    /// Register entry for `student` on `date`, filed under the student's class.
    pub fn for_student(
        student: &Student,
        date: chrono::NaiveDate,
        status: AttendanceStatus,
        marked_by: UserId,
    ) -> Self {
        Self {
            id: AttendanceId::empty(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            class_name: student.class_name.clone(),
            date,
            status,
            marked_by,
            remarks: String::new(),
            created_at: now_millis(),
        }
    }

    pub fn with_remarks(self, remarks: impl Into<String>) -> Self {
        Self {
            remarks: remarks.into(),
            ..self
        }
    }
}
