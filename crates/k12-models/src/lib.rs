//! # K12 Models
//!
//! Domain models and DTOs for the K12 client.
//!
//! Every stored entity is an immutable value record implementing
//! [`Document`]: it is constructed with an empty id and a creation timestamp,
//! and the repository layer returns the store-assigned id after the write.
//! Documents use camelCase field names and embed their own id
//! (`studentId`, `attendanceId`, ...).
//!
//! # Modules
//!
//! - [`attendance`]: Attendance records and statuses
//! - [`auth`]: Login/registration DTOs and the signed-in [`UserHandle`]
//! - [`document`]: The [`Document`] trait and collection names
//! - [`exams`], [`fees`], [`homework`], [`notices`]: Class records
//! - [`ids`]: Per-entity id newtypes
//! - [`messages`]: Parent/teacher messages
//! - [`notifications`]: Inbound push payloads
//! - [`students`]: Student records
//! - [`users`]: User profiles and roles
//! - [`value_types`]: Validated primitives such as [`Email`]
//!
//! # Example
//!
//! ```ignore
//! use k12_models::{Document, Student};
//!
//! let student = Student::new("Aarav Kumar", "Class 1", "1");
//! assert!(student.id().is_empty());
//! assert_eq!(Student::COLLECTION, "students");
//! ```

pub mod attendance;
pub mod auth;
pub mod document;
pub mod exams;
pub mod fees;
pub mod homework;
pub mod ids;
pub mod messages;
pub mod notices;
pub mod notifications;
pub mod students;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use attendance::{Attendance, AttendanceStatus};
pub use auth::{LoginRequest, RegisterRequest, UserHandle};
pub use document::{Document, collections};
pub use exams::Exam;
pub use fees::{Fee, FeeStatus};
pub use homework::{Homework, HomeworkStatus};
pub use ids::{AttendanceId, ExamId, FeeId, HomeworkId, MessageId, NoticeId, StudentId, UserId};
pub use messages::{Message, conversation_key};
pub use notices::{AUDIENCE_ALL, Notice, NoticePriority};
pub use notifications::{NotificationKind, PushMessage};
pub use students::Student;
pub use users::{User, UserRole};
pub use value_types::{Email, ValueTypeError};
