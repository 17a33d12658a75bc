//! User profile documents and roles.
//!
//! A profile lives at `users/{uid}` where `uid` is the id the auth provider
//! assigned at registration. The role picks the dashboard after login.

use crate::document::{collections, impl_document};
use crate::ids::{StudentId, UserId};
use crate::value_types::Email;
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Stored field names, for queries.
pub mod fields {
    pub const USER_ID: &str = "userId";
    pub const ROLE: &str = "role";
    pub const CLASS_NAME: &str = "className";
    pub const DEVICE_TOKEN: &str = "deviceToken";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Parent,
    Teacher,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("Parent"),
            Self::Teacher => f.write_str("Teacher"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userId")]
    pub id: UserId,
    pub email: Email,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub role: UserRole,
    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,
    /// Children of a parent account.
    #[serde(default)]
    pub student_ids: Vec<StudentId>,
    /// Class a teacher account is responsible for.
    #[serde(default)]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
    pub created_at: i64,
}

impl_document!(User, UserId, collections::USERS, "userId");

impl User {
    pub fn new(
        email: Email,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: UserId::empty(),
            email,
            name: name.into(),
            role,
            phone_number: phone_number.into(),
            student_ids: Vec::new(),
            class_name: String::new(),
            device_token: None,
            created_at: now_millis(),
        }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Email::new("parent@example.com").unwrap(),
            "Priya Sharma",
            "+91 98765 43210",
            UserRole::Parent,
        )
    }

    #[test]
    fn test_new_user_has_empty_id() {
        let user = sample_user();
        assert!(user.id.is_empty());
        assert!(user.created_at > 0);
    }

    #[test]
    fn test_user_document_shape() {
        let user = User {
            class_name: "Class 2".to_string(),
            ..sample_user()
        };
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["userId"], "");
        assert_eq!(json["role"], "PARENT");
        assert_eq!(json["phoneNumber"], "+91 98765 43210");
        assert_eq!(json[fields::CLASS_NAME], "Class 2");
        assert!(json.get("deviceToken").is_none());
    }

    #[test]
    fn test_user_deserializes_with_missing_optional_fields() {
        let json = serde_json::json!({
            "userId": "u1",
            "email": "teacher@school.org",
            "name": "Anil Rao",
            "role": "TEACHER",
            "phoneNumber": "555-0100",
            "createdAt": 1_700_000_000_000_i64
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert!(user.is_teacher());
        assert!(user.student_ids.is_empty());
        assert_eq!(user.class_name, "");
    }

    #[test]
    fn test_user_validation() {
        assert!(sample_user().validate().is_ok());

        let nameless = User {
            name: String::new(),
            ..sample_user()
        };
        assert!(nameless.validate().is_err());
    }
}
