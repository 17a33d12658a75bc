//! Authentication request DTOs and the signed-in identity handle.

use crate::ids::{StudentId, UserId};
use crate::users::{User, UserRole};
use crate::value_types::Email;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The identity the auth provider reports for a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHandle {
    pub uid: UserId,
    pub email: Email,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"), email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into().trim().to_string(),
        }
    }
}

/// Everything the registration form collects.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"), email)]
    pub email: String,
    #[validate(length(min = 1, max = 20, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    pub role: UserRole,
    /// Teachers name the class they teach.
    #[serde(default)]
    pub class_name: String,
    /// Parents may link existing student records.
    #[serde(default)]
    pub student_ids: Vec<StudentId>,
}

impl RegisterRequest {
    /// Strips surrounding whitespace from every text field, passwords included.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            password: self.password.trim().to_string(),
            confirm_password: self.confirm_password.trim().to_string(),
            class_name: self.class_name.trim().to_string(),
            ..self
        }
    }

    /// Profile document for the account `uid` once the auth provider created it.
    pub fn into_profile(self, uid: UserId, email: Email) -> User {
        let mut user = User::new(email, self.name, self.phone_number, self.role);
        user.class_name = self.class_name;
        user.student_ids = self.student_ids;
        User { id: uid, ..user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Anil Rao".to_string(),
            email: "teacher@school.org".to_string(),
            phone_number: "555-0100".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
            role: UserRole::Teacher,
            class_name: "Class 3".to_string(),
            student_ids: Vec::new(),
        }
    }

    #[test]
    fn test_login_request_validation() {
        assert!(LoginRequest::new("parent@example.com", "secret123").validate().is_ok());
        assert!(LoginRequest::new("", "secret123").validate().is_err());
        assert!(LoginRequest::new("parent@example.com", "").validate().is_err());
        assert!(LoginRequest::new("not-an-email", "secret123").validate().is_err());
    }

    #[test]
    fn test_login_request_trims_email_and_password() {
        let request = LoginRequest::new("  parent@example.com ", " secret123 ");
        assert_eq!(request.email, "parent@example.com");
        assert_eq!(request.password, "secret123");
    }

    #[test]
    fn test_register_request_trimmed() {
        let request = RegisterRequest {
            name: " Anil Rao ".to_string(),
            password: "secret123 ".to_string(),
            confirm_password: " secret123".to_string(),
            ..register_request()
        }
        .trimmed();

        assert_eq!(request.name, "Anil Rao");
        assert_eq!(request.password, "secret123");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register_request().validate().is_ok());
    }

    #[test]
    fn test_register_request_password_mismatch() {
        let request = RegisterRequest {
            confirm_password: "different".to_string(),
            ..register_request()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_register_request_missing_phone() {
        let request = RegisterRequest {
            phone_number: String::new(),
            ..register_request()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_profile_keys_by_uid() {
        let email = Email::new("teacher@school.org").unwrap();
        let user = register_request().into_profile(UserId::new("uid-9"), email.clone());

        assert_eq!(user.id, UserId::new("uid-9"));
        assert_eq!(user.email, email);
        assert_eq!(user.role, UserRole::Teacher);
        assert_eq!(user.class_name, "Class 3");
    }
}
