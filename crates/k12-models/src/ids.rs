//! Strongly-typed document id newtypes.
//!
//! Every entity is keyed by a store-assigned string. Wrapping it per entity
//! keeps a `StudentId` from being passed where a `UserId` is expected. A
//! freshly constructed entity carries an empty id until the store assigns one.
//!
//! # Example
//!
//! ```ignore
//! use k12_models::ids::{StudentId, UserId};
//!
//! fn load_student(id: &StudentId) { /* ... */ }
//!
//! let student_id = StudentId::new("hK3b9Qz");
//! load_student(&student_id);
//! // load_student(&UserId::new("hK3b9Qz")); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::ValidationError;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing store key.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The placeholder carried before the store assigns a key.
            #[inline]
            pub fn empty() -> Self {
                Self(String::new())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Key of a `users/{id}` document; equals the auth provider's uid.
    UserId
);

define_id!(
    /// Key of a `students/{id}` document.
    StudentId
);

define_id!(
    /// Key of an `attendance/{id}` document.
    AttendanceId
);

define_id!(
    /// Key of a `homework/{id}` document.
    HomeworkId
);

define_id!(
    /// Key of a `notices/{id}` document.
    NoticeId
);

define_id!(
    /// Key of an `exams/{id}` document.
    ExamId
);

define_id!(
    /// Key of a `fees/{id}` document.
    FeeId
);

define_id!(
    /// Key of a `messages/{id}` document.
    MessageId
);

/// Validator hook for id fields that must reference an existing record.
pub fn validate_required_id<T: AsRef<str>>(id: &T) -> Result<(), ValidationError> {
    if id.as_ref().trim().is_empty() {
        return Err(ValidationError::new("required_id")
            .with_message(Cow::Borrowed("must reference an existing record")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_id_is_empty() {
        assert!(StudentId::default().is_empty());
        assert!(StudentId::empty().is_empty());
        assert!(!StudentId::new("abc").is_empty());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = UserId::new("uid-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uid-123\"");
        let parsed: UserId = serde_json::from_str("\"uid-123\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_debug_names_the_type() {
        assert_eq!(format!("{:?}", FeeId::new("f1")), "FeeId(\"f1\")");
    }

    #[test]
    fn test_validate_required_id() {
        assert!(validate_required_id(&StudentId::new("s1")).is_ok());
        assert!(validate_required_id(&StudentId::empty()).is_err());
        assert!(validate_required_id(&UserId::new("  ")).is_err());
    }
}
