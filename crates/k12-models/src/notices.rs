//! School notices.
//!
//! A notice targets either everyone (`"ALL"`) or a single class by name.

use crate::document::{collections, impl_document};
use crate::ids::{NoticeId, UserId, validate_required_id};
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Audience value for notices shown to every class.
pub const AUDIENCE_ALL: &str = "ALL";

/// Stored field names, for queries.
pub mod fields {
    pub const NOTICE_ID: &str = "noticeId";
    pub const TARGET_AUDIENCE: &str = "targetAudience";
    pub const CREATED_AT: &str = "createdAt";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticePriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(rename = "noticeId")]
    pub id: NoticeId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub target_audience: String,
    /// Set for class-specific notices.
    #[serde(default)]
    pub class_name: String,
    #[validate(custom(function = "validate_required_id"))]
    pub posted_by: UserId,
    pub posted_date: chrono::NaiveDate,
    pub priority: NoticePriority,
    pub created_at: i64,
}

impl_document!(Notice, NoticeId, collections::NOTICES, "noticeId");

impl Notice {
    /// A notice for every class.
    pub fn for_all(
        title: impl Into<String>,
        description: impl Into<String>,
        posted_by: UserId,
        posted_date: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: NoticeId::empty(),
            title: title.into(),
            description: description.into(),
            target_audience: AUDIENCE_ALL.to_string(),
            class_name: String::new(),
            posted_by,
            posted_date,
            priority: NoticePriority::Normal,
            created_at: now_millis(),
        }
    }

    /// A notice only `class_name` sees.
    pub fn for_class(
        title: impl Into<String>,
        description: impl Into<String>,
        class_name: impl Into<String>,
        posted_by: UserId,
        posted_date: chrono::NaiveDate,
    ) -> Self {
        let class_name = class_name.into();
        Self {
            target_audience: class_name.clone(),
            class_name,
            ..Self::for_all(title, description, posted_by, posted_date)
        }
    }

    pub fn with_priority(self, priority: NoticePriority) -> Self {
        Self { priority, ..self }
    }

    pub fn is_for_everyone(&self) -> bool {
        self.target_audience == AUDIENCE_ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn posted() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    #[test]
    fn test_for_class_targets_class_name() {
        let notice = Notice::for_class(
            "Sports day",
            "Bring white uniform",
            "Class 3",
            UserId::new("t1"),
            posted(),
        );

        assert_eq!(notice.target_audience, "Class 3");
        assert_eq!(notice.class_name, "Class 3");
        assert!(!notice.is_for_everyone());
    }

    #[test]
    fn test_for_all_wire_format() {
        let notice = Notice::for_all("Holiday", "School closed", UserId::new("t1"), posted())
            .with_priority(NoticePriority::Urgent);
        let json = serde_json::to_value(&notice).unwrap();

        assert_eq!(json[fields::TARGET_AUDIENCE], AUDIENCE_ALL);
        assert_eq!(json["priority"], "URGENT");
        assert!(notice.validate().is_ok());
    }
}
