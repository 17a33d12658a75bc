//! Inbound push notification payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Data key naming the kind of record a push refers to.
pub const TYPE_KEY: &str = "type";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Message,
    Attendance,
    Homework,
    Notice,
    Unknown,
}

impl NotificationKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "message" => Self::Message,
            "attendance" => Self::Attendance,
            "homework" => Self::Homework,
            "notice" => Self::Notice,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Attendance => "attendance",
            Self::Homework => "homework",
            Self::Notice => "notice",
            Self::Unknown => "unknown",
        }
    }
}

impl PushMessage {
    pub fn kind(&self) -> NotificationKind {
        self.data
            .get(TYPE_KEY)
            .map(|value| NotificationKind::parse(value))
            .unwrap_or(NotificationKind::Unknown)
    }

    /// Title shown when the sender left it blank.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("K12 Notification")
    }
}
