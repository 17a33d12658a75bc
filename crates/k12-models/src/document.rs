//! The contract every stored entity fulfils.
//!
//! An entity knows which collection it lives in, under which field it embeds
//! its own id, and how to produce a copy of itself carrying a store-assigned
//! id. Everything else about persistence lives in the repository layer.

use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use validator::Validate;

/// Collection names in the remote store.
pub mod collections {
    pub const USERS: &str = "users";
    pub const STUDENTS: &str = "students";
    pub const ATTENDANCE: &str = "attendance";
    pub const HOMEWORK: &str = "homework";
    pub const NOTICES: &str = "notices";
    pub const EXAMS: &str = "exams";
    pub const FEES: &str = "fees";
    pub const MESSAGES: &str = "messages";
}

pub trait Document: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static {
    type Id: Clone
        + Eq
        + fmt::Debug
        + fmt::Display
        + From<String>
        + AsRef<str>
        + Send
        + Sync
        + 'static;

    const COLLECTION: &'static str;

    /// Field under which the document embeds its own id.
    const ID_FIELD: &'static str;

    fn id(&self) -> &Self::Id;

    /// Copy of this record carrying `id`.
    fn with_id(self, id: Self::Id) -> Self;
}

macro_rules! impl_document {
    ($ty:ty, $id:ty, $collection:expr, $id_field:literal) => {
        impl $crate::document::Document for $ty {
            type Id = $id;

            const COLLECTION: &'static str = $collection;
            const ID_FIELD: &'static str = $id_field;

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn with_id(self, id: Self::Id) -> Self {
                Self { id, ..self }
            }
        }
    };
}

pub(crate) use impl_document;
