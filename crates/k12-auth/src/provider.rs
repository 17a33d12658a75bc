//! The authentication service the session manager talks to.

use serde::{Deserialize, Serialize};
use std::future::Future;

use k12_models::{Email, UserHandle, UserId};

use crate::error::AuthError;

/// Remote authentication service.
///
/// A provider keeps at most one signed-in account. `sign_in` and
/// `create_account` both leave the new account signed in.
pub trait AuthProvider: Send + Sync {
    fn sign_in(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send;

    /// Creates an account and signs it in.
    fn create_account(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send;

    /// The signed-in account, if any. Never touches the network.
    fn current_user(&self) -> Option<UserHandle>;

    /// Ends the local session at once; remote invalidation is fire-and-forget.
    fn sign_out(&self);

    /// Removes an account. Signs it out first when it is the current one.
    fn delete_account(
        &self,
        user: &UserHandle,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;
}

/// Credentials record kept by the bundled providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    pub uid: UserId,
    pub email: Email,
    pub password_hash: String,
    pub created_at: i64,
}

impl StoredAccount {
    pub fn handle(&self) -> UserHandle {
        UserHandle {
            uid: self.uid.clone(),
            email: self.email.clone(),
        }
    }
}

/// Lookup key for an email; sign-in is case-insensitive.
pub fn account_key(email: &Email) -> String {
    email.as_str().to_lowercase()
}

/// Fresh account uid.
pub fn new_uid() -> UserId {
    UserId::new(uuid::Uuid::new_v4().simple().to_string())
}
