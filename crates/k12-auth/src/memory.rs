//! Process-local auth provider.
//!
//! Holds accounts in memory and hashes passwords with bcrypt like a real
//! backend would. Extra knobs let tests simulate an unreachable service and
//! count sign-outs.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use k12_core::now_millis;
use k12_models::{Email, UserHandle};

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::provider::{AuthProvider, StoredAccount, account_key, new_uid};

#[derive(Debug, Default)]
struct Inner {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    current: Mutex<Option<UserHandle>>,
    offline: AtomicBool,
    sign_outs: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct MemoryAuth {
    inner: Arc<Inner>,
    bcrypt_cost: u32,
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::Transport("auth state lock poisoned".to_string())
}

impl MemoryAuth {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            inner: Arc::default(),
            bcrypt_cost,
        }
    }

    /// Starts with `user` already signed in, as if restored from a previous run.
    pub fn with_session(self, user: UserHandle) -> Self {
        if let Ok(mut current) = self.inner.current.lock() {
            *current = Some(user);
        }
        self
    }

    /// Makes every network operation fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of times a signed-in session was ended.
    pub fn sign_out_count(&self) -> usize {
        self.inner.sign_outs.load(Ordering::SeqCst)
    }

    pub fn account_count(&self) -> usize {
        self.inner.accounts.lock().map(|a| a.len()).unwrap_or(0)
    }

    fn ensure_online(&self) -> Result<(), AuthError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Transport("auth service unreachable".to_string()));
        }
        Ok(())
    }

    fn set_current(&self, user: Option<UserHandle>) -> Result<(), AuthError> {
        *self.inner.current.lock().map_err(poisoned)? = user;
        Ok(())
    }

    async fn do_sign_in(&self, email: &Email, password: &str) -> Result<UserHandle, AuthError> {
        self.ensure_online()?;

        let account = self
            .inner
            .accounts
            .lock()
            .map_err(poisoned)?
            .get(&account_key(email))
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.handle();
        self.set_current(Some(user.clone()))?;
        debug!(user.id = %user.uid, "Signed in");
        Ok(user)
    }

    async fn do_create_account(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<UserHandle, AuthError> {
        self.ensure_online()?;

        let key = account_key(email);
        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let account = {
            let mut accounts = self.inner.accounts.lock().map_err(poisoned)?;
            if accounts.contains_key(&key) {
                return Err(AuthError::AccountExists(email.to_string()));
            }
            let account = StoredAccount {
                uid: new_uid(),
                email: email.clone(),
                password_hash,
                created_at: now_millis(),
            };
            accounts.insert(key, account.clone());
            account
        };

        let user = account.handle();
        self.set_current(Some(user.clone()))?;
        info!(user.id = %user.uid, "Account created");
        Ok(user)
    }

    fn do_delete_account(&self, user: &UserHandle) -> Result<(), AuthError> {
        self.ensure_online()?;

        self.inner
            .accounts
            .lock()
            .map_err(poisoned)?
            .retain(|_, account| account.uid != user.uid);

        if self.current_user().as_ref() == Some(user) {
            self.sign_out();
        }
        info!(user.id = %user.uid, "Account deleted");
        Ok(())
    }
}

impl AuthProvider for MemoryAuth {
    fn sign_in(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send {
        self.do_sign_in(email, password)
    }

    fn create_account(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send {
        self.do_create_account(email, password)
    }

    fn current_user(&self) -> Option<UserHandle> {
        self.inner.current.lock().ok().and_then(|c| c.clone())
    }

    fn sign_out(&self) {
        let Ok(mut current) = self.inner.current.lock() else {
            return;
        };
        if current.take().is_some() {
            self.inner.sign_outs.fetch_add(1, Ordering::SeqCst);
            debug!("Signed out");
        }
    }

    fn delete_account(
        &self,
        user: &UserHandle,
    ) -> impl Future<Output = Result<(), AuthError>> + Send {
        let result = self.do_delete_account(user);
        async move { result }
    }
}
