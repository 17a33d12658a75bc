//! Redis-backed auth provider.
//!
//! Accounts live at `{prefix}:accounts:{email}` as JSON. A successful sign-in
//! issues a signed session token that is written to the configured session
//! file, so the next start can restore it. Signing out deletes the file at
//! once and marks the token revoked at `{prefix}:revoked:{jti}` in the
//! background.

use chrono::Utc;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, instrument, warn};

use k12_config::AuthConfig;
use k12_core::now_millis;
use k12_models::{Email, UserHandle, UserId};

use crate::claims::SessionClaims;
use crate::error::AuthError;
use crate::jwt::{create_session_token, verify_session_token};
use crate::password::{hash_password, verify_password};
use crate::provider::{AuthProvider, StoredAccount, account_key, new_uid};

#[derive(Debug, Clone)]
struct Session {
    user: UserHandle,
    claims: SessionClaims,
}

#[derive(Clone)]
pub struct RedisAuth {
    conn: ConnectionManager,
    prefix: String,
    config: AuthConfig,
    session: Arc<Mutex<Option<Session>>>,
}

impl std::fmt::Debug for RedisAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisAuth")
            .field("prefix", &self.prefix)
            .field("session_file", &self.config.session_file)
            .finish_non_exhaustive()
    }
}

impl RedisAuth {
    /// Connects and restores a still-valid session from the session file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Redis` if the connection fails. An unreadable,
    /// expired or revoked session file is not an error; it is discarded.
    pub async fn connect(
        redis_url: &str,
        prefix: impl Into<String>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        let auth = Self {
            conn,
            prefix: prefix.into(),
            config,
            session: Arc::new(Mutex::new(None)),
        };
        auth.restore_session().await;

        Ok(auth)
    }

    fn account_key(&self, email: &Email) -> String {
        format!("{}:accounts:{}", self.prefix, account_key(email))
    }

    fn revoked_key(&self, jti: &str) -> String {
        format!("{}:revoked:{}", self.prefix, jti)
    }

    fn set_session(&self, session: Option<Session>) {
        match self.session.lock() {
            Ok(mut current) => *current = session,
            Err(e) => error!(error = %e, "Session lock poisoned"),
        }
    }

    async fn restore_session(&self) {
        let path = &self.config.session_file;
        let token = match tokio::fs::read_to_string(path).await {
            Ok(token) => token,
            Err(_) => return,
        };

        let claims = match verify_session_token(token.trim(), &self.config) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Discarding invalid session file");
                remove_session_file(path).await;
                return;
            }
        };

        let mut conn = self.conn.clone();
        match conn.exists::<_, bool>(self.revoked_key(&claims.jti)).await {
            Ok(false) => {}
            Ok(true) => {
                info!("Stored session was revoked");
                remove_session_file(path).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "Could not check session revocation");
                return;
            }
        }

        let user = UserHandle {
            uid: UserId::new(claims.sub.clone()),
            email: Email::new_unchecked(claims.email.clone()),
        };
        info!(user.id = %user.uid, "Session restored");
        self.set_session(Some(Session { user, claims }));
    }

    async fn start_session(&self, user: UserHandle) -> Result<UserHandle, AuthError> {
        let (token, claims) = create_session_token(&user.uid, &user.email, &self.config)?;

        let path = &self.config.session_file;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, token).await?;

        self.set_session(Some(Session {
            user: user.clone(),
            claims,
        }));
        Ok(user)
    }

    #[instrument(skip(self, password), fields(auth.operation = "SIGN_IN"))]
    async fn do_sign_in(&self, email: &Email, password: &str) -> Result<UserHandle, AuthError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn.get(self.account_key(email)).await?;
        let account: StoredAccount = match raw {
            Some(raw) => serde_json::from_str(&raw)?,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(password, &account.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        debug!(user.id = %account.uid, "Signed in");
        self.start_session(account.handle()).await
    }

    #[instrument(skip(self, password), fields(auth.operation = "CREATE_ACCOUNT"))]
    async fn do_create_account(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<UserHandle, AuthError> {
        let mut conn = self.conn.clone();

        let account = StoredAccount {
            uid: new_uid(),
            email: email.clone(),
            password_hash: hash_password(password, self.config.bcrypt_cost).await?,
            created_at: now_millis(),
        };
        let json = serde_json::to_string(&account)?;

        let created: bool = conn.set_nx(self.account_key(email), json).await?;
        if !created {
            return Err(AuthError::AccountExists(email.to_string()));
        }

        info!(user.id = %account.uid, "Account created");
        self.start_session(account.handle()).await
    }

    #[instrument(skip(self), fields(auth.operation = "DELETE_ACCOUNT"))]
    async fn do_delete_account(&self, user: &UserHandle) -> Result<(), AuthError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(self.account_key(&user.email)).await?;

        if self.current_user().as_ref() == Some(user) {
            self.sign_out();
        }
        info!(user.id = %user.uid, "Account deleted");
        Ok(())
    }
}

async fn remove_session_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        debug!(error = %e, "No session file to remove");
    }
}

impl AuthProvider for RedisAuth {
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
        self.session
            .lock()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.user.clone()))
    }

    fn sign_out(&self) {
        let session = match self.session.lock() {
            Ok(mut current) => current.take(),
            Err(e) => {
                error!(error = %e, "Session lock poisoned");
                return;
            }
        };
        let Some(session) = session else {
            return;
        };

        if let Err(e) = std::fs::remove_file(&self.config.session_file) {
            debug!(error = %e, "No session file to remove");
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; session token not revoked remotely");
            return;
        };

        let mut conn = self.conn.clone();
        let key = self.revoked_key(&session.claims.jti);
        let ttl = i64::try_from(session.claims.exp)
            .unwrap_or(i64::MAX)
            .saturating_sub(Utc::now().timestamp())
            .max(1) as u64;
        handle.spawn(async move {
            if let Err(e) = conn.set_ex::<_, _, ()>(&key, 1, ttl).await {
                error!(error = %e, "Failed to revoke session token");
            }
        });
        debug!(user.id = %session.user.uid, "Signed out");
    }

    fn delete_account(
        &self,
        user: &UserHandle,
    ) -> impl Future<Output = Result<(), AuthError>> + Send {
        self.do_delete_account(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a running Redis instance

    fn test_config(dir: &str) -> AuthConfig {
        AuthConfig {
            secret: "test-secret".to_string(),
            session_file: std::env::temp_dir().join(dir).join("session.jwt"),
            bcrypt_cost: 4,
            ..AuthConfig::default()
        }
    }

    fn unique(label: &str) -> String {
        format!("k12-test-{}-{}", label, new_uid())
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_session_survives_reconnect() {
        let prefix = unique("auth");
        let config = test_config(&prefix);
        let email = Email::new(format!("{}@example.com", prefix)).unwrap();

        let auth = RedisAuth::connect("redis://localhost:6379", &prefix, config.clone())
            .await
            .unwrap();
        let user = auth.create_account(&email, "secret123").await.unwrap();

        let reopened = RedisAuth::connect("redis://localhost:6379", &prefix, config)
            .await
            .unwrap();
        assert_eq!(reopened.current_user(), Some(user));

        reopened.sign_out();
        assert_eq!(reopened.current_user(), None);
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_duplicate_email_is_rejected() {
        let prefix = unique("dup");
        let auth = RedisAuth::connect("redis://localhost:6379", &prefix, test_config(&prefix))
            .await
            .unwrap();
        let email = Email::new("dup@example.com").unwrap();

        auth.create_account(&email, "secret123").await.unwrap();
        let err = auth.create_account(&email, "secret123").await.unwrap_err();

        assert!(matches!(err, AuthError::AccountExists(_)));
    }
}
