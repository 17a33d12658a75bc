//! Current-identity ownership and the login / registration / logout flows.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use k12_auth::AuthProvider;
use k12_config::AuthConfig;
use k12_core::{AppError, ErrorKind};
use k12_models::{Email, LoginRequest, RegisterRequest, User, UserHandle, UserId};
use k12_observability::{
    track_login_failure, track_login_success, track_registration_failure,
    track_registration_success,
};
use k12_store::DocumentStore;

use crate::modules::users::UserService;

/// Read-only view of the signed-in identity.
///
/// Cheap to clone; every clone observes the same identity the
/// [`SessionManager`] publishes.
#[derive(Debug, Clone)]
pub struct SessionReader {
    rx: watch::Receiver<Option<UserHandle>>,
}

impl SessionReader {
    pub fn current(&self) -> Option<UserHandle> {
        self.rx.borrow().clone()
    }

    /// Waits until the identity changes and returns the new value.
    ///
    /// Returns `None` once the manager has been dropped.
    pub async fn changed(&mut self) -> Option<Option<UserHandle>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Sole owner of the current identity.
///
/// Login and registration set it, logout clears it, and construction restores
/// it from the auth provider when a previous session is still valid.
pub struct SessionManager<S, A> {
    store: Arc<S>,
    auth: Arc<A>,
    config: AuthConfig,
    identity: watch::Sender<Option<UserHandle>>,
}

impl<S, A> SessionManager<S, A>
where
    S: DocumentStore,
    A: AuthProvider,
{
    pub fn new(store: Arc<S>, auth: Arc<A>, config: AuthConfig) -> Self {
        let restored = auth.current_user();
        if let Some(user) = &restored {
            info!(user.id = %user.uid, "Restored previous session");
        }
        let (identity, _) = watch::channel(restored);

        Self {
            store,
            auth,
            config,
            identity,
        }
    }

    pub fn subscribe(&self) -> SessionReader {
        SessionReader {
            rx: self.identity.subscribe(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// In-memory only; never touches the network.
    pub fn get_current_user(&self) -> Option<UserHandle> {
        self.identity.borrow().clone()
    }

    fn check_password_length(&self, password: &str) -> Result<(), AppError> {
        if (password.chars().count() as u64) < self.config.min_password_length {
            return Err(AppError::validation(anyhow::anyhow!(
                "Password must be at least {} characters",
                self.config.min_password_length
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserHandle, AppError> {
        let request = LoginRequest::new(email, password);
        request.validate()?;
        self.check_password_length(&request.password)?;
        let email = Email::new(&request.email).map_err(AppError::validation)?;

        let user = self
            .auth
            .sign_in(&email, &request.password)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| {
                warn!(error = %e, "Login failed");
                track_login_failure(e.kind.label());
            })?;

        self.identity.send_replace(Some(user.clone()));
        track_login_success();
        info!(user.id = %user.uid, "Logged in");

        Ok(user)
    }

    /// Creates the account and writes its profile at `users/{uid}`.
    ///
    /// The new account is left signed in. If the profile write fails the
    /// account already exists remotely; it is deleted again only when
    /// `rollback_orphaned_accounts` is configured.
    #[instrument(skip(self, request), fields(user.role = %request.role))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserHandle, AppError> {
        let request = request.trimmed();
        request.validate()?;
        self.check_password_length(&request.password)?;
        let email = Email::new(&request.email).map_err(AppError::validation)?;
        let role = request.role;

        let user = self
            .auth
            .create_account(&email, &request.password)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| {
                warn!(error = %e, "Account creation failed");
                track_registration_failure(e.kind.label());
            })?;
        self.identity.send_replace(Some(user.clone()));

        let profile = request.into_profile(user.uid.clone(), email);
        if let Err(e) = UserService::create_profile(self.store.as_ref(), &profile).await {
            track_registration_failure(e.kind.label());
            return Err(self.handle_orphaned_account(&user, e).await);
        }

        track_registration_success(&role.to_string());
        info!(user.id = %user.uid, "Registered");

        Ok(user)
    }

    async fn handle_orphaned_account(&self, user: &UserHandle, cause: AppError) -> AppError {
        if !self.config.rollback_orphaned_accounts {
            error!(user.id = %user.uid, error = %cause, "Profile write failed, account left without a profile");
            return cause.context(format!(
                "Account {} was created but its profile could not be saved; the account has no profile",
                user.email
            ));
        }

        match self.auth.delete_account(user).await {
            Ok(()) => {
                self.identity.send_replace(None);
                warn!(user.id = %user.uid, "Profile write failed, account removed");
                cause.context("Registration failed and the new account was removed; please try again")
            }
            Err(e) => {
                error!(user.id = %user.uid, error = %e, "Could not remove account after profile write failed");
                cause.context(format!(
                    "Account {} was created but its profile could not be saved, and removing the account failed",
                    user.email
                ))
            }
        }
    }

    /// Profile of `id`; `NotFound` when it was never written.
    #[instrument(skip(self))]
    pub async fn get_user_data(&self, id: &UserId) -> Result<User, AppError> {
        UserService::get_user(self.store.as_ref(), id)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound => e.context("User profile not found"),
                _ => e.context("Failed to load user profile"),
            })
    }

    /// Clears the identity and ends the provider session. A second call
    /// finds no identity and does nothing.
    pub fn logout(&self) {
        let Some(user) = self.identity.send_replace(None) else {
            return;
        };
        self.auth.sign_out();
        info!(user.id = %user.uid, "Logged out");
    }
}
