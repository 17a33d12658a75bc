//! Screen-level state machine over the session flows.
//!
//! [`transition`] is the whole table: a pure function from the current state
//! and an event to the next state, or `None` when the event is not allowed
//! there. [`Navigator`] drives it with the results of [`SessionManager`]
//! calls and keeps the last feedback message for the renderer.

use std::fmt;
use tracing::{debug, info, instrument, warn};

use k12_auth::AuthProvider;
use k12_core::AppError;
use k12_models::{RegisterRequest, User, UserRole};
use k12_store::DocumentStore;

use super::service::SessionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavState {
    LoggedOut,
    AuthenticatingLogin,
    AuthenticatingRegister,
    ResolvingRole,
    DashboardParent,
    DashboardTeacher,
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoggedOut => "logged out",
            Self::AuthenticatingLogin => "logging in",
            Self::AuthenticatingRegister => "registering",
            Self::ResolvingRole => "loading profile",
            Self::DashboardParent => "parent dashboard",
            Self::DashboardTeacher => "teacher dashboard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    LoginRequested,
    LoginSucceeded,
    LoginFailed,
    RegisterRequested,
    RegisterSucceeded,
    RegisterFailed,
    RoleResolved(UserRole),
    RoleResolutionFailed,
    LogoutRequested,
}

pub fn transition(state: NavState, event: NavEvent) -> Option<NavState> {
    use NavEvent::*;
    use NavState::*;

    match (state, event) {
        (LoggedOut, LoginRequested) => Some(AuthenticatingLogin),
        (AuthenticatingLogin, LoginSucceeded) => Some(ResolvingRole),
        (AuthenticatingLogin, LoginFailed) => Some(LoggedOut),

        (LoggedOut, RegisterRequested) => Some(AuthenticatingRegister),
        (AuthenticatingRegister, RegisterSucceeded | RegisterFailed) => Some(LoggedOut),

        (ResolvingRole, RoleResolved(UserRole::Parent)) => Some(DashboardParent),
        (ResolvingRole, RoleResolved(UserRole::Teacher)) => Some(DashboardTeacher),
        (ResolvingRole, RoleResolutionFailed) => Some(LoggedOut),

        (DashboardParent | DashboardTeacher, LogoutRequested) => Some(LoggedOut),

        _ => None,
    }
}

/// What the user asked for.
#[derive(Debug, Clone)]
pub enum Intent {
    Login { email: String, password: String },
    Register(Box<RegisterRequest>),
    Logout,
}

impl Intent {
    fn event(&self) -> NavEvent {
        match self {
            Self::Login { .. } => NavEvent::LoginRequested,
            Self::Register(_) => NavEvent::RegisterRequested,
            Self::Logout => NavEvent::LogoutRequested,
        }
    }
}

/// Message shown after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

pub struct Navigator<S, A> {
    session: SessionManager<S, A>,
    state: NavState,
    profile: Option<User>,
    feedback: Option<Feedback>,
}

impl<S, A> Navigator<S, A>
where
    S: DocumentStore,
    A: AuthProvider,
{
    /// Starts at the role lookup when a previous session survived, otherwise
    /// at the login screen.
    pub async fn start(session: SessionManager<S, A>) -> Self {
        let mut navigator = Self {
            session,
            state: NavState::LoggedOut,
            profile: None,
            feedback: None,
        };

        if navigator.session.get_current_user().is_some() {
            navigator.state = NavState::ResolvingRole;
            if let Err(e) = navigator.resolve_role().await {
                debug!(error = %e, "Restored session dropped");
            }
        }

        navigator
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn session(&self) -> &SessionManager<S, A> {
        &self.session
    }

    /// Profile of the signed-in user while a dashboard is shown.
    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }

    fn apply(&mut self, event: NavEvent) {
        match transition(self.state, event) {
            Some(next) => {
                debug!(from = %self.state, to = %next, ?event, "Navigation");
                self.state = next;
            }
            None => warn!(state = %self.state, ?event, "Ignored event"),
        }
    }

    fn fail(&mut self, event: NavEvent, error: AppError) -> AppError {
        self.apply(event);
        self.feedback = Some(Feedback::Error(error.user_message()));
        error
    }

    /// Runs `intent` to completion and returns the state it ends in.
    ///
    /// An intent the current state does not accept is rejected with a
    /// validation error and changes nothing. An intent whose operation
    /// fails moves to the failure state and returns the error.
    #[instrument(skip(self, intent), fields(state = %self.state))]
    pub async fn dispatch(&mut self, intent: Intent) -> Result<NavState, AppError> {
        let Some(next) = transition(self.state, intent.event()) else {
            return Err(AppError::validation(anyhow::anyhow!(
                "Cannot {} while {}",
                match intent {
                    Intent::Login { .. } => "log in",
                    Intent::Register(_) => "register",
                    Intent::Logout => "log out",
                },
                self.state
            )));
        };
        self.state = next;

        match intent {
            Intent::Login { email, password } => {
                if let Err(e) = self.session.login(&email, &password).await {
                    return Err(self.fail(NavEvent::LoginFailed, e));
                }
                self.apply(NavEvent::LoginSucceeded);
                self.resolve_role().await?;
            }
            Intent::Register(request) => {
                let result = self.session.register(*request).await;
                // Registration never leaves anyone signed in.
                self.session.logout();
                if let Err(e) = result {
                    return Err(self.fail(NavEvent::RegisterFailed, e));
                }
                self.apply(NavEvent::RegisterSucceeded);
                self.feedback = Some(Feedback::Success(
                    "Registration successful. Please log in.".to_string(),
                ));
            }
            Intent::Logout => {
                self.session.logout();
                self.profile = None;
                self.feedback = Some(Feedback::Success("Logged out".to_string()));
            }
        }

        Ok(self.state)
    }

    /// Loads the profile and picks the dashboard. Any failure ends the
    /// session.
    async fn resolve_role(&mut self) -> Result<(), AppError> {
        let Some(user) = self.session.get_current_user() else {
            return Err(self.fail(
                NavEvent::RoleResolutionFailed,
                AppError::not_found(anyhow::anyhow!("No signed-in user")),
            ));
        };

        match self.session.get_user_data(&user.uid).await {
            Ok(profile) => {
                self.apply(NavEvent::RoleResolved(profile.role));
                info!(user.id = %profile.id, user.role = %profile.role, "Dashboard selected");
                self.feedback = Some(Feedback::Success(format!("Welcome, {}", profile.name)));
                self.profile = Some(profile);
                Ok(())
            }
            Err(e) => {
                warn!(user.id = %user.uid, error = %e, "Could not resolve role, ending session");
                self.session.logout();
                self.profile = None;
                Err(self.fail(NavEvent::RoleResolutionFailed, e))
            }
        }
    }

    /// Message of the last failed intent or role lookup.
    pub fn last_error(&self) -> Option<&str> {
        match &self.feedback {
            Some(Feedback::Error(message)) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [NavState; 6] = [
        NavState::LoggedOut,
        NavState::AuthenticatingLogin,
        NavState::AuthenticatingRegister,
        NavState::ResolvingRole,
        NavState::DashboardParent,
        NavState::DashboardTeacher,
    ];

    #[test]
    fn test_login_path() {
        assert_eq!(
            transition(NavState::LoggedOut, NavEvent::LoginRequested),
            Some(NavState::AuthenticatingLogin)
        );
        assert_eq!(
            transition(NavState::AuthenticatingLogin, NavEvent::LoginSucceeded),
            Some(NavState::ResolvingRole)
        );
        assert_eq!(
            transition(NavState::AuthenticatingLogin, NavEvent::LoginFailed),
            Some(NavState::LoggedOut)
        );
    }

    #[test]
    fn test_role_dispatch() {
        assert_eq!(
            transition(NavState::ResolvingRole, NavEvent::RoleResolved(UserRole::Parent)),
            Some(NavState::DashboardParent)
        );
        assert_eq!(
            transition(NavState::ResolvingRole, NavEvent::RoleResolved(UserRole::Teacher)),
            Some(NavState::DashboardTeacher)
        );
        assert_eq!(
            transition(NavState::ResolvingRole, NavEvent::RoleResolutionFailed),
            Some(NavState::LoggedOut)
        );
    }

    #[test]
    fn test_registration_always_returns_to_login() {
        for event in [NavEvent::RegisterSucceeded, NavEvent::RegisterFailed] {
            assert_eq!(
                transition(NavState::AuthenticatingRegister, event),
                Some(NavState::LoggedOut)
            );
        }
    }

    #[test]
    fn test_logout_only_from_dashboards() {
        for state in STATES {
            let expected = match state {
                NavState::DashboardParent | NavState::DashboardTeacher => Some(NavState::LoggedOut),
                _ => None,
            };
            assert_eq!(transition(state, NavEvent::LogoutRequested), expected);
        }
    }

    #[test]
    fn test_login_and_register_only_when_logged_out() {
        for state in STATES.into_iter().filter(|s| *s != NavState::LoggedOut) {
            assert_eq!(transition(state, NavEvent::LoginRequested), None);
            assert_eq!(transition(state, NavEvent::RegisterRequested), None);
        }
    }
}
