mod common;

use std::sync::Arc;

use common::{FaultyStore, PASSWORD, auth_config, generate_unique_email, registration, session_with};
use k12::modules::session::{Feedback, Intent, NavState, Navigator, SessionManager};
use k12_auth::MemoryAuth;
use k12_core::ErrorKind;
use k12_models::{Email, UserHandle, UserId, UserRole};
use k12_store::MemoryStore;

fn login(email: &str) -> Intent {
    Intent::Login {
        email: email.to_string(),
        password: PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_teacher_reaches_teacher_dashboard() {
    let (session, _) = session_with(MemoryStore::new(), auth_config());
    let mut navigator = Navigator::start(session).await;
    let email = generate_unique_email();

    let state = navigator
        .dispatch(Intent::Register(Box::new(registration(
            "Meera Iyer",
            &email,
            UserRole::Teacher,
            "Class 3",
        ))))
        .await
        .unwrap();
    assert_eq!(state, NavState::LoggedOut);
    assert!(navigator.session().get_current_user().is_none());
    assert!(matches!(navigator.feedback(), Some(Feedback::Success(_))));

    let state = navigator.dispatch(login(&email)).await.unwrap();
    assert_eq!(state, NavState::DashboardTeacher);
    assert_eq!(navigator.profile().map(|p| p.class_name.as_str()), Some("Class 3"));
}

#[tokio::test]
async fn test_parent_reaches_parent_dashboard() {
    let (session, _) = session_with(MemoryStore::new(), auth_config());
    let mut navigator = Navigator::start(session).await;
    let email = generate_unique_email();

    navigator
        .dispatch(Intent::Register(Box::new(registration(
            "Priya Sharma",
            &email,
            UserRole::Parent,
            "",
        ))))
        .await
        .unwrap();

    let state = navigator.dispatch(login(&email)).await.unwrap();
    assert_eq!(state, NavState::DashboardParent);

    let state = navigator.dispatch(Intent::Logout).await.unwrap();
    assert_eq!(state, NavState::LoggedOut);
    assert!(navigator.profile().is_none());
    assert!(navigator.session().get_current_user().is_none());
}

#[tokio::test]
async fn test_failed_login_returns_to_login_with_error() {
    let (session, _) = session_with(MemoryStore::new(), auth_config());
    let mut navigator = Navigator::start(session).await;

    let err = navigator
        .dispatch(login(&generate_unique_email()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    assert_eq!(navigator.state(), NavState::LoggedOut);
    assert_eq!(
        navigator.feedback(),
        Some(&Feedback::Error(err.user_message()))
    );
}

#[tokio::test]
async fn test_missing_profile_ends_session() {
    let store = FaultyStore::new();
    store.fail_collection("users");
    let (session, auth) = session_with(store, auth_config());
    let mut navigator = Navigator::start(session).await;
    let email = generate_unique_email();

    // Account created, profile write dropped.
    navigator
        .dispatch(Intent::Register(Box::new(registration(
            "Meera Iyer",
            &email,
            UserRole::Teacher,
            "Class 3",
        ))))
        .await
        .unwrap_err();
    assert_eq!(navigator.state(), NavState::LoggedOut);
    let sign_outs = auth.sign_out_count();

    let err = navigator.dispatch(login(&email)).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(navigator.state(), NavState::LoggedOut);
    assert!(navigator.session().get_current_user().is_none());
    assert_eq!(auth.sign_out_count(), sign_outs + 1);
    assert!(
        navigator
            .last_error()
            .is_some_and(|message| message.contains("User profile not found"))
    );
}

#[tokio::test]
async fn test_illegal_intent_leaves_state_unchanged() {
    let (session, _) = session_with(MemoryStore::new(), auth_config());
    let mut navigator = Navigator::start(session).await;

    let err = navigator.dispatch(Intent::Logout).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(navigator.state(), NavState::LoggedOut);
    assert!(navigator.feedback().is_none());
}

#[tokio::test]
async fn test_login_rejected_on_dashboard() {
    let (session, _) = session_with(MemoryStore::new(), auth_config());
    let mut navigator = Navigator::start(session).await;
    let email = generate_unique_email();
    navigator
        .dispatch(Intent::Register(Box::new(registration(
            "Priya Sharma",
            &email,
            UserRole::Parent,
            "",
        ))))
        .await
        .unwrap();
    navigator.dispatch(login(&email)).await.unwrap();

    let err = navigator.dispatch(login(&email)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(navigator.state(), NavState::DashboardParent);
}

#[tokio::test]
async fn test_restored_session_goes_straight_to_dashboard() {
    let store = MemoryStore::new();
    let (session, _) = session_with(store.clone(), auth_config());
    let email = generate_unique_email();
    let user = session
        .register(registration("Meera Iyer", &email, UserRole::Teacher, "Class 3"))
        .await
        .unwrap();

    // A later run whose provider still holds the session.
    let auth = Arc::new(MemoryAuth::new(4).with_session(user));
    let restored = SessionManager::new(Arc::new(store), auth, auth_config());
    let navigator = Navigator::start(restored).await;

    assert_eq!(navigator.state(), NavState::DashboardTeacher);
}

#[tokio::test]
async fn test_restored_session_without_profile_logs_out() {
    let handle = UserHandle {
        uid: UserId::new("ghost"),
        email: Email::new("ghost@example.com").unwrap(),
    };
    let auth = Arc::new(MemoryAuth::new(4).with_session(handle));
    let session = SessionManager::new(Arc::new(MemoryStore::new()), auth.clone(), auth_config());

    let navigator = Navigator::start(session).await;

    assert_eq!(navigator.state(), NavState::LoggedOut);
    assert_eq!(auth.sign_out_count(), 1);
    assert!(navigator.last_error().is_some());
}
