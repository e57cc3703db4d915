use ecopulse_core::config::IdentityConfig;
use ecopulse_core::identity::entity::{Permission, SessionState, User};
use ecopulse_core::identity::error::{AuthError, FormField};
use ecopulse_core::identity::port::IdentityProvider;
use ecopulse_core::testing::MemoryIdentityProvider;
use ecopulse_session::auth::{AuthFlowError, AuthService};
use ecopulse_session::form::{LoginForm, RegistrationForm};
use ecopulse_session::gate::SessionGate;
use std::sync::Arc;

fn registration(password: &str, confirm: &str) -> RegistrationForm {
    RegistrationForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: password.into(),
        confirm_password: confirm.into(),
    }
}

fn service(provider: &Arc<MemoryIdentityProvider>) -> AuthService {
    AuthService::new(provider.clone(), &IdentityConfig::default())
}

#[test]
fn test_registration_validation_order() {
    let mut form = RegistrationForm {
        name: "  ".into(),
        email: "bad".into(),
        password: "short".into(),
        confirm_password: "other".into(),
    };
    assert_eq!(form.validate().unwrap_err().field, FormField::Name);

    form.name = "Ada".into();
    let err = form.validate().unwrap_err();
    assert_eq!(err.field, FormField::Email);
    assert_eq!(err.message, "Valid email is required");

    form.email = "ada@example.com".into();
    let err = form.validate().unwrap_err();
    assert_eq!(err.field, FormField::Password);
    assert_eq!(err.message, "Password must be at least 8 characters");

    form.password = "longenough".into();
    let err = form.validate().unwrap_err();
    assert_eq!(err.field, FormField::ConfirmPassword);
    assert_eq!(err.message, "Passwords do not match");

    form.confirm_password = "longenough".into();
    assert!(form.validate().is_ok());
}

#[test]
fn test_login_validation() {
    let mut form = LoginForm {
        email: "ada@".into(),
        password: String::new(),
    };
    let err = form.validate().unwrap_err();
    assert_eq!(err.field, FormField::Email);
    assert_eq!(err.message, "A valid email is required");

    form.email = "ada@example.com".into();
    let err = form.validate().unwrap_err();
    assert_eq!(err.field, FormField::Password);
    assert_eq!(err.message, "Password is required");
}

#[tokio::test]
async fn test_short_password_makes_no_provider_call() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let auth = service(&provider);

    let err = auth
        .register(&registration("1234567", "1234567"))
        .await
        .unwrap_err();

    match err {
        AuthFlowError::Invalid(v) => assert_eq!(v.field, FormField::Password),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_register_creates_session_and_profile() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let auth = service(&provider);

    let user = auth
        .register(&registration("password1", "password1"))
        .await
        .unwrap();

    assert_eq!(user.name, "Ada");
    assert!(provider.has_session());

    let docs = provider.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].reference.collection_id, "Profiles");
    assert_eq!(docs[0].data["userId"], user.id.as_str());
    assert_eq!(docs[0].data["name"], "Ada");
    assert_eq!(docs[0].permissions, Permission::owner(&user.id));
}

#[tokio::test]
async fn test_register_duplicate_surfaces_message() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let auth = service(&provider);
    auth.register(&registration("password1", "password1"))
        .await
        .unwrap();
    auth.logout().await.unwrap();

    let err = auth
        .register(&registration("password1", "password1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthFlowError::Provider(AuthError::Provider(_))));
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn test_login_then_logout() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let auth = service(&provider);
    auth.register(&registration("password1", "password1"))
        .await
        .unwrap();
    auth.logout().await.unwrap();
    assert!(!provider.has_session());

    let user = auth
        .login(&LoginForm {
            email: "ada@example.com".into(),
            password: "password1".into(),
        })
        .await
        .unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert!(provider.has_session());

    auth.logout().await.unwrap();
    assert!(!provider.has_session());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let auth = service(&provider);
    auth.register(&registration("password1", "password1"))
        .await
        .unwrap();
    auth.logout().await.unwrap();

    let err = auth
        .login(&LoginForm {
            email: "ada@example.com".into(),
            password: "password2".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthFlowError::Provider(_)));
    assert!(!provider.has_session());
}

#[tokio::test]
async fn test_check_session_active_and_idempotent() {
    let user = User {
        id: "u1".into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
    };
    let provider = Arc::new(MemoryIdentityProvider::with_session(user, "password1"));
    let gate = SessionGate::new(provider.clone());

    let first = gate.check_session().await;
    let second = gate.check_session().await;
    assert_eq!(first, SessionState::Active("u1".into()));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_check_session_absent_without_login() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let gate = SessionGate::new(provider);
    assert_eq!(gate.check_session().await, SessionState::Absent);
}

#[tokio::test]
async fn test_check_session_offline_is_absent() {
    let user = User {
        id: "u1".into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
    };
    let provider = Arc::new(MemoryIdentityProvider::with_session(user, "password1"));
    provider.set_offline(true);
    let gate = SessionGate::new(provider.clone());

    assert_eq!(gate.check_session().await, SessionState::Absent);
    assert!(provider.current_user().await.is_err());
}
