//! Tests for the auth service.

use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::domain::ports::{
    ApiError, InMemorySessionRepository, MockAuthApi, MockSessionRepository,
};
use crate::domain::{EmployeeId, ErrorCode, RegistrationInput, Role};

fn user(role: Role) -> User {
    User {
        id: EmployeeId::new(12),
        email: "pm@example.com".to_owned(),
        first_name: "Pat".to_owned(),
        last_name: "Manager".to_owned(),
        role,
    }
}

fn credentials() -> LoginCredentials {
    LoginCredentials::try_from_parts("pm@example.com", "Secret1!").expect("valid credentials")
}

#[tokio::test]
async fn login_persists_session_and_signs_in() {
    let mut api = MockAuthApi::new();
    api.expect_login()
        .times(1)
        .return_once(|_| Ok(AuthSession::new("jwt", user(Role::ProjectManager))));
    let sessions = Arc::new(InMemorySessionRepository::default());

    let service = AuthService::new(Arc::new(api), Arc::clone(&sessions));
    let mut ctx = AppContext::anonymous();
    let signed_in = service
        .login(&mut ctx, &credentials())
        .await
        .expect("login succeeds");

    assert_eq!(signed_in.role, Role::ProjectManager);
    assert_eq!(ctx.token(), Some("jwt"));
    let stored = sessions.load().await.expect("load");
    assert_eq!(stored.map(|session| session.token().to_owned()), Some("jwt".to_owned()));
}

#[tokio::test]
async fn rejected_login_leaves_context_alone() {
    let mut api = MockAuthApi::new();
    api.expect_login().times(1).return_once(|_| {
        Err(ApiError::status(
            401_u16,
            "Unauthorized",
            json!({"title": "Invalid credentials"}),
        ))
    });
    let mut sessions = MockSessionRepository::new();
    sessions.expect_save().times(0);

    let service = AuthService::new(Arc::new(api), Arc::new(sessions));
    let mut ctx = AppContext::anonymous();
    let error = service
        .login(&mut ctx, &credentials())
        .await
        .expect_err("login rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Invalid credentials");
    assert!(!ctx.is_signed_in());
}

#[tokio::test]
async fn unreachable_backend_uses_fallback_message() {
    let mut api = MockAuthApi::new();
    api.expect_login()
        .times(1)
        .return_once(|_| Err(ApiError::transport("connection refused")));

    let service = AuthService::new(
        Arc::new(api),
        Arc::new(InMemorySessionRepository::default()),
    );
    let error = service
        .login(&mut AppContext::anonymous(), &credentials())
        .await
        .expect_err("transport failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.message(), "Invalid email or password.");
}

#[tokio::test]
async fn failed_session_write_does_not_sign_in() {
    let mut api = MockAuthApi::new();
    api.expect_login()
        .times(1)
        .return_once(|_| Ok(AuthSession::new("jwt", user(Role::Director))));
    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_save()
        .times(1)
        .return_once(|_| Err(SessionRepositoryError::write("disk full")));

    let service = AuthService::new(Arc::new(api), Arc::new(sessions));
    let mut ctx = AppContext::anonymous();
    let error = service
        .login(&mut ctx, &credentials())
        .await
        .expect_err("write fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(!ctx.is_signed_in());
}

#[tokio::test]
async fn register_signs_in_new_account() {
    let registration = Registration::try_new(RegistrationInput {
        email: "new@example.com",
        password: "Abc123!",
        first_name: "New",
        last_name: "Person",
        middle_name: None,
    })
    .expect("valid registration");

    let mut api = MockAuthApi::new();
    api.expect_register()
        .withf(|reg| reg.credentials().email() == "new@example.com")
        .times(1)
        .return_once(|_| Ok(AuthSession::new("fresh", user(Role::Employee))));

    let service = AuthService::new(
        Arc::new(api),
        Arc::new(InMemorySessionRepository::default()),
    );
    let mut ctx = AppContext::anonymous();
    service
        .register(&mut ctx, &registration)
        .await
        .expect("register succeeds");

    assert_eq!(ctx.token(), Some("fresh"));
}

#[tokio::test]
async fn logout_clears_store_and_context() {
    let session = AuthSession::new("jwt", user(Role::Director));
    let sessions = Arc::new(InMemorySessionRepository::with_session(session.clone()));
    let service = AuthService::new(Arc::new(MockAuthApi::new()), Arc::clone(&sessions));

    let mut ctx = AppContext::with_session(session);
    service.logout(&mut ctx).await.expect("logout succeeds");

    assert!(!ctx.is_signed_in());
    assert_eq!(sessions.load().await.expect("load"), None);
}
