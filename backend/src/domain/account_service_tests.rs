//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockCredentialService, MockUserRepository};
use crate::domain::{DisplayName, ErrorCode, IssuedToken, UserAccount, Username};
use crate::test_support::clock::{MutableClock, fixture_now};

fn make_service(
    users: MockUserRepository,
    credentials: MockCredentialService,
) -> AccountServiceImpl<MockUserRepository> {
    AccountServiceImpl::new(
        Arc::new(users),
        Arc::new(credentials),
        Arc::new(MutableClock::default()),
    )
}

fn stored_ann() -> UserAccount {
    UserAccount {
        user: User::new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id"),
            Username::new("ann").expect("valid username"),
            DisplayName::new("Ann A").expect("valid name"),
            fixture_now(),
        ),
        password_digest: PasswordDigest::new("$argon2id$stored"),
    }
}

fn registration() -> Registration {
    Registration::try_from_parts("ann", "secret1", "Ann A").expect("valid registration")
}

#[tokio::test]
async fn register_hashes_and_stores_new_user() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|username| username == "ann")
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_create()
        .withf(|new_user| {
            new_user.password_digest.as_str() == "digest-of-secret1"
                && new_user.created_at == fixture_now()
                && new_user.name.as_ref() == "Ann A"
        })
        .times(1)
        .returning(|new_user| Ok(new_user.to_user()));

    let mut credentials = MockCredentialService::new();
    credentials
        .expect_hash_password()
        .withf(|password| password.expose() == "secret1")
        .times(1)
        .returning(|_| Ok(PasswordDigest::new("digest-of-secret1")));

    let user = make_service(users, credentials)
        .register(registration())
        .await
        .expect("registration succeeds");
    assert_eq!(user.username().as_ref(), "ann");
    assert_eq!(user.created_at(), fixture_now());
}

#[tokio::test]
async fn register_rejects_taken_username_without_hashing() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(Some(stored_ann())));
    users.expect_create().never();
    let mut credentials = MockCredentialService::new();
    credentials.expect_hash_password().never();

    let err = make_service(users, credentials)
        .register(registration())
        .await
        .expect_err("duplicate username");
    assert_eq!(err.code(), ErrorCode::UserExists);
    assert_eq!(err.message(), USER_EXISTS);
}

#[tokio::test]
async fn register_maps_store_level_duplicate_to_user_exists() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .returning(|_| Err(UserPersistenceError::duplicate_username("ann")));
    let mut credentials = MockCredentialService::new();
    credentials
        .expect_hash_password()
        .returning(|_| Ok(PasswordDigest::new("digest")));

    let err = make_service(users, credentials)
        .register(registration())
        .await
        .expect_err("race lost");
    assert_eq!(err.code(), ErrorCode::UserExists);
}

#[tokio::test]
async fn register_surfaces_connection_failures_as_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));
    let credentials = MockCredentialService::new();

    let err = make_service(users, credentials)
        .register(registration())
        .await
        .expect_err("store offline");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.public_message(), crate::domain::UNKNOWN_ERROR_MESSAGE);
}

#[tokio::test]
async fn login_issues_one_hour_token_for_matching_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(Some(stored_ann())));
    let mut credentials = MockCredentialService::new();
    credentials
        .expect_verify_password()
        .withf(|password, digest| {
            password.expose() == "secret1" && digest.as_str() == "$argon2id$stored"
        })
        .times(1)
        .returning(|_, _| true);
    credentials
        .expect_issue_token()
        .withf(|identity, ttl| identity.name == "Ann A" && *ttl == SESSION_TTL)
        .times(1)
        .returning(|_, _| {
            Ok(IssuedToken {
                token: "signed".to_owned(),
                expires_at_epoch_millis: 42,
            })
        });

    let outcome = make_service(users, credentials)
        .login(LoginCredentials::new("ann", "secret1"))
        .await
        .expect("login succeeds");
    assert_eq!(outcome.token.token, "signed");
    assert_eq!(outcome.user, stored_ann().user);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let mut unknown_users = MockUserRepository::new();
    unknown_users
        .expect_find_by_username()
        .return_once(|_| Ok(None));
    let mut unused = MockCredentialService::new();
    unused.expect_verify_password().never();
    let unknown = make_service(unknown_users, unused)
        .login(LoginCredentials::new("nobody", "secret1"))
        .await
        .expect_err("unknown user");

    let mut known_users = MockUserRepository::new();
    known_users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(stored_ann())));
    let mut rejecting = MockCredentialService::new();
    rejecting.expect_verify_password().returning(|_, _| false);
    rejecting.expect_issue_token().never();
    let mismatch = make_service(known_users, rejecting)
        .login(LoginCredentials::new("ann", "wrong"))
        .await
        .expect_err("wrong password");

    assert_eq!(unknown.code(), ErrorCode::InvalidCredentials);
    assert_eq!(unknown.code(), mismatch.code());
    assert_eq!(unknown.message(), INVALID_CREDENTIALS);
    assert_eq!(unknown.message(), mismatch.message());
}

#[tokio::test]
async fn logout_always_succeeds() {
    let service = make_service(MockUserRepository::new(), MockCredentialService::new());
    let context = RequestContext::Authenticated(Identity {
        user_id: UserId::random(),
        name: "Ann A".to_owned(),
    });
    service.logout(&context).await.expect("logout succeeds");
}

#[tokio::test]
async fn list_users_requires_a_session() {
    let mut users = MockUserRepository::new();
    users.expect_list_all().never();
    let err = make_service(users, MockCredentialService::new())
        .list_users(&RequestContext::Anonymous)
        .await
        .expect_err("anonymous caller");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), crate::domain::NOT_AUTHENTICATED);
}

#[tokio::test]
async fn list_users_returns_directory() {
    let mut users = MockUserRepository::new();
    users
        .expect_list_all()
        .times(1)
        .return_once(|| Ok(vec![stored_ann().user]));
    let context = RequestContext::Authenticated(Identity {
        user_id: UserId::random(),
        name: "Bob".to_owned(),
    });
    let listed = make_service(users, MockCredentialService::new())
        .list_users(&context)
        .await
        .expect("directory");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username().as_ref(), "ann");
}
