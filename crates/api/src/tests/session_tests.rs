// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, session validation, and logout tests.

use quarters_domain::Role;

use crate::error::{ApiError, AuthError};
use crate::handlers;
use crate::request_response::LoginRequest;
use crate::{AuthenticatedActor, AuthenticationService};

use super::helpers::{seed_system_admin, test_db};

#[test]
fn login_issues_a_token_that_resolves_back_to_the_user() {
    let mut db = test_db();
    let admin = seed_system_admin(&mut db);

    let response = handlers::login(
        &mut db,
        LoginRequest {
            email: String::from("root@example.com"),
            password: String::from("rootpassword1"),
        },
    )
    .expect("Login should succeed");

    assert!(response.token.starts_with("session_"));
    assert_eq!(response.user.user_id, admin.user_id);
    assert_eq!(response.user.role, "systemAdmin");

    let actor: AuthenticatedActor =
        AuthenticationService::validate_session(&mut db, &response.token)
            .expect("Session should validate");
    assert_eq!(actor.user_id, admin.user_id);
    assert_eq!(actor.role, Role::SystemAdmin);
}

#[test]
fn login_failure_reason_is_identical_for_unknown_email_and_wrong_password() {
    let mut db = test_db();
    seed_system_admin(&mut db);

    let unknown = handlers::login(
        &mut db,
        LoginRequest {
            email: String::from("nobody@example.com"),
            password: String::from("rootpassword1"),
        },
    )
    .expect_err("Unknown email should fail");
    let wrong = handlers::login(
        &mut db,
        LoginRequest {
            email: String::from("root@example.com"),
            password: String::from("not-the-password"),
        },
    )
    .expect_err("Wrong password should fail");

    assert_eq!(unknown, wrong);
    assert!(matches!(unknown, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn deactivated_accounts_cannot_log_in() {
    let mut db = test_db();
    let admin = seed_system_admin(&mut db);
    db.update_user(
        admin.user_id,
        "Root Admin",
        "root@example.com",
        "systemAdmin",
        false,
    )
    .expect("Deactivation should succeed");

    let err = handlers::login(
        &mut db,
        LoginRequest {
            email: String::from("root@example.com"),
            password: String::from("rootpassword1"),
        },
    )
    .expect_err("Deactivated account should not log in");
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn logout_invalidates_the_session() {
    let mut db = test_db();
    seed_system_admin(&mut db);

    let response = handlers::login(
        &mut db,
        LoginRequest {
            email: String::from("root@example.com"),
            password: String::from("rootpassword1"),
        },
    )
    .expect("Login should succeed");

    handlers::logout(&mut db, &response.token).expect("Logout should succeed");

    let err = AuthenticationService::validate_session(&mut db, &response.token)
        .expect_err("Token should be dead after logout");
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

#[test]
fn garbage_tokens_are_rejected() {
    let mut db = test_db();
    seed_system_admin(&mut db);

    let err = AuthenticationService::validate_session(&mut db, "session_0_0")
        .expect_err("Unknown token should be rejected");
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

#[test]
fn whoami_returns_the_profile_without_credential_material() {
    let mut db = test_db();
    let admin = seed_system_admin(&mut db);

    let profile = handlers::whoami(&mut db, &admin).expect("whoami should succeed");
    assert_eq!(profile.email, "root@example.com");
    assert_eq!(profile.name, "Root Admin");

    let json = serde_json::to_value(&profile).expect("Profile should serialize");
    assert!(json.get("passwordHash").is_none());
    assert!(json.get("userId").is_some());
}
