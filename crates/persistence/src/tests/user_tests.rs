// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_admin, create_block_head, test_db};
use crate::{Persistence, PersistenceError, UserData};

#[test]
fn create_and_get_user_roundtrip() {
    let mut db: Persistence = test_db();

    let user_id: i64 = db
        .create_user("Dana Cole", "Dana.Cole@Example.com", "sturdy-password", "admin", true)
        .expect("User should be created");

    let user: UserData = db.get_user(user_id).expect("User should exist");
    assert_eq!(user.name, "Dana Cole");
    assert_eq!(user.email, "dana.cole@example.com");
    assert_eq!(user.role, "admin");
    assert!(user.is_active);
    assert_ne!(user.password_hash, "sturdy-password");
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let mut db: Persistence = test_db();
    create_admin(&mut db, "admin@example.com");

    let result = db.create_user("Other", "ADMIN@example.com", "sturdy-password", "admin", true);
    assert!(matches!(result, Err(PersistenceError::DuplicateEmail(_))));
}

#[test]
fn update_user_cannot_take_anothers_email() {
    let mut db: Persistence = test_db();
    create_admin(&mut db, "admin@example.com");
    let other_id: i64 = create_block_head(&mut db, "head@example.com");

    let result = db.update_user(other_id, "Block Head", "admin@example.com", "blockHead", true);
    assert!(matches!(result, Err(PersistenceError::DuplicateEmail(_))));
}

#[test]
fn get_user_by_email_misses_cleanly() {
    let mut db: Persistence = test_db();
    let found: Option<UserData> = db
        .get_user_by_email("nobody@example.com")
        .expect("Lookup should succeed");
    assert!(found.is_none());
}

#[test]
fn delete_user_heading_a_block_is_refused() {
    let mut db: Persistence = test_db();
    let head_id: i64 = create_block_head(&mut db, "head@example.com");
    let admin_id: i64 = create_admin(&mut db, "admin@example.com");
    crate::tests::create_test_block(&mut db, "A Block", head_id, admin_id);

    let result = db.delete_user(head_id);
    assert!(matches!(result, Err(PersistenceError::UserReferenced(_))));
}

#[test]
fn password_update_invalidates_sessions() {
    let mut db: Persistence = test_db();
    let user_id: i64 = create_admin(&mut db, "admin@example.com");
    db.create_session("token-1", user_id, "2099-01-01T00:00:00Z")
        .expect("Session should be created");

    db.update_password(user_id, "new-sturdy-password")
        .expect("Password should update");

    let session = db
        .get_session_by_token("token-1")
        .expect("Lookup should succeed");
    assert!(session.is_none());
}

#[test]
fn expired_sessions_are_swept() {
    let mut db: Persistence = test_db();
    let user_id: i64 = create_admin(&mut db, "admin@example.com");
    db.create_session("stale", user_id, "2020-01-01T00:00:00Z")
        .expect("Session should be created");
    db.create_session("fresh", user_id, "2099-01-01T00:00:00Z")
        .expect("Session should be created");

    let removed: usize = db.delete_expired_sessions().expect("Sweep should succeed");
    assert_eq!(removed, 1);
    assert!(
        db.get_session_by_token("fresh")
            .expect("Lookup should succeed")
            .is_some()
    );
}
