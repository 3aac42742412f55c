// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accommodation request workflow handler tests.

use quarters_persistence::Persistence;

use crate::AuthenticatedActor;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    AddNoteRequest, AssignBedsRequest, BedInfo, BlockInfo, RejectRequestRequest, RequestInfo,
    RoomInfo, SetRequestStatusRequest, UpdateRequestRequest,
};

use super::helpers::{
    seed_admin, seed_bed, seed_block, seed_block_head, seed_request, seed_room,
    seed_system_admin, test_db,
};

struct Fixture {
    db: Persistence,
    sysadmin: AuthenticatedActor,
    admin: AuthenticatedActor,
    head: AuthenticatedActor,
    block: BlockInfo,
    room: RoomInfo,
    beds: Vec<BedInfo>,
    request: RequestInfo,
}

fn fixture() -> Fixture {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let admin = seed_admin(&mut db, "admin@example.com");
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    let room = seed_room(&mut db, &sysadmin, block.block_id, "101");
    let beds = vec![
        seed_bed(&mut db, &head, room.room_id, "101-A"),
        seed_bed(&mut db, &head, room.room_id, "101-B"),
    ];
    let request = seed_request(&mut db, &admin, block.block_id);

    Fixture {
        db,
        sysadmin,
        admin,
        head,
        block,
        room,
        beds,
        request,
    }
}

fn approve(fx: &mut Fixture) {
    let bed_ids: Vec<i64> = fx.beds.iter().map(|bed| bed.bed_id).collect();
    handlers::assign_beds_to_request(
        &mut fx.db,
        &fx.head,
        fx.request.request_id,
        AssignBedsRequest {
            room_id: fx.room.room_id,
            bed_ids,
        },
    )
    .expect("Approval should succeed");
}

#[test]
fn a_new_request_is_pending_with_a_generated_number() {
    let fx = fixture();
    assert_eq!(fx.request.status, "Pending");
    assert!(fx.request.request_number.starts_with("REQ-"));
    assert!(fx.request.assigned_room_id.is_none());
}

#[test]
fn approval_assigns_beds_and_moves_the_counters() {
    let mut fx = fixture();
    approve(&mut fx);

    let detail = handlers::get_request(&mut fx.db, &fx.head, fx.request.request_id)
        .expect("Request should exist");
    assert_eq!(detail.request.status, "Approved");
    assert_eq!(detail.request.assigned_room_id, Some(fx.room.room_id));
    assert_eq!(detail.assigned_bed_ids.len(), 2);

    let block = handlers::get_block(&mut fx.db, fx.block.block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 0);
    assert_eq!(block.available_rooms, 0);

    let room = handlers::get_room(&mut fx.db, fx.room.room_id).expect("Room should exist");
    assert_eq!(room.status, "Fully Occupied");
}

#[test]
fn approval_requires_enough_beds_for_the_occupants() {
    let mut fx = fixture();

    let err = handlers::assign_beds_to_request(
        &mut fx.db,
        &fx.head,
        fx.request.request_id,
        AssignBedsRequest {
            room_id: fx.room.room_id,
            bed_ids: vec![fx.beds[0].bed_id],
        },
    )
    .expect_err("One bed for two occupants should fail");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "bedIds"));

    let detail = handlers::get_request(&mut fx.db, &fx.head, fx.request.request_id)
        .expect("Request should exist");
    assert_eq!(detail.request.status, "Pending");
    assert!(detail.assigned_bed_ids.is_empty());
}

#[test]
fn approval_rejects_a_room_outside_the_preferred_block() {
    let mut fx = fixture();
    let other_head = seed_block_head(&mut fx.db, "other@example.com");
    let other_block = seed_block(&mut fx.db, &fx.sysadmin, "Block B", &other_head);
    let other_room = seed_room(&mut fx.db, &fx.sysadmin, other_block.block_id, "201");
    let bed_ids: Vec<i64> = vec![
        seed_bed(&mut fx.db, &other_head, other_room.room_id, "201-A").bed_id,
        seed_bed(&mut fx.db, &other_head, other_room.room_id, "201-B").bed_id,
    ];

    let err = handlers::assign_beds_to_request(
        &mut fx.db,
        &fx.sysadmin,
        fx.request.request_id,
        AssignBedsRequest {
            room_id: other_room.room_id,
            bed_ids,
        },
    )
    .expect_err("A room outside the preferred block should fail");
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn completion_releases_the_beds_and_restores_the_counters() {
    let mut fx = fixture();
    approve(&mut fx);

    let completed = handlers::set_request_status(
        &mut fx.db,
        &fx.admin,
        fx.request.request_id,
        SetRequestStatusRequest {
            status: String::from("Completed"),
        },
    )
    .expect("Completion should succeed");
    assert_eq!(completed.status, "Completed");
    assert_eq!(completed.handled_by_admin_id, Some(fx.admin.user_id));
    assert!(completed.assigned_room_id.is_none());

    let block = handlers::get_block(&mut fx.db, fx.block.block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 2);
    assert_eq!(block.available_rooms, 1);

    let room = handlers::get_room(&mut fx.db, fx.room.room_id).expect("Room should exist");
    assert_eq!(room.status, "Available");
    assert_eq!(room.occupied_beds, 0);
}

#[test]
fn rejection_requires_a_reason() {
    let mut fx = fixture();

    let err = handlers::reject_request(
        &mut fx.db,
        &fx.head,
        fx.request.request_id,
        RejectRequestRequest {
            reason: String::from("   "),
        },
    )
    .expect_err("A blank reason should be rejected");
    assert!(matches!(err, ApiError::InvalidInput { .. }));

    let rejected = handlers::reject_request(
        &mut fx.db,
        &fx.head,
        fx.request.request_id,
        RejectRequestRequest {
            reason: String::from("No capacity in March"),
        },
    )
    .expect("Rejection with a reason should succeed");
    assert_eq!(rejected.status, "Rejected");
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("No capacity in March")
    );
}

#[test]
fn an_approved_request_cannot_be_cancelled() {
    let mut fx = fixture();
    approve(&mut fx);

    let err = handlers::cancel_request(&mut fx.db, &fx.admin, fx.request.request_id)
        .expect_err("Cancel after approval should fail");
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn only_the_creator_or_an_admin_may_cancel() {
    let mut fx = fixture();
    let other_head = seed_block_head(&mut fx.db, "other@example.com");

    let err = handlers::cancel_request(&mut fx.db, &other_head, fx.request.request_id)
        .expect_err("An unrelated actor should not cancel");
    assert!(matches!(err, ApiError::Forbidden { .. }));

    let cancelled = handlers::cancel_request(&mut fx.db, &fx.admin, fx.request.request_id)
        .expect("The creator should cancel");
    assert_eq!(cancelled.status, "Cancelled");
}

#[test]
fn a_decided_request_cannot_be_edited() {
    let mut fx = fixture();
    approve(&mut fx);

    let err = handlers::update_request(
        &mut fx.db,
        &fx.admin,
        fx.request.request_id,
        UpdateRequestRequest {
            requester_name: String::from("Amira Hassan"),
            requester_contact: String::from("amira@example.com"),
            purpose: String::from("Extended visit"),
            room_type_preference: String::from("Double"),
            check_in_date: String::from("2026-03-01"),
            check_out_date: String::from("2026-03-20"),
            number_of_occupants: 2,
            special_requirements: None,
        },
    )
    .expect_err("Editing an approved request should fail");
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn deletion_is_blocked_while_beds_are_assigned() {
    let mut fx = fixture();
    approve(&mut fx);

    let err = handlers::delete_request(&mut fx.db, &fx.admin, fx.request.request_id)
        .expect_err("Deleting with live assignments should fail");
    assert!(matches!(err, ApiError::InvalidState { .. }));

    handlers::set_request_status(
        &mut fx.db,
        &fx.admin,
        fx.request.request_id,
        SetRequestStatusRequest {
            status: String::from("Completed"),
        },
    )
    .expect("Completion should succeed");

    handlers::delete_request(&mut fx.db, &fx.admin, fx.request.request_id)
        .expect("A completed request should delete");
}

#[test]
fn listings_are_scoped_to_the_actor() {
    let mut fx = fixture();
    let other_head = seed_block_head(&mut fx.db, "other@example.com");
    let other_block = seed_block(&mut fx.db, &fx.sysadmin, "Block B", &other_head);
    seed_request(&mut fx.db, &fx.admin, other_block.block_id);

    let all = handlers::list_requests(&mut fx.db, &fx.admin, None)
        .expect("Admin listing should succeed");
    assert_eq!(all.len(), 2);

    let scoped = handlers::list_requests(&mut fx.db, &fx.head, None)
        .expect("Block head listing should succeed");
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].block_preference_id, fx.block.block_id);

    let pending = handlers::list_requests(&mut fx.db, &fx.admin, Some("Pending"))
        .expect("Filtered listing should succeed");
    assert_eq!(pending.len(), 2);

    let err = handlers::list_requests(&mut fx.db, &fx.admin, Some("Bogus"))
        .expect_err("An unknown status filter should fail");
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn block_heads_also_see_the_requests_they_filed() {
    let mut fx = fixture();
    let other_head = seed_block_head(&mut fx.db, "other@example.com");
    let other_block = seed_block(&mut fx.db, &fx.sysadmin, "Block B", &other_head);
    seed_request(&mut fx.db, &fx.head, other_block.block_id);

    let scoped = handlers::list_requests(&mut fx.db, &fx.head, None)
        .expect("Block head listing should succeed");
    assert_eq!(scoped.len(), 2);
}

#[test]
fn notes_accumulate_in_order() {
    let mut fx = fixture();

    handlers::add_request_note(
        &mut fx.db,
        &fx.admin,
        fx.request.request_id,
        AddNoteRequest {
            message: String::from("Confirm headcount before approving"),
        },
    )
    .expect("First note should append");
    handlers::add_request_note(
        &mut fx.db,
        &fx.head,
        fx.request.request_id,
        AddNoteRequest {
            message: String::from("Headcount confirmed"),
        },
    )
    .expect("Second note should append");

    let err = handlers::add_request_note(
        &mut fx.db,
        &fx.admin,
        fx.request.request_id,
        AddNoteRequest {
            message: String::from("  "),
        },
    )
    .expect_err("A blank note should be rejected");
    assert!(matches!(err, ApiError::InvalidInput { .. }));

    let detail = handlers::get_request(&mut fx.db, &fx.admin, fx.request.request_id)
        .expect("Request should exist");
    assert_eq!(detail.notes.len(), 2);
    assert_eq!(detail.notes[0].message, "Confirm headcount before approving");
    assert_eq!(detail.notes[1].message, "Headcount confirmed");
    assert_eq!(detail.notes[0].author_id, fx.admin.user_id);
    assert_eq!(detail.notes[1].author_id, fx.head.user_id);
}
