// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Block and room handler tests.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{BlockRequest, CreateRoomRequest, UpdateRoomRequest};

use super::helpers::{
    seed_bed, seed_block, seed_block_head, seed_room, seed_system_admin, test_db,
};

#[test]
fn a_new_block_starts_with_zeroed_counters() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");

    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    assert_eq!(block.name, "Block A");
    assert_eq!(block.block_type, "A Block");
    assert_eq!(block.block_head_id, head.user_id);
    assert_eq!(block.total_rooms, 0);
    assert_eq!(block.available_rooms, 0);
    assert_eq!(block.total_beds, 0);
    assert_eq!(block.available_beds, 0);
}

#[test]
fn block_names_are_unique() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    seed_block(&mut db, &sysadmin, "Block A", &head);

    let err = handlers::create_block(
        &mut db,
        &sysadmin,
        BlockRequest {
            name: String::from("Block A"),
            block_type: String::from("B Block"),
            description: None,
            block_head_id: head.user_id,
        },
    )
    .expect_err("Duplicate block name should be rejected");
    assert!(matches!(err, ApiError::Duplicate { .. }));
}

#[test]
fn adding_rooms_and_beds_moves_the_block_counters() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);

    let room = seed_room(&mut db, &sysadmin, block.block_id, "101");
    seed_bed(&mut db, &head, room.room_id, "101-A");
    seed_bed(&mut db, &head, room.room_id, "101-B");

    let refreshed = handlers::get_block(&mut db, block.block_id).expect("Block should exist");
    assert_eq!(refreshed.total_rooms, 1);
    assert_eq!(refreshed.available_rooms, 1);
    assert_eq!(refreshed.total_beds, 2);
    assert_eq!(refreshed.available_beds, 2);
}

#[test]
fn room_info_carries_derived_bed_counts() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    let room = seed_room(&mut db, &sysadmin, block.block_id, "101");
    seed_bed(&mut db, &head, room.room_id, "101-A");
    seed_bed(&mut db, &head, room.room_id, "101-B");

    let rooms = handlers::list_rooms_for_block(&mut db, block.block_id)
        .expect("Room listing should succeed");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].total_beds, 2);
    assert_eq!(rooms[0].available_beds, 2);
    assert_eq!(rooms[0].occupied_beds, 0);
    assert_eq!(rooms[0].amenities, vec![String::from("WiFi")]);
}

#[test]
fn invalid_room_fields_are_rejected_at_the_boundary() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);

    let err = handlers::create_room(
        &mut db,
        &sysadmin,
        block.block_id,
        CreateRoomRequest {
            room_number: String::from("102"),
            room_type: String::from("Penthouse"),
            capacity: 2,
            description: None,
            amenities: Vec::new(),
            price_per_day: 100.0,
        },
    )
    .expect_err("Unknown room type should be rejected");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "roomType"));

    let err = handlers::create_room(
        &mut db,
        &sysadmin,
        block.block_id,
        CreateRoomRequest {
            room_number: String::from("102"),
            room_type: String::from("Double"),
            capacity: 0,
            description: None,
            amenities: Vec::new(),
            price_per_day: 100.0,
        },
    )
    .expect_err("Zero capacity should be rejected");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "capacity"));
}

#[test]
fn updating_a_room_rejects_an_unknown_status_string() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    let room = seed_room(&mut db, &sysadmin, block.block_id, "101");

    let err = handlers::update_room(
        &mut db,
        &sysadmin,
        room.room_id,
        UpdateRoomRequest {
            room_type: String::from("Double"),
            capacity: 2,
            description: None,
            amenities: Vec::new(),
            price_per_day: 150.0,
            status: Some(String::from("Haunted")),
        },
    )
    .expect_err("Unknown room status should be rejected");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "status"));
}

#[test]
fn a_block_with_rooms_cannot_be_deleted() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    seed_room(&mut db, &sysadmin, block.block_id, "101");

    let err = handlers::delete_block(&mut db, &sysadmin, block.block_id)
        .expect_err("Block with rooms should not delete");
    assert!(matches!(err, ApiError::InvalidState { .. }));

    let missing = handlers::get_block(&mut db, 9999).expect_err("Unknown block should 404");
    assert!(matches!(missing, ApiError::ResourceNotFound { .. }));
}

#[test]
fn block_stats_are_computed_from_the_rows() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    let room = seed_room(&mut db, &sysadmin, block.block_id, "101");
    seed_bed(&mut db, &head, room.room_id, "101-A");
    seed_bed(&mut db, &head, room.room_id, "101-B");

    let stats =
        handlers::get_block_stats(&mut db, block.block_id).expect("Stats should compute");
    assert_eq!(stats.total_beds, 2);
    assert_eq!(stats.available_beds, 2);
    assert_eq!(stats.occupied_beds, 0);
}
