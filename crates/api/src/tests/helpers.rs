// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use quarters_domain::Role;
use quarters_persistence::Persistence;

use crate::AuthenticatedActor;
use crate::handlers;
use crate::request_response::{
    AssignBedRequest, BedInfo, BlockInfo, BlockRequest, CreateBedRequest, CreateRequestRequest,
    CreateRoomRequest, RequestInfo, RoomInfo,
};

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn seed_system_admin(db: &mut Persistence) -> AuthenticatedActor {
    let user_id: i64 = db
        .create_user(
            "Root Admin",
            "root@example.com",
            "rootpassword1",
            "systemAdmin",
            true,
        )
        .expect("Failed to create system admin");
    AuthenticatedActor::new(user_id, String::from("Root Admin"), Role::SystemAdmin)
}

pub fn seed_admin(db: &mut Persistence, email: &str) -> AuthenticatedActor {
    let user_id: i64 = db
        .create_user("Facility Admin", email, "adminpassword1", "admin", true)
        .expect("Failed to create admin");
    AuthenticatedActor::new(user_id, String::from("Facility Admin"), Role::Admin)
}

pub fn seed_block_head(db: &mut Persistence, email: &str) -> AuthenticatedActor {
    let user_id: i64 = db
        .create_user("Block Head", email, "headpassword1", "blockHead", true)
        .expect("Failed to create block head");
    AuthenticatedActor::new(user_id, String::from("Block Head"), Role::BlockHead)
}

pub fn seed_block(
    db: &mut Persistence,
    actor: &AuthenticatedActor,
    name: &str,
    head: &AuthenticatedActor,
) -> BlockInfo {
    handlers::create_block(
        db,
        actor,
        BlockRequest {
            name: name.to_string(),
            block_type: String::from("A Block"),
            description: Some(String::from("Test block")),
            block_head_id: head.user_id,
        },
    )
    .expect("Failed to create block")
}

pub fn seed_room(
    db: &mut Persistence,
    actor: &AuthenticatedActor,
    block_id: i64,
    room_number: &str,
) -> RoomInfo {
    handlers::create_room(
        db,
        actor,
        block_id,
        CreateRoomRequest {
            room_number: room_number.to_string(),
            room_type: String::from("Double"),
            capacity: 2,
            description: None,
            amenities: vec![String::from("WiFi")],
            price_per_day: 150.0,
        },
    )
    .expect("Failed to create room")
}

pub fn seed_bed(
    db: &mut Persistence,
    actor: &AuthenticatedActor,
    room_id: i64,
    bed_number: &str,
) -> BedInfo {
    handlers::create_bed(
        db,
        actor,
        room_id,
        CreateBedRequest {
            bed_number: bed_number.to_string(),
            status: None,
        },
    )
    .expect("Failed to create bed")
}

pub fn occupant_request() -> AssignBedRequest {
    AssignBedRequest {
        name: String::from("Amira Hassan"),
        contact_info: String::from("amira@example.com"),
        check_in_date: String::from("2026-03-01"),
        check_out_date: String::from("2026-03-15"),
        purpose: String::from("Official visit"),
    }
}

pub fn seed_request(
    db: &mut Persistence,
    creator: &AuthenticatedActor,
    block_id: i64,
) -> RequestInfo {
    handlers::create_request(
        db,
        creator,
        CreateRequestRequest {
            requester_name: String::from("Amira Hassan"),
            requester_contact: String::from("amira@example.com"),
            purpose: String::from("Official visit"),
            block_preference_id: block_id,
            room_type_preference: String::from("Double"),
            check_in_date: String::from("2026-03-01"),
            check_out_date: String::from("2026-03-15"),
            number_of_occupants: 2,
            special_requirements: None,
        },
    )
    .expect("Failed to create request")
}
