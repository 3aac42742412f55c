// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BedStatus, BlockType, DomainError, NotificationType, RequestStatus, Role, RoomStatus, RoomType,
};

#[test]
fn role_round_trips_through_canonical_strings() {
    for role in [Role::SystemAdmin, Role::Admin, Role::BlockHead] {
        assert_eq!(Role::parse(role.as_str()), Ok(role));
    }
}

#[test]
fn unknown_role_is_rejected() {
    assert_eq!(
        Role::parse("superuser"),
        Err(DomainError::InvalidRole("superuser".to_string()))
    );
}

#[test]
fn block_type_round_trips_through_canonical_strings() {
    for block_type in [
        BlockType::ABlock,
        BlockType::BBlock,
        BlockType::GuestHouse,
        BlockType::SoMess,
        BlockType::Dormitory,
    ] {
        assert_eq!(BlockType::parse(block_type.as_str()), Ok(block_type));
    }
}

#[test]
fn room_type_round_trips_through_canonical_strings() {
    for room_type in [
        RoomType::Single,
        RoomType::Double,
        RoomType::Triple,
        RoomType::Dormitory,
        RoomType::VipSuite,
    ] {
        assert_eq!(RoomType::parse(room_type.as_str()), Ok(room_type));
    }
}

#[test]
fn room_status_uses_spaced_wire_names() {
    assert_eq!(RoomStatus::PartiallyOccupied.as_str(), "Partially Occupied");
    assert_eq!(RoomStatus::FullyOccupied.as_str(), "Fully Occupied");
    assert_eq!(RoomStatus::UnderMaintenance.as_str(), "Under Maintenance");
    assert_eq!(
        RoomStatus::parse("Partially Occupied"),
        Ok(RoomStatus::PartiallyOccupied)
    );
}

#[test]
fn bed_status_rejects_room_status_values() {
    assert_eq!(
        BedStatus::parse("Fully Occupied"),
        Err(DomainError::InvalidBedStatus("Fully Occupied".to_string()))
    );
}

#[test]
fn request_status_round_trips_through_canonical_strings() {
    for status in [
        RequestStatus::Pending,
        RequestStatus::UnderReview,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Cancelled,
        RequestStatus::Completed,
    ] {
        assert_eq!(RequestStatus::parse(status.as_str()), Ok(status));
    }
}

#[test]
fn notification_type_round_trips_through_canonical_strings() {
    for kind in [
        NotificationType::NewRequest,
        NotificationType::RequestUpdate,
        NotificationType::RoomAssigned,
        NotificationType::RequestRejected,
        NotificationType::RoomVacated,
        NotificationType::SystemUpdate,
    ] {
        assert_eq!(NotificationType::parse(kind.as_str()), Ok(kind));
    }
}

#[test]
fn enums_serialize_to_wire_strings() {
    let json: String = serde_json::to_string(&RoomStatus::PartiallyOccupied).unwrap_or_default();
    assert_eq!(json, "\"Partially Occupied\"");
    let json: String = serde_json::to_string(&Role::BlockHead).unwrap_or_default();
    assert_eq!(json, "\"blockHead\"");
}
