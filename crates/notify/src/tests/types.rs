// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::NotificationType;

use crate::{NotificationEvent, RelatedEntity};

#[test]
fn new_request_targets_the_block_head() {
    let event: NotificationEvent =
        NotificationEvent::new_request(7, 3, 42, "REQ-1756000000000-17", "A. Rao");
    assert_eq!(event.recipient_id, 7);
    assert_eq!(event.sender_id, 3);
    assert_eq!(event.kind, NotificationType::NewRequest);
    assert!(event.message.contains("REQ-1756000000000-17"));
    assert!(event.message.contains("A. Rao"));
    assert_eq!(
        event.related,
        Some(RelatedEntity::new("AccommodationRequest".to_string(), 42))
    );
}

#[test]
fn room_assigned_names_the_room() {
    let event: NotificationEvent =
        NotificationEvent::room_assigned(3, 7, 42, "REQ-1756000000000-17", "101");
    assert_eq!(event.kind, NotificationType::RoomAssigned);
    assert!(event.message.contains("room 101"));
}

#[test]
fn request_rejected_carries_the_reason() {
    let event: NotificationEvent =
        NotificationEvent::request_rejected(3, 7, 42, "REQ-1756000000000-17", "No availability");
    assert_eq!(event.kind, NotificationType::RequestRejected);
    assert!(event.message.contains("No availability"));
}

#[test]
fn request_update_names_the_new_status() {
    let event: NotificationEvent =
        NotificationEvent::request_update(7, 3, 42, "REQ-1756000000000-17", "Cancelled");
    assert_eq!(event.kind, NotificationType::RequestUpdate);
    assert!(event.message.contains("'Cancelled'"));
}

#[test]
fn room_vacated_references_the_bed() {
    let event: NotificationEvent = NotificationEvent::room_vacated(7, 3, 9, "B-2", "M. Iyer");
    assert_eq!(event.kind, NotificationType::RoomVacated);
    assert_eq!(event.related, Some(RelatedEntity::new("Bed".to_string(), 9)));
}
