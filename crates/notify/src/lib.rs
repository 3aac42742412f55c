// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification events for the Quarters accommodation system.
//!
//! Workflow transitions fan out to the people who need to act on them:
//! a new request notifies the block head, an approval notifies the admin
//! who handled it, and so on. This crate defines the event value that the
//! persistence layer stores; it performs no delivery itself.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use quarters_domain::NotificationType;

#[cfg(test)]
mod tests;

/// A reference to the entity a notification is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedEntity {
    /// The entity kind (e.g. "`AccommodationRequest`", "`Bed`").
    pub model: String,
    /// The entity's row id.
    pub id: i64,
}

impl RelatedEntity {
    /// Creates a new `RelatedEntity`.
    ///
    /// # Arguments
    ///
    /// * `model` - The entity kind
    /// * `id` - The entity's row id
    #[must_use]
    pub const fn new(model: String, id: i64) -> Self {
        Self { model, id }
    }
}

/// A notification event produced by a workflow transition.
///
/// Every event names its recipient and the user whose action produced it,
/// and is written in the same database transaction as the transition that
/// raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    /// The user who should see this notification.
    pub recipient_id: i64,
    /// The user whose action produced it.
    pub sender_id: i64,
    /// The notification category.
    pub kind: NotificationType,
    /// Short display title.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// The entity the notification is about, when there is one.
    pub related: Option<RelatedEntity>,
}

impl NotificationEvent {
    /// Creates a notification event from raw parts.
    #[must_use]
    pub const fn new(
        recipient_id: i64,
        sender_id: i64,
        kind: NotificationType,
        title: String,
        message: String,
        related: Option<RelatedEntity>,
    ) -> Self {
        Self {
            recipient_id,
            sender_id,
            kind,
            title,
            message,
            related,
        }
    }

    /// A new accommodation request arrived for a block head to review.
    #[must_use]
    pub fn new_request(
        block_head_id: i64,
        creator_id: i64,
        request_id: i64,
        request_number: &str,
        requester_name: &str,
    ) -> Self {
        Self::new(
            block_head_id,
            creator_id,
            NotificationType::NewRequest,
            "New accommodation request".to_string(),
            format!("Request {request_number} from {requester_name} is awaiting review"),
            Some(RelatedEntity::new(
                "AccommodationRequest".to_string(),
                request_id,
            )),
        )
    }

    /// Beds were assigned and the request approved.
    #[must_use]
    pub fn room_assigned(
        admin_id: i64,
        block_head_id: i64,
        request_id: i64,
        request_number: &str,
        room_number: &str,
    ) -> Self {
        Self::new(
            admin_id,
            block_head_id,
            NotificationType::RoomAssigned,
            "Room assigned".to_string(),
            format!("Request {request_number} has been approved with room {room_number}"),
            Some(RelatedEntity::new(
                "AccommodationRequest".to_string(),
                request_id,
            )),
        )
    }

    /// A request was rejected.
    #[must_use]
    pub fn request_rejected(
        admin_id: i64,
        handler_id: i64,
        request_id: i64,
        request_number: &str,
        reason: &str,
    ) -> Self {
        Self::new(
            admin_id,
            handler_id,
            NotificationType::RequestRejected,
            "Request rejected".to_string(),
            format!("Request {request_number} was rejected: {reason}"),
            Some(RelatedEntity::new(
                "AccommodationRequest".to_string(),
                request_id,
            )),
        )
    }

    /// A request changed status outside the assign/reject paths.
    #[must_use]
    pub fn request_update(
        recipient_id: i64,
        actor_id: i64,
        request_id: i64,
        request_number: &str,
        new_status: &str,
    ) -> Self {
        Self::new(
            recipient_id,
            actor_id,
            NotificationType::RequestUpdate,
            "Request updated".to_string(),
            format!("Request {request_number} is now '{new_status}'"),
            Some(RelatedEntity::new(
                "AccommodationRequest".to_string(),
                request_id,
            )),
        )
    }

    /// A bed was vacated.
    #[must_use]
    pub fn room_vacated(
        block_head_id: i64,
        actor_id: i64,
        bed_id: i64,
        bed_number: &str,
        occupant_name: &str,
    ) -> Self {
        Self::new(
            block_head_id,
            actor_id,
            NotificationType::RoomVacated,
            "Bed vacated".to_string(),
            format!("{occupant_name} has vacated bed {bed_number}"),
            Some(RelatedEntity::new("Bed".to_string(), bed_id)),
        )
    }
}
