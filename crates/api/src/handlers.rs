// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler follows the same order: authorize the actor, validate
//! the input against the domain rules, call persistence, and translate
//! the row data into a response DTO. Handlers never inspect entity
//! status themselves; the workflow rules live below this layer.

use quarters_domain::{
    BedStatus, BlockType, EarlyVacateDetails, Occupant, RequestStatus, Role, RoomStatus, RoomType,
    validate_block_fields, validate_capacity, validate_date_range, validate_description,
    validate_email, validate_name, validate_occupant_count, validate_password,
    validate_price_per_day, validate_purpose, validate_rejection_reason,
};
use quarters_persistence::{
    AdminOverview, BedData, BlockHeadOverview, BlockStats, Persistence, RequestData, RoomData,
    SystemOverview, UserData,
};
use time::format_description::well_known::Iso8601;
use time::{Date, OffsetDateTime};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AddNoteRequest, AssignBedRequest, AssignBedsRequest, BedDetailResponse, BedInfo, BlockInfo,
    BlockRequest, ChangePasswordRequest, CreateBedRequest, CreateRequestRequest,
    CreateRoomRequest, CreateUserRequest, EarlyVacateRecordInfo, LoginRequest, LoginResponse,
    NotificationInfo, NotificationListResponse, RejectRequestRequest, RequestDetailResponse,
    RequestInfo, RequestNoteInfo, RoomInfo, SetRequestStatusRequest, UpdateBedStatusRequest,
    UpdateRequestRequest, UpdateRoomRequest, UpdateUserRequest, UserInfo, VacateBedRequest,
};

fn parse_date_field(value: &str, field: &'static str) -> Result<Date, ApiError> {
    Date::parse(value, &Iso8601::DEFAULT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{value}' is not a valid ISO 8601 date: {e}"),
    })
}

/// Generates a unique request number from the current time and a random
/// component.
#[must_use]
pub fn generate_request_number() -> String {
    let millis: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("REQ-{millis}-{}", rand::random_range(0..1000_u32))
}

/// Resolves the registered head of the block that owns a room.
fn block_head_for_room(
    persistence: &mut Persistence,
    room_id: i64,
) -> Result<i64, ApiError> {
    let room: RoomData = persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?;
    let block = persistence
        .get_block(room.block_id)
        .map_err(translate_persistence_error)?;
    Ok(block.block_head_id)
}

/// Resolves the registered head of the block that owns a bed.
fn block_head_for_bed(persistence: &mut Persistence, bed_id: i64) -> Result<i64, ApiError> {
    let bed: BedData = persistence
        .get_bed(bed_id)
        .map_err(translate_persistence_error)?;
    block_head_for_room(persistence, bed.room_id)
}

// --- authentication ---

/// Logs a user in and returns their session token.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for bad credentials or a deactivated
/// account.
pub fn login(
    persistence: &mut Persistence,
    request: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (token, actor) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;
    let user: UserData = persistence
        .get_user(actor.user_id)
        .map_err(translate_persistence_error)?;

    Ok(LoginResponse {
        token,
        user: UserInfo::from(user),
    })
}

/// Logs a session out.
///
/// # Errors
///
/// Returns an error if the session cannot be removed.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the profile behind the current session.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the account vanished mid-session.
pub fn whoami(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<UserInfo, ApiError> {
    let user: UserData = persistence
        .get_user(actor.user_id)
        .map_err(translate_persistence_error)?;
    Ok(UserInfo::from(user))
}

// --- users ---

/// Creates a user account.
///
/// # Errors
///
/// Returns `Forbidden` for non-systemAdmin actors, `InvalidInput` for
/// bad fields, or `Duplicate` for a taken email.
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    validate_name("name", &request.name).map_err(translate_domain_error)?;
    validate_email(&request.email).map_err(translate_domain_error)?;
    validate_password(&request.password).map_err(translate_domain_error)?;
    let role: Role = Role::parse(&request.role).map_err(translate_domain_error)?;

    let user_id: i64 = persistence
        .create_user(
            &request.name,
            &request.email,
            &request.password,
            role.as_str(),
            request.is_active,
        )
        .map_err(translate_persistence_error)?;

    let user: UserData = persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(UserInfo::from(user))
}

/// Lists all user accounts.
///
/// # Errors
///
/// Returns `Forbidden` for non-systemAdmin actors.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<UserInfo>, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let users: Vec<UserData> = persistence.list_users().map_err(translate_persistence_error)?;
    Ok(users.into_iter().map(UserInfo::from).collect())
}

/// Gets one user account.
///
/// # Errors
///
/// Returns `Forbidden` for non-systemAdmin actors and `ResourceNotFound`
/// for an unknown id.
pub fn get_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let user: UserData = persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(UserInfo::from(user))
}

/// Updates a user's profile.
///
/// # Errors
///
/// Returns `Forbidden` for non-systemAdmin actors, `InvalidInput` for
/// bad fields, or `Duplicate` for a taken email.
pub fn update_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: UpdateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    validate_name("name", &request.name).map_err(translate_domain_error)?;
    validate_email(&request.email).map_err(translate_domain_error)?;
    let role: Role = Role::parse(&request.role).map_err(translate_domain_error)?;

    persistence
        .update_user(
            user_id,
            &request.name,
            &request.email,
            role.as_str(),
            request.is_active,
        )
        .map_err(translate_persistence_error)?;

    let user: UserData = persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(UserInfo::from(user))
}

/// Changes a user's password, invalidating their sessions.
///
/// Users may change their own password; systemAdmin may change anyone's.
///
/// # Errors
///
/// Returns `Forbidden` when the actor is neither, or `InvalidInput` for
/// a weak password.
pub fn change_password(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: ChangePasswordRequest,
) -> Result<(), ApiError> {
    if actor.user_id != user_id {
        AuthorizationService::authorize_manage_users(actor)?;
    }
    validate_password(&request.new_password).map_err(translate_domain_error)?;

    // Typed NotFound before the blind update.
    persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?;
    persistence
        .update_password(user_id, &request.new_password)
        .map_err(translate_persistence_error)?;
    Ok(())
}

/// Deletes a user account.
///
/// # Errors
///
/// Returns `Forbidden` for non-systemAdmin actors and `InvalidState`
/// while the user still heads a block.
pub fn delete_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    persistence
        .delete_user(user_id)
        .map_err(translate_persistence_error)
}

// --- blocks ---

/// Creates a block.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors, `InvalidInput` for bad
/// fields, or `Duplicate` for a taken name.
pub fn create_block(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: BlockRequest,
) -> Result<BlockInfo, ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;

    validate_block_fields(&request.name, request.description.as_deref())
        .map_err(translate_domain_error)?;
    let block_type: BlockType =
        BlockType::parse(&request.block_type).map_err(translate_domain_error)?;

    let block_id: i64 = persistence
        .create_block(
            &request.name,
            block_type,
            request.description.as_deref(),
            request.block_head_id,
            actor.user_id,
        )
        .map_err(translate_persistence_error)?;

    let block = persistence
        .get_block(block_id)
        .map_err(translate_persistence_error)?;
    Ok(BlockInfo::from(block))
}

/// Lists all blocks. Any authenticated user may look.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_blocks(persistence: &mut Persistence) -> Result<Vec<BlockInfo>, ApiError> {
    let blocks = persistence.list_blocks().map_err(translate_persistence_error)?;
    Ok(blocks.into_iter().map(BlockInfo::from).collect())
}

/// Gets one block.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_block(persistence: &mut Persistence, block_id: i64) -> Result<BlockInfo, ApiError> {
    let block = persistence
        .get_block(block_id)
        .map_err(translate_persistence_error)?;
    Ok(BlockInfo::from(block))
}

/// Computes a block's statistics from its room and bed rows.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_block_stats(
    persistence: &mut Persistence,
    block_id: i64,
) -> Result<BlockStats, ApiError> {
    persistence
        .get_block_stats(block_id)
        .map_err(translate_persistence_error)
}

/// Updates a block's fields.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors, `InvalidInput` for bad
/// fields, or `Duplicate` for a taken name.
pub fn update_block(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    block_id: i64,
    request: BlockRequest,
) -> Result<BlockInfo, ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;

    validate_block_fields(&request.name, request.description.as_deref())
        .map_err(translate_domain_error)?;
    let block_type: BlockType =
        BlockType::parse(&request.block_type).map_err(translate_domain_error)?;

    persistence
        .update_block(
            block_id,
            &request.name,
            block_type,
            request.description.as_deref(),
            request.block_head_id,
        )
        .map_err(translate_persistence_error)?;

    let block = persistence
        .get_block(block_id)
        .map_err(translate_persistence_error)?;
    Ok(BlockInfo::from(block))
}

/// Deletes a block.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors and `InvalidState` while
/// rooms remain.
pub fn delete_block(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    block_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;

    persistence
        .delete_block(block_id)
        .map_err(translate_persistence_error)
}

// --- rooms ---

fn room_info(persistence: &mut Persistence, room: RoomData) -> Result<RoomInfo, ApiError> {
    let counts = persistence
        .get_room_bed_counts(room.room_id)
        .map_err(translate_persistence_error)?;
    Ok(RoomInfo::from_parts(room, counts))
}

/// Creates a room in a block.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors, `InvalidInput` for bad
/// fields, or `Duplicate` for a taken room number.
pub fn create_room(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    block_id: i64,
    request: CreateRoomRequest,
) -> Result<RoomInfo, ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;

    validate_name("room number", &request.room_number).map_err(translate_domain_error)?;
    validate_description("room description", request.description.as_deref())
        .map_err(translate_domain_error)?;
    validate_capacity(request.capacity).map_err(translate_domain_error)?;
    validate_price_per_day(request.price_per_day).map_err(translate_domain_error)?;
    let room_type: RoomType =
        RoomType::parse(&request.room_type).map_err(translate_domain_error)?;

    let room_id: i64 = persistence
        .create_room(
            block_id,
            &request.room_number,
            room_type,
            request.capacity,
            request.description.as_deref(),
            &request.amenities,
            request.price_per_day,
            actor.user_id,
        )
        .map_err(translate_persistence_error)?;

    let room: RoomData = persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?;
    room_info(persistence, room)
}

/// Lists the rooms in a block, each with its derived bed counts.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown block.
pub fn list_rooms_for_block(
    persistence: &mut Persistence,
    block_id: i64,
) -> Result<Vec<RoomInfo>, ApiError> {
    persistence
        .get_block(block_id)
        .map_err(translate_persistence_error)?;
    let rooms: Vec<RoomData> = persistence
        .list_rooms_for_block(block_id)
        .map_err(translate_persistence_error)?;

    let mut result: Vec<RoomInfo> = Vec::with_capacity(rooms.len());
    for room in rooms {
        result.push(room_info(persistence, room)?);
    }
    Ok(result)
}

/// Gets one room with its derived bed counts.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_room(persistence: &mut Persistence, room_id: i64) -> Result<RoomInfo, ApiError> {
    let room: RoomData = persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?;
    room_info(persistence, room)
}

/// Updates a room's metadata, and optionally forces its status.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors and `InvalidInput` for bad
/// fields.
pub fn update_room(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    room_id: i64,
    request: UpdateRoomRequest,
) -> Result<RoomInfo, ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;

    validate_description("room description", request.description.as_deref())
        .map_err(translate_domain_error)?;
    validate_capacity(request.capacity).map_err(translate_domain_error)?;
    validate_price_per_day(request.price_per_day).map_err(translate_domain_error)?;
    let room_type: RoomType =
        RoomType::parse(&request.room_type).map_err(translate_domain_error)?;
    let status: Option<RoomStatus> = request
        .status
        .as_deref()
        .map(RoomStatus::parse)
        .transpose()
        .map_err(translate_domain_error)?;

    persistence
        .update_room(
            room_id,
            room_type,
            request.capacity,
            request.description.as_deref(),
            &request.amenities,
            request.price_per_day,
            status,
        )
        .map_err(translate_persistence_error)?;

    let room: RoomData = persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?;
    room_info(persistence, room)
}

/// Deletes a room.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors and `InvalidState` while
/// beds remain.
pub fn delete_room(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    room_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;

    persistence
        .delete_room(room_id)
        .map_err(translate_persistence_error)
}

// --- beds ---

/// Creates a bed in a room.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the block's
/// head, or `Duplicate` for a taken bed number.
pub fn create_bed(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    room_id: i64,
    request: CreateBedRequest,
) -> Result<BedInfo, ApiError> {
    let head_id: i64 = block_head_for_room(persistence, room_id)?;
    AuthorizationService::authorize_manage_beds(actor, head_id)?;

    validate_name("bed number", &request.bed_number).map_err(translate_domain_error)?;
    let status: BedStatus = request
        .status
        .as_deref()
        .map(BedStatus::parse)
        .transpose()
        .map_err(translate_domain_error)?
        .unwrap_or(BedStatus::Available);

    let bed_id: i64 = persistence
        .create_bed(room_id, &request.bed_number, status, actor.user_id)
        .map_err(translate_persistence_error)?;

    let bed: BedData = persistence
        .get_bed(bed_id)
        .map_err(translate_persistence_error)?;
    Ok(BedInfo::from(bed))
}

/// Lists the beds in a room.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown room.
pub fn list_beds_for_room(
    persistence: &mut Persistence,
    room_id: i64,
) -> Result<Vec<BedInfo>, ApiError> {
    persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?;
    let beds: Vec<BedData> = persistence
        .list_beds_for_room(room_id)
        .map_err(translate_persistence_error)?;
    Ok(beds.into_iter().map(BedInfo::from).collect())
}

/// Gets one bed with its early-vacate history.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_bed(persistence: &mut Persistence, bed_id: i64) -> Result<BedDetailResponse, ApiError> {
    let bed: BedData = persistence
        .get_bed(bed_id)
        .map_err(translate_persistence_error)?;
    let history = persistence
        .list_early_vacate_records(bed_id)
        .map_err(translate_persistence_error)?;

    Ok(BedDetailResponse {
        bed: BedInfo::from(bed),
        early_vacate_history: history
            .into_iter()
            .map(EarlyVacateRecordInfo::from)
            .collect(),
    })
}

/// Changes a bed's status directly.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the block's
/// head.
pub fn update_bed_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    bed_id: i64,
    request: UpdateBedStatusRequest,
) -> Result<BedInfo, ApiError> {
    let head_id: i64 = block_head_for_bed(persistence, bed_id)?;
    AuthorizationService::authorize_manage_beds(actor, head_id)?;

    let status: BedStatus = BedStatus::parse(&request.status).map_err(translate_domain_error)?;
    persistence
        .update_bed_status(bed_id, status)
        .map_err(translate_persistence_error)?;

    let bed: BedData = persistence
        .get_bed(bed_id)
        .map_err(translate_persistence_error)?;
    Ok(BedInfo::from(bed))
}

/// Deletes a bed.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the block's
/// head, or `InvalidState` while the bed is occupied.
pub fn delete_bed(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    bed_id: i64,
) -> Result<(), ApiError> {
    let head_id: i64 = block_head_for_bed(persistence, bed_id)?;
    AuthorizationService::authorize_manage_beds(actor, head_id)?;

    persistence
        .delete_bed(bed_id)
        .map_err(translate_persistence_error)
}

/// Assigns an occupant to a bed.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the block's
/// head, `InvalidInput` for bad dates, or `InvalidState` when the bed is
/// not available.
pub fn assign_bed(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    bed_id: i64,
    request: AssignBedRequest,
) -> Result<BedInfo, ApiError> {
    let head_id: i64 = block_head_for_bed(persistence, bed_id)?;
    AuthorizationService::authorize_manage_beds(actor, head_id)?;

    let check_in: Date = parse_date_field(&request.check_in_date, "checkInDate")?;
    let check_out: Date = parse_date_field(&request.check_out_date, "checkOutDate")?;
    let occupant: Occupant = Occupant {
        name: request.name,
        contact_info: request.contact_info,
        check_in_date: check_in,
        check_out_date: check_out,
        purpose: request.purpose,
    };

    persistence
        .assign_bed(bed_id, &occupant)
        .map_err(translate_persistence_error)?;

    let bed: BedData = persistence
        .get_bed(bed_id)
        .map_err(translate_persistence_error)?;
    Ok(BedInfo::from(bed))
}

/// Vacates a bed, recording early-vacate history when the date is before
/// the occupant's scheduled check-out.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the block's
/// head, `InvalidState` when the bed is not occupied, or `InvalidInput`
/// when required early-vacate details are missing.
pub fn vacate_bed(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    bed_id: i64,
    request: VacateBedRequest,
) -> Result<BedInfo, ApiError> {
    let head_id: i64 = block_head_for_bed(persistence, bed_id)?;
    AuthorizationService::authorize_manage_beds(actor, head_id)?;

    let vacate_date: Date = parse_date_field(&request.vacate_date, "vacateDate")?;
    let details: Option<EarlyVacateDetails> =
        match (request.reason, request.contact_name, request.contact_number) {
            (Some(reason), Some(contact_name), Some(contact_number)) => {
                Some(EarlyVacateDetails {
                    reason,
                    contact_name,
                    contact_number,
                    notes: request.notes,
                })
            }
            _ => None,
        };

    persistence
        .vacate_bed(bed_id, vacate_date, details.as_ref(), actor.user_id)
        .map_err(translate_persistence_error)?;

    let bed: BedData = persistence
        .get_bed(bed_id)
        .map_err(translate_persistence_error)?;
    Ok(BedInfo::from(bed))
}

// --- requests ---

fn request_detail(
    persistence: &mut Persistence,
    request: RequestData,
) -> Result<RequestDetailResponse, ApiError> {
    let assigned_bed_ids: Vec<i64> = persistence
        .list_assigned_bed_ids(request.request_id)
        .map_err(translate_persistence_error)?;
    let notes = persistence
        .list_request_notes(request.request_id)
        .map_err(translate_persistence_error)?;

    Ok(RequestDetailResponse {
        request: RequestInfo::from(request),
        assigned_bed_ids,
        notes: notes.into_iter().map(RequestNoteInfo::from).collect(),
    })
}

fn validate_request_fields(
    requester_name: &str,
    requester_contact: &str,
    purpose: &str,
    check_in: Date,
    check_out: Date,
    number_of_occupants: i32,
    special_requirements: Option<&str>,
) -> Result<(), ApiError> {
    validate_name("requester name", requester_name).map_err(translate_domain_error)?;
    validate_name("requester contact", requester_contact).map_err(translate_domain_error)?;
    validate_purpose(purpose).map_err(translate_domain_error)?;
    validate_date_range(check_in, check_out).map_err(translate_domain_error)?;
    validate_occupant_count(number_of_occupants).map_err(translate_domain_error)?;
    validate_description("special requirements", special_requirements)
        .map_err(translate_domain_error)?;
    Ok(())
}

/// Creates an accommodation request. Any authenticated user may file
/// one; the head of the preferred block is notified.
///
/// # Errors
///
/// Returns `InvalidInput` for bad fields or `ResourceNotFound` for an
/// unknown block preference.
pub fn create_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateRequestRequest,
) -> Result<RequestInfo, ApiError> {
    let check_in: Date = parse_date_field(&request.check_in_date, "checkInDate")?;
    let check_out: Date = parse_date_field(&request.check_out_date, "checkOutDate")?;
    validate_request_fields(
        &request.requester_name,
        &request.requester_contact,
        &request.purpose,
        check_in,
        check_out,
        request.number_of_occupants,
        request.special_requirements.as_deref(),
    )?;
    let room_type: RoomType =
        RoomType::parse(&request.room_type_preference).map_err(translate_domain_error)?;

    let request_number: String = generate_request_number();
    let request_id: i64 = persistence
        .create_request(
            &request_number,
            &request.requester_name,
            &request.requester_contact,
            &request.purpose,
            request.block_preference_id,
            room_type,
            check_in,
            check_out,
            request.number_of_occupants,
            request.special_requirements.as_deref(),
            actor.user_id,
        )
        .map_err(translate_persistence_error)?;

    let created: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    Ok(RequestInfo::from(created))
}

/// Lists requests, scoped to the actor's role: admins see everything,
/// block heads see the requests aimed at their blocks plus any they
/// filed themselves.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown status filter.
pub fn list_requests(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    status_filter: Option<&str>,
) -> Result<Vec<RequestInfo>, ApiError> {
    let status: Option<RequestStatus> = status_filter
        .map(RequestStatus::parse)
        .transpose()
        .map_err(translate_domain_error)?;

    let rows: Vec<RequestData> = match actor.role {
        Role::SystemAdmin | Role::Admin => persistence
            .list_requests(status)
            .map_err(translate_persistence_error)?,
        Role::BlockHead => {
            let mut rows: Vec<RequestData> = persistence
                .list_requests_for_block_head(actor.user_id)
                .map_err(translate_persistence_error)?;
            let filed: Vec<RequestData> = persistence
                .list_requests_created_by(actor.user_id)
                .map_err(translate_persistence_error)?;
            for row in filed {
                if !rows.iter().any(|seen| seen.request_id == row.request_id) {
                    rows.push(row);
                }
            }
            rows.retain(|row| status.is_none_or(|s| row.status == s.as_str()));
            rows
        }
    };

    Ok(rows.into_iter().map(RequestInfo::from).collect())
}

/// Gets one request with its notes and assigned beds.
///
/// Visible to admins, the head of its preferred block, and its creator.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id and `Forbidden` for
/// anyone outside that circle.
pub fn get_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
) -> Result<RequestDetailResponse, ApiError> {
    let row: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;

    if !actor.is_admin() && row.created_by != actor.user_id {
        let block = persistence
            .get_block(row.block_preference_id)
            .map_err(translate_persistence_error)?;
        AuthorizationService::authorize_handle_request(actor, block.block_head_id)?;
    }

    request_detail(persistence, row)
}

/// Updates an undecided request.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is an admin or the creator,
/// `InvalidInput` for bad fields, or `InvalidState` once decided.
pub fn update_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
    request: UpdateRequestRequest,
) -> Result<RequestInfo, ApiError> {
    let row: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    if !actor.is_admin() && row.created_by != actor.user_id {
        return Err(ApiError::Forbidden {
            action: String::from("update_request"),
            required_role: String::from("creator or admin"),
        });
    }

    let check_in: Date = parse_date_field(&request.check_in_date, "checkInDate")?;
    let check_out: Date = parse_date_field(&request.check_out_date, "checkOutDate")?;
    validate_request_fields(
        &request.requester_name,
        &request.requester_contact,
        &request.purpose,
        check_in,
        check_out,
        request.number_of_occupants,
        request.special_requirements.as_deref(),
    )?;
    let room_type: RoomType =
        RoomType::parse(&request.room_type_preference).map_err(translate_domain_error)?;

    persistence
        .update_request(
            request_id,
            &request.requester_name,
            &request.requester_contact,
            &request.purpose,
            room_type,
            check_in,
            check_out,
            request.number_of_occupants,
            request.special_requirements.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    let updated: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    Ok(RequestInfo::from(updated))
}

/// Approves a request by assigning beds in a room to it.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the preferred
/// block's head, `InvalidInput` for too few beds, or `InvalidState` for
/// unavailable beds or an illegal transition.
pub fn assign_beds_to_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
    request: AssignBedsRequest,
) -> Result<RequestDetailResponse, ApiError> {
    let row: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    let block = persistence
        .get_block(row.block_preference_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_handle_request(actor, block.block_head_id)?;

    persistence
        .assign_beds_to_request(request_id, request.room_id, &request.bed_ids, actor.user_id)
        .map_err(translate_persistence_error)?;

    let updated: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    request_detail(persistence, updated)
}

/// Rejects a request with a reason.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is systemAdmin or the preferred
/// block's head, `InvalidInput` for an empty reason, or `InvalidState`
/// for an illegal transition.
pub fn reject_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
    request: RejectRequestRequest,
) -> Result<RequestInfo, ApiError> {
    let row: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    let block = persistence
        .get_block(row.block_preference_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_handle_request(actor, block.block_head_id)?;

    validate_rejection_reason(&request.reason).map_err(translate_domain_error)?;

    persistence
        .reject_request(request_id, &request.reason, actor.user_id)
        .map_err(translate_persistence_error)?;

    let updated: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    Ok(RequestInfo::from(updated))
}

/// Cancels a request.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is an admin or the creator, or
/// `InvalidState` once the request is approved or already closed.
pub fn cancel_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
) -> Result<RequestInfo, ApiError> {
    let row: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    if !actor.is_admin() && row.created_by != actor.user_id {
        return Err(ApiError::Forbidden {
            action: String::from("cancel_request"),
            required_role: String::from("creator or admin"),
        });
    }

    persistence
        .cancel_request(request_id, actor.user_id)
        .map_err(translate_persistence_error)?;

    let updated: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    Ok(RequestInfo::from(updated))
}

/// Moves a request directly to another status. Transitions into
/// `Completed` or `Rejected` release its beds.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors, `InvalidInput` for an
/// unknown status, or `InvalidState` for an illegal transition.
pub fn set_request_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
    request: SetRequestStatusRequest,
) -> Result<RequestInfo, ApiError> {
    AuthorizationService::authorize_administer_requests(actor)?;

    let status: RequestStatus =
        RequestStatus::parse(&request.status).map_err(translate_domain_error)?;

    persistence
        .set_request_status(request_id, status, actor.user_id, actor.is_admin())
        .map_err(translate_persistence_error)?;

    let updated: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    Ok(RequestInfo::from(updated))
}

/// Appends a note to a request.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is an admin, the preferred
/// block's head, or the creator, or `InvalidInput` for an empty note.
pub fn add_request_note(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
    request: AddNoteRequest,
) -> Result<RequestNoteInfo, ApiError> {
    let row: RequestData = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    if !actor.is_admin() && row.created_by != actor.user_id {
        let block = persistence
            .get_block(row.block_preference_id)
            .map_err(translate_persistence_error)?;
        AuthorizationService::authorize_handle_request(actor, block.block_head_id)?;
    }

    if request.message.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("message"),
            message: String::from("Note message must not be empty"),
        });
    }
    validate_description("note message", Some(&request.message))
        .map_err(translate_domain_error)?;

    let note_id: i64 = persistence
        .add_request_note(request_id, actor.user_id, &request.message)
        .map_err(translate_persistence_error)?;

    let notes = persistence
        .list_request_notes(request_id)
        .map_err(translate_persistence_error)?;
    notes
        .into_iter()
        .find(|note| note.note_id == note_id)
        .map(RequestNoteInfo::from)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Note vanished after insert"),
        })
}

/// Deletes a request that holds no assignments.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors and `InvalidState` while
/// beds or a room remain assigned.
pub fn delete_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_administer_requests(actor)?;

    persistence
        .delete_request(request_id)
        .map_err(translate_persistence_error)
}

// --- notifications ---

/// Lists the actor's notifications with the unread count.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_notifications(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<NotificationListResponse, ApiError> {
    let rows = persistence
        .list_notifications_for_recipient(actor.user_id)
        .map_err(translate_persistence_error)?;
    let unread_count: i64 = persistence
        .count_unread_notifications(actor.user_id)
        .map_err(translate_persistence_error)?;

    Ok(NotificationListResponse {
        notifications: rows.into_iter().map(NotificationInfo::from).collect(),
        unread_count,
    })
}

/// Marks one of the actor's notifications as read.
///
/// # Errors
///
/// Returns `ResourceNotFound` when it is not theirs or missing.
pub fn mark_notification_read(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    notification_id: i64,
) -> Result<(), ApiError> {
    persistence
        .mark_notification_read(notification_id, actor.user_id)
        .map_err(translate_persistence_error)
}

/// Marks all of the actor's notifications as read.
///
/// # Errors
///
/// Returns `Internal` if the update fails.
pub fn mark_all_notifications_read(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<usize, ApiError> {
    persistence
        .mark_all_notifications_read(actor.user_id)
        .map_err(translate_persistence_error)
}

/// Deletes one of the actor's notifications.
///
/// # Errors
///
/// Returns `ResourceNotFound` when it is not theirs or missing.
pub fn delete_notification(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    notification_id: i64,
) -> Result<(), ApiError> {
    persistence
        .delete_notification(notification_id, actor.user_id)
        .map_err(translate_persistence_error)
}

// --- dashboards ---

/// Builds the systemAdmin dashboard.
///
/// # Errors
///
/// Returns `Forbidden` for other roles.
pub fn system_admin_dashboard(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<SystemOverview, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;
    persistence
        .system_overview()
        .map_err(translate_persistence_error)
}

/// Builds the admin dashboard.
///
/// # Errors
///
/// Returns `Forbidden` for blockHead actors.
pub fn admin_dashboard(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<AdminOverview, ApiError> {
    AuthorizationService::authorize_manage_blocks(actor)?;
    persistence
        .admin_overview()
        .map_err(translate_persistence_error)
}

/// Builds the blockHead dashboard for the actor's blocks.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor holds the blockHead role.
pub fn block_head_dashboard(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<BlockHeadOverview, ApiError> {
    if actor.role != Role::BlockHead {
        return Err(ApiError::Forbidden {
            action: String::from("block_head_dashboard"),
            required_role: Role::BlockHead.as_str().to_string(),
        });
    }
    persistence
        .block_head_overview(actor.user_id)
        .map_err(translate_persistence_error)
}
