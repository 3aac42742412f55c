// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use clap::Parser;
use quarters_api::{ApiError, handlers};
use quarters_api::request_response::{
    AddNoteRequest, AssignBedRequest, AssignBedsRequest, BedDetailResponse, BedInfo, BlockInfo,
    BlockRequest, ChangePasswordRequest, CreateBedRequest, CreateRequestRequest,
    CreateRoomRequest, CreateUserRequest, LoginRequest, LoginResponse, NotificationListResponse,
    RejectRequestRequest, RequestDetailResponse, RequestInfo, RequestNoteInfo, RoomInfo,
    SetRequestStatusRequest, UpdateBedStatusRequest, UpdateRequestRequest, UpdateRoomRequest,
    UpdateUserRequest, UserInfo, VacateBedRequest,
};
use quarters_persistence::{
    AdminOverview, BlockHeadOverview, BlockStats, Persistence, SystemOverview,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

mod session;

use session::SessionUser;

/// Quarters Server - HTTP server for the Quarters accommodation system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Display name for the bootstrap administrator account
    #[arg(long, default_value = "System Administrator")]
    admin_name: String,

    /// Email for the bootstrap administrator account, created only when
    /// no users exist yet
    #[arg(long)]
    admin_email: Option<String>,

    /// Password for the bootstrap administrator account
    #[arg(long)]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
}

/// The response envelope every endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    success: bool,
    /// The payload, absent on failure and on bodiless successes.
    data: Option<T>,
    /// A human-readable message, absent when the payload speaks for itself.
    message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    const fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiEnvelope<serde_json::Value> {
    fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ApiEnvelope<serde_json::Value>> = Json(ApiEnvelope {
            success: false,
            data: None,
            message: Some(self.message),
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. }
            | ApiError::InvalidState { .. }
            | ApiError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Query parameters for listing requests.
#[derive(Debug, Deserialize)]
struct RequestListQuery {
    /// Optional status filter.
    status: Option<String>,
}

// --- authentication ---

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiEnvelope<LoginResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = handlers::login(&mut persistence, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(response, "Login successful")))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_, token): SessionUser,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::logout(&mut persistence, &token)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Logged out")))
}

async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<UserInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let profile: UserInfo = handlers::whoami(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(profile)))
}

// --- users ---

async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiEnvelope<UserInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = handlers::create_user(&mut persistence, &actor, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(user, "User created")))
}

async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<Vec<UserInfo>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let users: Vec<UserInfo> = handlers::list_users(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(users)))
}

async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiEnvelope<UserInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = handlers::get_user(&mut persistence, &actor, user_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(user)))
}

async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiEnvelope<UserInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = handlers::update_user(&mut persistence, &actor, user_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(user, "User updated")))
}

async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::change_password(&mut persistence, &actor, user_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Password changed")))
}

async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_user(&mut persistence, &actor, user_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("User deleted")))
}

// --- blocks ---

async fn handle_create_block(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<BlockRequest>,
) -> Result<Json<ApiEnvelope<BlockInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let block: BlockInfo = handlers::create_block(&mut persistence, &actor, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(block, "Block created")))
}

async fn handle_list_blocks(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<ApiEnvelope<Vec<BlockInfo>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let blocks: Vec<BlockInfo> = handlers::list_blocks(&mut persistence)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(blocks)))
}

async fn handle_get_block(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(block_id): Path<i64>,
) -> Result<Json<ApiEnvelope<BlockInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let block: BlockInfo = handlers::get_block(&mut persistence, block_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(block)))
}

async fn handle_block_stats(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(block_id): Path<i64>,
) -> Result<Json<ApiEnvelope<BlockStats>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let stats: BlockStats = handlers::get_block_stats(&mut persistence, block_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(stats)))
}

async fn handle_update_block(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(block_id): Path<i64>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<ApiEnvelope<BlockInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let block: BlockInfo = handlers::update_block(&mut persistence, &actor, block_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(block, "Block updated")))
}

async fn handle_delete_block(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(block_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_block(&mut persistence, &actor, block_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Block deleted")))
}

// --- rooms ---

async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(block_id): Path<i64>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<ApiEnvelope<RoomInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let room: RoomInfo = handlers::create_room(&mut persistence, &actor, block_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(room, "Room created")))
}

async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(block_id): Path<i64>,
) -> Result<Json<ApiEnvelope<Vec<RoomInfo>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let rooms: Vec<RoomInfo> = handlers::list_rooms_for_block(&mut persistence, block_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(rooms)))
}

async fn handle_get_room(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(room_id): Path<i64>,
) -> Result<Json<ApiEnvelope<RoomInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let room: RoomInfo = handlers::get_room(&mut persistence, room_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(room)))
}

async fn handle_update_room(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(room_id): Path<i64>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<ApiEnvelope<RoomInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let room: RoomInfo = handlers::update_room(&mut persistence, &actor, room_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(room, "Room updated")))
}

async fn handle_delete_room(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(room_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_room(&mut persistence, &actor, room_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Room deleted")))
}

// --- beds ---

async fn handle_create_bed(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(room_id): Path<i64>,
    Json(req): Json<CreateBedRequest>,
) -> Result<Json<ApiEnvelope<BedInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bed: BedInfo = handlers::create_bed(&mut persistence, &actor, room_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(bed, "Bed created")))
}

async fn handle_list_beds(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(room_id): Path<i64>,
) -> Result<Json<ApiEnvelope<Vec<BedInfo>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let beds: Vec<BedInfo> = handlers::list_beds_for_room(&mut persistence, room_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(beds)))
}

async fn handle_get_bed(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(bed_id): Path<i64>,
) -> Result<Json<ApiEnvelope<BedDetailResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: BedDetailResponse = handlers::get_bed(&mut persistence, bed_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(detail)))
}

async fn handle_update_bed_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(bed_id): Path<i64>,
    Json(req): Json<UpdateBedStatusRequest>,
) -> Result<Json<ApiEnvelope<BedInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bed: BedInfo = handlers::update_bed_status(&mut persistence, &actor, bed_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(bed, "Bed status updated")))
}

async fn handle_delete_bed(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(bed_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_bed(&mut persistence, &actor, bed_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Bed deleted")))
}

async fn handle_assign_bed(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(bed_id): Path<i64>,
    Json(req): Json<AssignBedRequest>,
) -> Result<Json<ApiEnvelope<BedInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bed: BedInfo = handlers::assign_bed(&mut persistence, &actor, bed_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(bed, "Bed assigned")))
}

async fn handle_vacate_bed(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(bed_id): Path<i64>,
    Json(req): Json<VacateBedRequest>,
) -> Result<Json<ApiEnvelope<BedInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bed: BedInfo = handlers::vacate_bed(&mut persistence, &actor, bed_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(bed, "Bed vacated")))
}

// --- requests ---

async fn handle_create_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Json(req): Json<CreateRequestRequest>,
) -> Result<Json<ApiEnvelope<RequestInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let request: RequestInfo = handlers::create_request(&mut persistence, &actor, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(request, "Request submitted")))
}

async fn handle_list_requests(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<ApiEnvelope<Vec<RequestInfo>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let requests: Vec<RequestInfo> =
        handlers::list_requests(&mut persistence, &actor, query.status.as_deref())?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(requests)))
}

async fn handle_get_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
) -> Result<Json<ApiEnvelope<RequestDetailResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: RequestDetailResponse =
        handlers::get_request(&mut persistence, &actor, request_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(detail)))
}

async fn handle_update_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<UpdateRequestRequest>,
) -> Result<Json<ApiEnvelope<RequestInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let request: RequestInfo =
        handlers::update_request(&mut persistence, &actor, request_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(request, "Request updated")))
}

async fn handle_delete_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_request(&mut persistence, &actor, request_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Request deleted")))
}

async fn handle_set_request_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<SetRequestStatusRequest>,
) -> Result<Json<ApiEnvelope<RequestInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let request: RequestInfo =
        handlers::set_request_status(&mut persistence, &actor, request_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(request, "Status updated")))
}

async fn handle_assign_beds_to_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<AssignBedsRequest>,
) -> Result<Json<ApiEnvelope<RequestDetailResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: RequestDetailResponse =
        handlers::assign_beds_to_request(&mut persistence, &actor, request_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(detail, "Request approved")))
}

async fn handle_reject_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<RejectRequestRequest>,
) -> Result<Json<ApiEnvelope<RequestInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let request: RequestInfo =
        handlers::reject_request(&mut persistence, &actor, request_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(request, "Request rejected")))
}

async fn handle_cancel_request(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
) -> Result<Json<ApiEnvelope<RequestInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let request: RequestInfo = handlers::cancel_request(&mut persistence, &actor, request_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(request, "Request cancelled")))
}

async fn handle_add_request_note(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<AddNoteRequest>,
) -> Result<Json<ApiEnvelope<RequestNoteInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let note: RequestNoteInfo =
        handlers::add_request_note(&mut persistence, &actor, request_id, req)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::with_message(note, "Note added")))
}

// --- notifications ---

async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<NotificationListResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let inbox: NotificationListResponse =
        handlers::list_notifications(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(inbox)))
}

async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::mark_notification_read(&mut persistence, &actor, notification_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Notification marked read")))
}

async fn handle_mark_all_notifications_read(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let flipped: usize = handlers::mark_all_notifications_read(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope {
        success: true,
        data: Some(serde_json::json!({ "markedRead": flipped })),
        message: None,
    }))
}

async fn handle_delete_notification(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<ApiEnvelope<serde_json::Value>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_notification(&mut persistence, &actor, notification_id)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::message_only("Notification deleted")))
}

// --- dashboards ---

async fn handle_system_admin_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<SystemOverview>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let overview: SystemOverview = handlers::system_admin_dashboard(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(overview)))
}

async fn handle_admin_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<AdminOverview>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let overview: AdminOverview = handlers::admin_dashboard(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(overview)))
}

async fn handle_block_head_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _): SessionUser,
) -> Result<Json<ApiEnvelope<BlockHeadOverview>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let overview: BlockHeadOverview =
        handlers::block_head_dashboard(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(ApiEnvelope::data(overview)))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/me", get(handle_whoami))
        .route("/api/users", get(handle_list_users).post(handle_create_user))
        .route(
            "/api/users/{user_id}",
            get(handle_get_user)
                .put(handle_update_user)
                .delete(handle_delete_user),
        )
        .route("/api/users/{user_id}/password", put(handle_change_password))
        .route(
            "/api/blocks",
            get(handle_list_blocks).post(handle_create_block),
        )
        .route(
            "/api/blocks/{block_id}",
            get(handle_get_block)
                .put(handle_update_block)
                .delete(handle_delete_block),
        )
        .route("/api/blocks/{block_id}/stats", get(handle_block_stats))
        .route(
            "/api/blocks/{block_id}/rooms",
            get(handle_list_rooms).post(handle_create_room),
        )
        .route(
            "/api/rooms/{room_id}",
            get(handle_get_room)
                .put(handle_update_room)
                .delete(handle_delete_room),
        )
        .route(
            "/api/rooms/{room_id}/beds",
            get(handle_list_beds).post(handle_create_bed),
        )
        .route(
            "/api/beds/{bed_id}",
            get(handle_get_bed)
                .put(handle_update_bed_status)
                .delete(handle_delete_bed),
        )
        .route("/api/beds/{bed_id}/assign", put(handle_assign_bed))
        .route("/api/beds/{bed_id}/vacate", put(handle_vacate_bed))
        .route(
            "/api/requests",
            get(handle_list_requests).post(handle_create_request),
        )
        .route(
            "/api/requests/{request_id}",
            get(handle_get_request)
                .put(handle_update_request)
                .delete(handle_delete_request),
        )
        .route(
            "/api/requests/{request_id}/status",
            patch(handle_set_request_status),
        )
        .route(
            "/api/requests/{request_id}/assign",
            post(handle_assign_beds_to_request),
        )
        .route(
            "/api/requests/{request_id}/reject",
            post(handle_reject_request),
        )
        .route(
            "/api/requests/{request_id}/cancel",
            post(handle_cancel_request),
        )
        .route(
            "/api/requests/{request_id}/notes",
            post(handle_add_request_note),
        )
        .route("/api/notifications", get(handle_list_notifications))
        .route(
            "/api/notifications/read-all",
            put(handle_mark_all_notifications_read),
        )
        .route(
            "/api/notifications/{notification_id}",
            delete(handle_delete_notification),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            put(handle_mark_notification_read),
        )
        .route(
            "/api/dashboard/system-admin",
            get(handle_system_admin_dashboard),
        )
        .route("/api/dashboard/admin", get(handle_admin_dashboard))
        .route(
            "/api/dashboard/block-head",
            get(handle_block_head_dashboard),
        )
        .with_state(app_state)
}

/// Creates the bootstrap administrator when the user table is empty and
/// credentials were supplied on the command line.
fn bootstrap_admin(persistence: &mut Persistence, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let user_count: i64 = persistence.count_users()?;
    if user_count > 0 {
        return Ok(());
    }
    if let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password) {
        let user_id: i64 =
            persistence.create_user(&args.admin_name, email, password, "systemAdmin", true)?;
        info!(user_id, "Bootstrapped initial system administrator");
    } else {
        warn!(
            "No users exist and no bootstrap credentials were provided; \
             pass --admin-email and --admin-password to create one"
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Quarters Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    bootstrap_admin(&mut persistence, &args)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence
            .create_user(
                "Root Admin",
                "root@example.com",
                "rootpassword1",
                "systemAdmin",
                true,
            )
            .expect("Failed to seed system admin");
        let app_state: AppState = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        };
        build_router(app_state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (HttpStatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = if let Some(body) = body {
            builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request")
        } else {
            builder.body(Body::empty()).expect("Failed to build request")
        };

        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("Request should complete");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body should collect");
        let json: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body should be JSON")
        };
        (status, json)
    }

    async fn login(app: &Router, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["data"]["token"]
            .as_str()
            .expect("Login should return a token")
            .to_string()
    }

    #[tokio::test]
    async fn login_wraps_the_token_in_the_envelope() {
        let app = create_test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({
                "email": "root@example.com",
                "password": "rootpassword1",
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["email"], "root@example.com");
        assert!(body["data"]["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn bad_credentials_return_unauthorized() {
        let app = create_test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({
                "email": "root@example.com",
                "password": "wrong",
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_tokens() {
        let app = create_test_app();
        let (status, body) = send(&app, Method::GET, "/api/blocks", None, None).await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn a_logged_out_token_stops_working() {
        let app = create_test_app();
        let token = login(&app, "root@example.com", "rootpassword1").await;

        let (status, _) =
            send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn block_creation_round_trips_through_the_envelope() {
        let app = create_test_app();
        let token = login(&app, "root@example.com", "rootpassword1").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(&token),
            Some(serde_json::json!({
                "name": "Block Head",
                "email": "head@example.com",
                "password": "headpassword1",
                "role": "blockHead",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let head_id = body["data"]["userId"].as_i64().expect("User id expected");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/blocks",
            Some(&token),
            Some(serde_json::json!({
                "name": "Block A",
                "blockType": "A Block",
                "description": "North wing",
                "blockHeadId": head_id,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "Block A");
        assert_eq!(body["data"]["totalRooms"], 0);
        assert_eq!(body["message"], "Block created");
    }

    #[tokio::test]
    async fn forbidden_actions_return_403_without_mutating() {
        let app = create_test_app();
        let root_token = login(&app, "root@example.com", "rootpassword1").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(&root_token),
            Some(serde_json::json!({
                "name": "Block Head",
                "email": "head@example.com",
                "password": "headpassword1",
                "role": "blockHead",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let head_token = login(&app, "head@example.com", "headpassword1").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(&head_token),
            Some(serde_json::json!({
                "name": "Intruder",
                "email": "intruder@example.com",
                "password": "intruderpass1",
                "role": "admin",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);

        let (status, body) = send(&app, Method::GET, "/api/users", Some(&root_token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        let users = body["data"].as_array().expect("User list expected");
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn validation_failures_return_400() {
        let app = create_test_app();
        let token = login(&app, "root@example.com", "rootpassword1").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(&token),
            Some(serde_json::json!({
                "name": "Bad Email",
                "email": "not-an-email",
                "password": "goodpassword1",
                "role": "admin",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_resources_return_404() {
        let app = create_test_app();
        let token = login(&app, "root@example.com", "rootpassword1").await;

        let (status, body) = send(&app, Method::GET, "/api/blocks/9999", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }
}
