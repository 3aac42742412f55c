// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Block mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_domain::{BlockType, Role};
use tracing::info;

use crate::backend::LastInsertRowId;
use crate::data_models::UserData;
use crate::diesel_schema::{blocks, rooms};
use crate::error::PersistenceError;
use crate::mutations::support::current_timestamp;
use crate::queries::blocks::get_block_by_name;
use crate::queries::users::get_user;

fn require_block_head(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), PersistenceError> {
    let user: UserData = get_user(conn, user_id)?;
    let role: Role = Role::parse(&user.role)?;
    if role != Role::BlockHead {
        return Err(PersistenceError::NotABlockHead(user_id));
    }
    Ok(())
}

/// Creates a new block.
///
/// The designated block head must exist and hold the blockHead role.
///
/// # Errors
///
/// Returns `DuplicateBlockName` if a block with this name exists,
/// `NotABlockHead` if the head lacks the role, or an error if the insert
/// fails.
pub fn create_block(
    conn: &mut SqliteConnection,
    name: &str,
    block_type: BlockType,
    description: Option<&str>,
    block_head_id: i64,
    created_by: i64,
) -> Result<i64, PersistenceError> {
    info!("Creating block '{}' of type '{}'", name, block_type);

    if get_block_by_name(conn, name)?.is_some() {
        return Err(PersistenceError::DuplicateBlockName(name.to_string()));
    }
    require_block_head(conn, block_head_id)?;

    diesel::insert_into(blocks::table)
        .values((
            blocks::name.eq(name),
            blocks::block_type.eq(block_type.as_str()),
            blocks::description.eq(description),
            blocks::block_head_id.eq(block_head_id),
            blocks::created_by.eq(created_by),
        ))
        .execute(conn)?;

    let block_id: i64 = conn.last_insert_rowid()?;
    info!(block_id, "Block created");
    Ok(block_id)
}

/// Updates a block's fields. Counters are never written through here.
///
/// # Errors
///
/// Returns `BlockNotFound` if the block does not exist, `DuplicateBlockName`
/// if the new name belongs to another block, or `NotABlockHead` if the new
/// head lacks the role.
pub fn update_block(
    conn: &mut SqliteConnection,
    block_id: i64,
    name: &str,
    block_type: BlockType,
    description: Option<&str>,
    block_head_id: i64,
) -> Result<(), PersistenceError> {
    if let Some(existing) = get_block_by_name(conn, name)?
        && existing.block_id != block_id
    {
        return Err(PersistenceError::DuplicateBlockName(name.to_string()));
    }
    require_block_head(conn, block_head_id)?;

    let rows_affected: usize = diesel::update(blocks::table.find(block_id))
        .set((
            blocks::name.eq(name),
            blocks::block_type.eq(block_type.as_str()),
            blocks::description.eq(description),
            blocks::block_head_id.eq(block_head_id),
            blocks::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::BlockNotFound(block_id));
    }

    info!(block_id, "Block updated");
    Ok(())
}

/// Deletes a block.
///
/// # Errors
///
/// Returns `BlockHasRooms` while the block still contains rooms and
/// `BlockNotFound` if it does not exist.
pub fn delete_block(conn: &mut SqliteConnection, block_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete block ID: {}", block_id);

    let room_count: i64 = rooms::table
        .filter(rooms::block_id.eq(block_id))
        .count()
        .get_result(conn)?;
    if room_count > 0 {
        return Err(PersistenceError::BlockHasRooms(block_id));
    }

    let rows_affected: usize = diesel::delete(blocks::table.find(block_id)).execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::BlockNotFound(block_id));
    }

    info!("Deleted block ID: {}", block_id);
    Ok(())
}
