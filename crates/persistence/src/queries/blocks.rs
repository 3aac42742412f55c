// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Block queries, including per-block statistics.

use std::collections::BTreeMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use serde::Serialize;

use crate::data_models::BlockData;
use crate::diesel_schema::{beds, blocks, rooms};
use crate::error::PersistenceError;
use crate::queries::dashboard::percentage;

/// A label with the number of rows carrying it.
#[derive(Debug, Clone, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Aggregate statistics for one block, computed from its room and bed
/// rows rather than the denormalized counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStats {
    pub block_id: i64,
    pub rooms_by_type: Vec<LabelCount>,
    pub rooms_by_status: Vec<LabelCount>,
    pub total_beds: i64,
    pub available_beds: i64,
    pub occupied_beds: i64,
    pub maintenance_beds: i64,
    pub occupancy_rate: f64,
}

/// Gets a block by id.
///
/// # Errors
///
/// Returns `BlockNotFound` if no block with this id exists.
pub fn get_block(
    conn: &mut SqliteConnection,
    block_id: i64,
) -> Result<BlockData, PersistenceError> {
    blocks::table
        .find(block_id)
        .select(BlockData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::BlockNotFound(block_id))
}

/// Looks a block up by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_block_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<BlockData>, PersistenceError> {
    Ok(blocks::table
        .filter(blocks::name.eq(name))
        .select(BlockData::as_select())
        .first(conn)
        .optional()?)
}

/// Lists all blocks, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_blocks(conn: &mut SqliteConnection) -> Result<Vec<BlockData>, PersistenceError> {
    Ok(blocks::table
        .order(blocks::name.asc())
        .select(BlockData::as_select())
        .load(conn)?)
}

/// Lists the blocks headed by a user, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_blocks_headed_by(
    conn: &mut SqliteConnection,
    block_head_id: i64,
) -> Result<Vec<BlockData>, PersistenceError> {
    Ok(blocks::table
        .filter(blocks::block_head_id.eq(block_head_id))
        .order(blocks::name.asc())
        .select(BlockData::as_select())
        .load(conn)?)
}

/// Computes statistics for a block from its room and bed rows.
///
/// The occupancy rate is occupied beds over the beds in service (total
/// minus under maintenance), as a percentage.
///
/// # Errors
///
/// Returns `BlockNotFound` if the block does not exist or an error if a
/// query fails.
pub fn get_block_stats(
    conn: &mut SqliteConnection,
    block_id: i64,
) -> Result<BlockStats, PersistenceError> {
    get_block(conn, block_id)?;

    let room_rows: Vec<(String, String)> = rooms::table
        .filter(rooms::block_id.eq(block_id))
        .select((rooms::room_type, rooms::status))
        .load(conn)?;

    let mut by_type: BTreeMap<String, i64> = BTreeMap::new();
    let mut by_status: BTreeMap<String, i64> = BTreeMap::new();
    for (room_type, status) in room_rows {
        *by_type.entry(room_type).or_insert(0) += 1;
        *by_status.entry(status).or_insert(0) += 1;
    }

    let bed_statuses: Vec<String> = beds::table
        .inner_join(rooms::table)
        .filter(rooms::block_id.eq(block_id))
        .select(beds::status)
        .load(conn)?;

    let mut available: i64 = 0;
    let mut occupied: i64 = 0;
    let mut maintenance: i64 = 0;
    for status in &bed_statuses {
        match status.as_str() {
            "Occupied" => occupied += 1,
            "Under Maintenance" => maintenance += 1,
            _ => available += 1,
        }
    }
    let total: i64 = available + occupied + maintenance;

    Ok(BlockStats {
        block_id,
        rooms_by_type: counts_to_labels(by_type),
        rooms_by_status: counts_to_labels(by_status),
        total_beds: total,
        available_beds: available,
        occupied_beds: occupied,
        maintenance_beds: maintenance,
        occupancy_rate: percentage(occupied, total - maintenance),
    })
}

fn counts_to_labels(counts: BTreeMap<String, i64>) -> Vec<LabelCount> {
    counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect()
}
