// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-specific dashboard aggregates.
//!
//! All figures are computed from the room and bed rows, not the
//! denormalized block counters, so the dashboards double as a drift
//! check on those counters.

use std::collections::BTreeMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_domain::RequestStatus;
use serde::Serialize;

use crate::data_models::BlockData;
use crate::diesel_schema::{beds, blocks, requests, rooms, users};
use crate::error::PersistenceError;
use crate::queries::blocks::list_blocks_headed_by;

/// System-wide figures for the systemAdmin dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemOverview {
    pub total_users: i64,
    pub total_blocks: i64,
    pub total_rooms: i64,
    pub total_beds: i64,
    pub available_beds: i64,
    pub occupied_beds: i64,
    pub maintenance_beds: i64,
    pub pending_requests: i64,
    pub approved_requests: i64,
    pub completed_requests: i64,
}

/// Occupancy figures for one block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockOccupancy {
    pub block_id: i64,
    pub name: String,
    pub total_beds: i64,
    pub available_beds: i64,
    pub occupied_beds: i64,
    pub occupancy_rate: f64,
}

/// Figures for the admin dashboard: totals plus per-block occupancy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_blocks: i64,
    pub total_rooms: i64,
    pub total_beds: i64,
    pub available_beds: i64,
    pub pending_requests: i64,
    pub blocks: Vec<BlockOccupancy>,
}

/// Figures for the blockHead dashboard, scoped to the blocks they head.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeadOverview {
    pub blocks: Vec<BlockOccupancy>,
    pub pending_requests: i64,
    pub approved_requests: i64,
}

/// Occupied beds over beds in service, as a percentage. Zero when
/// nothing is in service.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn count_requests_with_status(
    conn: &mut SqliteConnection,
    status: RequestStatus,
) -> Result<i64, PersistenceError> {
    Ok(requests::table
        .filter(requests::status.eq(status.as_str()))
        .count()
        .get_result(conn)?)
}

/// Per-block bed tallies, computed by joining beds through rooms.
fn bed_tallies_by_block(
    conn: &mut SqliteConnection,
) -> Result<BTreeMap<i64, (i64, i64, i64)>, PersistenceError> {
    let rows: Vec<(i64, String)> = beds::table
        .inner_join(rooms::table)
        .select((rooms::block_id, beds::status))
        .load(conn)?;

    let mut tallies: BTreeMap<i64, (i64, i64, i64)> = BTreeMap::new();
    for (block_id, status) in rows {
        let entry: &mut (i64, i64, i64) = tallies.entry(block_id).or_insert((0, 0, 0));
        match status.as_str() {
            "Occupied" => entry.1 += 1,
            "Under Maintenance" => entry.2 += 1,
            _ => entry.0 += 1,
        }
    }
    Ok(tallies)
}

fn occupancy_for(block: &BlockData, tally: (i64, i64, i64)) -> BlockOccupancy {
    let (available, occupied, maintenance) = tally;
    let total: i64 = available + occupied + maintenance;
    BlockOccupancy {
        block_id: block.block_id,
        name: block.name.clone(),
        total_beds: total,
        available_beds: available,
        occupied_beds: occupied,
        occupancy_rate: percentage(occupied, total - maintenance),
    }
}

/// Builds the systemAdmin dashboard.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn system_overview(conn: &mut SqliteConnection) -> Result<SystemOverview, PersistenceError> {
    let total_users: i64 = users::table.count().get_result(conn)?;
    let total_blocks: i64 = blocks::table.count().get_result(conn)?;
    let total_rooms: i64 = rooms::table.count().get_result(conn)?;

    let statuses: Vec<String> = beds::table.select(beds::status).load(conn)?;
    let mut available: i64 = 0;
    let mut occupied: i64 = 0;
    let mut maintenance: i64 = 0;
    for status in &statuses {
        match status.as_str() {
            "Occupied" => occupied += 1,
            "Under Maintenance" => maintenance += 1,
            _ => available += 1,
        }
    }

    Ok(SystemOverview {
        total_users,
        total_blocks,
        total_rooms,
        total_beds: available + occupied + maintenance,
        available_beds: available,
        occupied_beds: occupied,
        maintenance_beds: maintenance,
        pending_requests: count_requests_with_status(conn, RequestStatus::Pending)?,
        approved_requests: count_requests_with_status(conn, RequestStatus::Approved)?,
        completed_requests: count_requests_with_status(conn, RequestStatus::Completed)?,
    })
}

/// Builds the admin dashboard.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn admin_overview(conn: &mut SqliteConnection) -> Result<AdminOverview, PersistenceError> {
    let all_blocks: Vec<BlockData> = blocks::table
        .order(blocks::name.asc())
        .select(BlockData::as_select())
        .load(conn)?;
    let total_rooms: i64 = rooms::table.count().get_result(conn)?;
    let tallies: BTreeMap<i64, (i64, i64, i64)> = bed_tallies_by_block(conn)?;

    let per_block: Vec<BlockOccupancy> = all_blocks
        .iter()
        .map(|block| {
            occupancy_for(
                block,
                tallies.get(&block.block_id).copied().unwrap_or((0, 0, 0)),
            )
        })
        .collect();
    let total_beds: i64 = per_block.iter().map(|b| b.total_beds).sum();
    let available_beds: i64 = per_block.iter().map(|b| b.available_beds).sum();

    Ok(AdminOverview {
        total_blocks: i64::try_from(all_blocks.len()).unwrap_or(i64::MAX),
        total_rooms,
        total_beds,
        available_beds,
        pending_requests: count_requests_with_status(conn, RequestStatus::Pending)?,
        blocks: per_block,
    })
}

/// Builds the blockHead dashboard for the blocks headed by this user.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn block_head_overview(
    conn: &mut SqliteConnection,
    block_head_id: i64,
) -> Result<BlockHeadOverview, PersistenceError> {
    let headed: Vec<BlockData> = list_blocks_headed_by(conn, block_head_id)?;
    let tallies: BTreeMap<i64, (i64, i64, i64)> = bed_tallies_by_block(conn)?;

    let per_block: Vec<BlockOccupancy> = headed
        .iter()
        .map(|block| {
            occupancy_for(
                block,
                tallies.get(&block.block_id).copied().unwrap_or((0, 0, 0)),
            )
        })
        .collect();

    let headed_ids: Vec<i64> = headed.iter().map(|block| block.block_id).collect();
    let pending: i64 = requests::table
        .filter(requests::block_preference_id.eq_any(&headed_ids))
        .filter(requests::status.eq(RequestStatus::Pending.as_str()))
        .count()
        .get_result(conn)?;
    let approved: i64 = requests::table
        .filter(requests::block_preference_id.eq_any(&headed_ids))
        .filter(requests::status.eq(RequestStatus::Approved.as_str()))
        .count()
        .get_result(conn)?;

    Ok(BlockHeadOverview {
        blocks: per_block,
        pending_requests: pending,
        approved_requests: approved,
    })
}
