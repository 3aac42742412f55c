// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database mutations.
//!
//! Every mutation that touches more than one table runs inside a single
//! Diesel transaction, re-reading the rows it depends on so rule checks
//! and writes are atomic. Block counters are adjusted in the same
//! transaction as the room or bed write that triggered them.

pub mod beds;
pub mod blocks;
pub mod notifications;
pub mod requests;
pub mod rooms;
pub mod users;

pub(crate) mod support;
