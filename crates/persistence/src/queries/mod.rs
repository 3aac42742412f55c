// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, grouped by entity.

pub mod beds;
pub mod blocks;
pub mod dashboard;
pub mod notifications;
pub mod requests;
pub mod rooms;
pub mod users;
