// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database plumbing.
//!
//! Everything that cannot be expressed in backend-agnostic Diesel DSL
//! (PRAGMA statements, migrations, `last_insert_rowid()`) lives here.
//! Queries and mutations stay in `queries/` and `mutations/`.

pub mod sqlite;

pub use sqlite::LastInsertRowId;
