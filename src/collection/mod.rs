// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Paginated result items.
mod collection;
/// Continuation state.
mod cursor;

pub use self::collection::{Collection, SortDirection};
pub use self::cursor::{Cursor, NextContext};
