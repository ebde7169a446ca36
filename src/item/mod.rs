// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Hydration of raw rows into domain objects.
mod hydrate;
/// Named attributes bound to a table.
mod item;
/// Unit tests.
mod tests;

pub use self::hydrate::{FieldValue, Hydrator, ItemHydrator};
pub use self::item::Item;

/// A raw row as read from or written to the wire: attribute name to
/// `{kind: value}`.
pub type Row = serde_json::Map<String, serde_json::Value>;
