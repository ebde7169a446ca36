// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::collection::Collection;
use crate::context::BatchGetContext;
use std::collections::BTreeMap;

/// Result of a batch get: items per table, plus a context holding the keys
/// the call did not process.
#[derive(Clone, Debug)]
pub struct BatchCollection<T> {
    unprocessed: Option<BatchGetContext>,
    tables: BTreeMap<String, Collection<T>>,
}

impl<T> BatchCollection<T> {
    /// Create an empty result.
    pub fn new(unprocessed: Option<BatchGetContext>) -> Self {
        Self {
            unprocessed,
            tables: BTreeMap::new(),
        }
    }

    /// Set the items read from `table`.
    pub fn set_items(&mut self, table: &str, items: Collection<T>) {
        self.tables.insert(table.to_string(), items);
    }

    /// The items read from `table`.
    pub fn items(&self, table: &str) -> Option<&Collection<T>> {
        self.tables.get(table)
    }

    /// Take the items read from `table`.
    pub fn take_items(&mut self, table: &str) -> Option<Collection<T>> {
        self.tables.remove(table)
    }

    /// Tables that returned items.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// A context to resubmit for the unprocessed keys.
    pub fn unprocessed_context(&self) -> Option<&BatchGetContext> {
        self.unprocessed.as_ref()
    }

    /// Returns `true` if some keys were not processed.
    pub fn more(&self) -> bool {
        self.unprocessed.is_some()
    }
}
