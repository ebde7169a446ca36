// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Context, Parameters};
use crate::attribute::Key;
use crate::common::Error;
use crate::item::Item;
use serde_json::{json, Map, Value as Json};
use std::collections::BTreeMap;

/// One write of a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteRequest {
    /// Store an item.
    Put(Item),
    /// Delete the item with a key.
    Delete(Key),
}

impl WriteRequest {
    fn to_wire(&self) -> Json {
        match self {
            WriteRequest::Put(item) => json!({ "PutRequest": { "Item": item.to_row() } }),
            WriteRequest::Delete(key) => json!({ "DeleteRequest": { "Key": key.to_wire() } }),
        }
    }
}

/// Puts and deletes, across tables, in one batch write call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteContext {
    tables: BTreeMap<String, Vec<WriteRequest>>,
}

impl BatchWriteContext {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` in its table.
    pub fn add_item_to_put(&mut self, item: Item) -> Result<&mut Self, Error> {
        if item.table().is_empty() {
            return Err(Error::MissingTable(
                "batch write item has no table".to_string(),
            ));
        }
        self.tables
            .entry(item.table().to_string())
            .or_default()
            .push(WriteRequest::Put(item));
        Ok(self)
    }

    /// Delete the item with `key` from `table`.
    pub fn add_key_to_delete(&mut self, table: &str, key: Key) -> Result<&mut Self, Error> {
        if table.is_empty() {
            return Err(Error::MissingTable(
                "batch delete key has no table".to_string(),
            ));
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(WriteRequest::Delete(key));
        Ok(self)
    }

    /// The writes queued for `table`.
    pub fn requests(&self, table: &str) -> &[WriteRequest] {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of writes across tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing was queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Context for BatchWriteContext {
    fn parameters(&self) -> Parameters {
        let request_items: Map<String, Json> = self
            .tables
            .iter()
            .map(|(table, requests)| {
                (
                    table.clone(),
                    Json::Array(requests.iter().map(WriteRequest::to_wire).collect()),
                )
            })
            .collect();
        let mut parameters = Parameters::new();
        parameters.insert("RequestItems".to_string(), Json::Object(request_items));
        parameters
    }
}
