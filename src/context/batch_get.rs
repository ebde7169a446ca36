// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Context, Parameters};
use crate::attribute::Key;
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq)]
struct BatchGetTable {
    keys: Vec<Key>,
    attributes_to_get: Vec<String>,
}

/// Keys to read, across tables, in one batch get call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetContext {
    tables: BTreeMap<String, BatchGetTable>,
}

impl BatchGetContext {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the item with `key` from `table`.
    pub fn add_key(&mut self, table: &str, key: Key) -> &mut Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .keys
            .push(key);
        self
    }

    /// Return only the named attributes of items read from `table`.
    pub fn set_attributes_to_get(&mut self, table: &str, names: &[&str]) -> &mut Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .attributes_to_get = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// The keys requested from `table`.
    pub fn keys(&self, table: &str) -> &[Key] {
        self.tables
            .get(table)
            .map(|t| t.keys.as_slice())
            .unwrap_or_default()
    }

    /// Total number of keys across tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(|t| t.keys.len()).sum()
    }

    /// Returns `true` if no key was added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Context for BatchGetContext {
    fn parameters(&self) -> Parameters {
        let mut request_items = Map::new();
        for (table, batch) in &self.tables {
            if batch.keys.is_empty() {
                continue;
            }
            let mut request = Map::new();
            request.insert(
                "Keys".to_string(),
                Json::Array(batch.keys.iter().map(Key::to_wire).collect()),
            );
            if !batch.attributes_to_get.is_empty() {
                request.insert(
                    "AttributesToGet".to_string(),
                    Json::from(batch.attributes_to_get.clone()),
                );
            }
            request_items.insert(table.clone(), Json::Object(request));
        }
        let mut parameters = Parameters::new();
        parameters.insert("RequestItems".to_string(), Json::Object(request_items));
        parameters
    }
}
