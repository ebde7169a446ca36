// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Context, Parameters};
use crate::collection::Cursor;
use serde_json::Value as Json;

/// Options shared by the calls that return a collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionContext {
    limit: Option<u32>,
    count: bool,
    attributes_to_get: Vec<String>,
    exclusive_start_key: Option<Cursor>,
    consistent_read: Option<bool>,
}

impl CollectionContext {
    /// Create a context with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate at most `limit` items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return only the number of matching items.
    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Return only the named attributes.
    pub fn attributes_to_get(mut self, names: &[&str]) -> Self {
        self.attributes_to_get = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Resume after `cursor`.
    pub fn exclusive_start_key(mut self, cursor: Cursor) -> Self {
        self.exclusive_start_key = Some(cursor);
        self
    }

    /// Request a strongly consistent read.
    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = Some(consistent_read);
        self
    }

    pub(crate) fn set_exclusive_start_key(&mut self, cursor: Option<Cursor>) {
        self.exclusive_start_key = cursor;
    }

    /// The cursor to resume after.
    pub fn start_key(&self) -> Option<&Cursor> {
        self.exclusive_start_key.as_ref()
    }

    /// Whether only the count is requested.
    pub fn is_count(&self) -> bool {
        self.count
    }
}

impl Context for CollectionContext {
    fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if let Some(limit) = self.limit {
            parameters.insert("Limit".to_string(), Json::from(limit));
        }
        if self.count {
            parameters.insert("Count".to_string(), Json::Bool(true));
        }
        if !self.attributes_to_get.is_empty() {
            parameters.insert(
                "AttributesToGet".to_string(),
                Json::from(self.attributes_to_get.clone()),
            );
        }
        if let Some(cursor) = &self.exclusive_start_key {
            parameters.insert("ExclusiveStartKey".to_string(), cursor.as_json().clone());
        }
        if let Some(consistent_read) = self.consistent_read {
            parameters.insert("ConsistentRead".to_string(), Json::Bool(consistent_read));
        }
        parameters
    }
}
