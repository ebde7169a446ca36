// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Attribute;
use crate::common::Error;
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

/// What an update does to one attribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpdateAction {
    /// Replace the value.
    Put,
    /// Add to a number or a set.
    Add,
    /// Remove the attribute, or values from a set.
    Delete,
}

impl UpdateAction {
    /// The wire token.
    pub fn token(&self) -> &'static str {
        match self {
            UpdateAction::Put => "PUT",
            UpdateAction::Add => "ADD",
            UpdateAction::Delete => "DELETE",
        }
    }
}

/// Builder for the `AttributeUpdates` member of an update call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeUpdate {
    updates: BTreeMap<String, (UpdateAction, Option<Attribute>)>,
}

impl AttributeUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `name` with `value`.
    pub fn put(self, name: &str, value: impl Into<Json>) -> Result<Self, Error> {
        Ok(self.action(name, UpdateAction::Put, Some(Attribute::auto(value)?)))
    }

    /// Add `value` to the number or set `name`.
    pub fn add(self, name: &str, value: impl Into<Json>) -> Result<Self, Error> {
        Ok(self.action(name, UpdateAction::Add, Some(Attribute::auto(value)?)))
    }

    /// Remove `name` entirely.
    pub fn delete(self, name: &str) -> Self {
        self.action(name, UpdateAction::Delete, None)
    }

    /// Remove `values` from the set `name`.
    pub fn delete_values(self, name: &str, values: impl Into<Json>) -> Result<Self, Error> {
        Ok(self.action(name, UpdateAction::Delete, Some(Attribute::auto(values)?)))
    }

    /// Set an arbitrary action with an already built attribute.
    pub fn action(mut self, name: &str, action: UpdateAction, value: Option<Attribute>) -> Self {
        self.updates.insert(name.to_string(), (action, value));
        self
    }

    /// Iterate over `(name, action, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, UpdateAction, Option<&Attribute>)> {
        self.updates
            .iter()
            .map(|(name, (action, value))| (name.as_str(), *action, value.as_ref()))
    }

    /// Number of updated attributes.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns `true` when nothing is updated.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// `{"name": {"Action": "PUT", "Value": <attr>}, ...}`
    pub fn to_wire(&self) -> Json {
        let mut updates = Map::new();
        for (name, action, value) in self.iter() {
            let mut update = Map::new();
            update.insert("Action".to_string(), Json::from(action.token()));
            if let Some(value) = value {
                update.insert("Value".to_string(), value.to_wire());
            }
            updates.insert(name.to_string(), Json::Object(update));
        }
        Json::Object(updates)
    }
}
