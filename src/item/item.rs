// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{FieldValue, Row};
use crate::attribute::{Attribute, Value};
use crate::common::Error;
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// A table row as named attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Item {
    table: String,
    attributes: BTreeMap<String, Attribute>,
}

impl Item {
    /// Create an empty item bound to `table`.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Decode a raw wire row.
    pub fn from_row(table: &str, row: &Row) -> Result<Self, Error> {
        let mut item = Self::new(table);
        for (name, wire) in row {
            item.attributes
                .insert(name.clone(), Attribute::from_wire(wire)?);
        }
        Ok(item)
    }

    /// The table this item belongs to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Set an attribute.
    pub fn set(&mut self, name: &str, attribute: Attribute) -> &mut Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    /// Set an attribute from a raw value, inferring its kind.
    pub fn set_value(&mut self, name: &str, value: impl Into<Json>) -> Result<&mut Self, Error> {
        Ok(self.set(name, Attribute::auto(value)?))
    }

    /// Builder flavor of `set_value`.
    pub fn with(mut self, name: &str, value: impl Into<Json>) -> Result<Self, Error> {
        self.set_value(name, value)?;
        Ok(self)
    }

    /// Get an attribute.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    /// Iterate over attributes by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, a)| (name.as_str(), a))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the item has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Encode as a wire row.  Empty strings are left out since the store
    /// rejects them.
    pub fn to_row(&self) -> Row {
        self.attributes
            .iter()
            .filter(|(_, a)| a.value() != Value::String(String::new()))
            .map(|(name, a)| (name.clone(), a.to_wire()))
            .collect()
    }
}

impl FieldValue for Item {
    fn field_value(&self, name: &str) -> Option<Value> {
        self.get(name).map(Attribute::value)
    }
}
