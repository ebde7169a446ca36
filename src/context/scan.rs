// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{CollectionContext, Context, Parameters};
use crate::attribute::{AttributeCondition, ComparisonOperator};
use crate::collection::Cursor;
use crate::common::Error;
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

/// Options of a scan call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanContext {
    collection: CollectionContext,
    filters: BTreeMap<String, AttributeCondition>,
}

impl ScanContext {
    /// Create a context with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return items whose attribute `name` satisfies the condition.
    /// A second filter on the same name replaces the first.
    pub fn filter(
        mut self,
        name: &str,
        operator: ComparisonOperator,
        values: impl Into<Json>,
    ) -> Result<Self, Error> {
        self.filters
            .insert(name.to_string(), AttributeCondition::new(operator, values)?);
        Ok(self)
    }

    /// Scans are never consistent; this always fails.
    pub fn consistent_read(self, _consistent_read: bool) -> Result<Self, Error> {
        Err(Error::UnsupportedOption(
            "scan does not support consistent read".to_string(),
        ))
    }

    /// Evaluate at most `limit` items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.collection = self.collection.limit(limit);
        self
    }

    /// Return only the number of matching items.
    pub fn count(mut self, count: bool) -> Self {
        self.collection = self.collection.count(count);
        self
    }

    /// Return only the named attributes.
    pub fn attributes_to_get(mut self, names: &[&str]) -> Self {
        self.collection = self.collection.attributes_to_get(names);
        self
    }

    /// Resume after `cursor`.
    pub fn exclusive_start_key(mut self, cursor: Cursor) -> Self {
        self.collection = self.collection.exclusive_start_key(cursor);
        self
    }

    /// The filters by attribute name.
    pub fn filters(&self) -> &BTreeMap<String, AttributeCondition> {
        &self.filters
    }

    /// The shared collection options.
    pub fn collection(&self) -> &CollectionContext {
        &self.collection
    }

    pub(crate) fn collection_mut(&mut self) -> &mut CollectionContext {
        &mut self.collection
    }
}

impl Context for ScanContext {
    fn parameters(&self) -> Parameters {
        let mut parameters = self.collection.parameters();
        if !self.filters.is_empty() {
            let filters: Map<String, Json> = self
                .filters
                .iter()
                .map(|(name, filter)| (name.clone(), filter.to_wire()))
                .collect();
            parameters.insert("ScanFilter".to_string(), Json::Object(filters));
        }
        parameters
    }
}
