// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{CollectionContext, Context, Parameters};
use crate::attribute::{AttributeCondition, AttributeKind, ComparisonOperator};
use crate::collection::Cursor;
use crate::common::Error;
use serde_json::Value as Json;

/// Options of a query call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryContext {
    collection: CollectionContext,
    range_condition: Option<AttributeCondition>,
    scan_index_forward: Option<bool>,
}

impl QueryContext {
    /// Create a context with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a context with only a range key condition.
    pub fn with_range_condition(
        operator: ComparisonOperator,
        values: impl Into<Json>,
    ) -> Result<Self, Error> {
        Self::new().range_condition(operator, values)
    }

    /// Restrict the range key.
    pub fn range_condition(
        mut self,
        operator: ComparisonOperator,
        values: impl Into<Json>,
    ) -> Result<Self, Error> {
        self.range_condition = Some(AttributeCondition::new(operator, values)?);
        Ok(self)
    }

    /// Restrict the range key, forcing its values to the key's declared kind.
    pub fn range_condition_with_kind(
        mut self,
        operator: ComparisonOperator,
        values: impl Into<Json>,
        kind: AttributeKind,
    ) -> Result<Self, Error> {
        self.range_condition = Some(AttributeCondition::with_kind(operator, values, kind)?);
        Ok(self)
    }

    /// `false` walks the range key backwards.
    pub fn scan_index_forward(mut self, forward: bool) -> Self {
        self.scan_index_forward = Some(forward);
        self
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

    /// Request a strongly consistent read.
    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.collection = self.collection.consistent_read(consistent_read);
        self
    }

    /// The range key condition.
    pub fn range(&self) -> Option<&AttributeCondition> {
        self.range_condition.as_ref()
    }

    /// The shared collection options.
    pub fn collection(&self) -> &CollectionContext {
        &self.collection
    }

    pub(crate) fn collection_mut(&mut self) -> &mut CollectionContext {
        &mut self.collection
    }
}

impl Context for QueryContext {
    fn parameters(&self) -> Parameters {
        let mut parameters = self.collection.parameters();
        if let Some(condition) = &self.range_condition {
            parameters.insert("RangeKeyCondition".to_string(), condition.to_wire());
        }
        if let Some(forward) = self.scan_index_forward {
            parameters.insert("ScanIndexForward".to_string(), Json::Bool(forward));
        }
        parameters
    }
}
