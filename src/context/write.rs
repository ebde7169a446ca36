// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Context, Parameters};
use crate::attribute::Attribute;
use crate::common::Error;
use serde_json::{json, Map, Value as Json};
use std::collections::BTreeMap;

/// Which attributes a write call returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReturnValues {
    /// `NONE`
    None,
    /// `ALL_OLD`
    AllOld,
    /// `UPDATED_OLD`, update only.
    UpdatedOld,
    /// `ALL_NEW`, update only.
    AllNew,
    /// `UPDATED_NEW`, update only.
    UpdatedNew,
}

impl ReturnValues {
    /// The wire token.
    pub fn token(&self) -> &'static str {
        match self {
            ReturnValues::None => "NONE",
            ReturnValues::AllOld => "ALL_OLD",
            ReturnValues::UpdatedOld => "UPDATED_OLD",
            ReturnValues::AllNew => "ALL_NEW",
            ReturnValues::UpdatedNew => "UPDATED_NEW",
        }
    }
}

/// A precondition on one attribute of the stored item.
#[derive(Clone, Debug, PartialEq)]
pub enum Expected {
    /// The attribute must currently hold this value.
    Value(Attribute),
    /// The attribute must not exist.
    Absent,
}

impl Expected {
    fn to_wire(&self) -> Json {
        match self {
            Expected::Value(attribute) => json!({ "Value": attribute.to_wire() }),
            Expected::Absent => json!({ "Exists": false }),
        }
    }
}

/// Options of a put, update or delete call: preconditions and returned
/// attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteContext {
    expected: BTreeMap<String, Expected>,
    return_values: Option<ReturnValues>,
}

/// Options of a put call.
pub type PutContext = WriteContext;
/// Options of an update call.
pub type UpdateContext = WriteContext;
/// Options of a delete call.
pub type DeleteContext = WriteContext;

impl WriteContext {
    /// Create a context with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only write if attribute `name` currently equals `value`.
    pub fn expected(mut self, name: &str, value: impl Into<Json>) -> Result<Self, Error> {
        self.expected
            .insert(name.to_string(), Expected::Value(Attribute::auto(value)?));
        Ok(self)
    }

    /// Only write if attribute `name` does not exist.
    pub fn expected_absent(mut self, name: &str) -> Self {
        self.expected.insert(name.to_string(), Expected::Absent);
        self
    }

    /// Which attributes to return.
    pub fn return_values(mut self, return_values: ReturnValues) -> Self {
        self.return_values = Some(return_values);
        self
    }
}

impl Context for WriteContext {
    fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if !self.expected.is_empty() {
            let expected: Map<String, Json> = self
                .expected
                .iter()
                .map(|(name, expected)| (name.clone(), expected.to_wire()))
                .collect();
            parameters.insert("Expected".to_string(), Json::Object(expected));
        }
        if let Some(return_values) = self.return_values {
            parameters.insert(
                "ReturnValues".to_string(),
                Json::from(return_values.token()),
            );
        }
        parameters
    }
}
