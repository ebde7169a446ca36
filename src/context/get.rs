// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Context, Parameters};
use serde_json::Value as Json;

/// Options of a get call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetContext {
    attributes_to_get: Vec<String>,
    consistent_read: Option<bool>,
}

impl GetContext {
    /// Create a context with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return only the named attributes.
    pub fn attributes_to_get(mut self, names: &[&str]) -> Self {
        self.attributes_to_get = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Request a strongly consistent read.
    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = Some(consistent_read);
        self
    }
}

impl Context for GetContext {
    fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if !self.attributes_to_get.is_empty() {
            parameters.insert(
                "AttributesToGet".to_string(),
                Json::from(self.attributes_to_get.clone()),
            );
        }
        if let Some(consistent_read) = self.consistent_read {
            parameters.insert("ConsistentRead".to_string(), Json::Bool(consistent_read));
        }
        parameters
    }
}
