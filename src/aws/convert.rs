// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::AttributeValue;
use crate::attribute::{Attribute, AttributeKind, Value};
use crate::common::Error;
use crate::item::{Item, Row};
use serde_json::{json, Value as Json};
use std::collections::HashMap;

/// An item as the AWS SDK represents it.
pub type AwsItem = HashMap<String, AttributeValue>;

impl From<&Attribute> for AttributeValue {
    fn from(attribute: &Attribute) -> Self {
        let kind = attribute.kind();
        let wire = attribute.to_wire();
        let value = &wire[kind.token()];
        let text = || value.as_str().unwrap_or_default().to_string();
        let texts = || -> Vec<String> {
            value
                .as_array()
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Json::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };
        match kind {
            AttributeKind::String | AttributeKind::Structured => AttributeValue::S(text()),
            AttributeKind::Number => AttributeValue::N(text()),
            AttributeKind::StringSet => AttributeValue::Ss(texts()),
            AttributeKind::NumberSet => AttributeValue::Ns(texts()),
        }
    }
}

impl TryFrom<&AttributeValue> for Attribute {
    type Error = Error;

    /// Maps and lists become structured attributes and booleans become
    /// numbers; binary values are rejected.
    fn try_from(value: &AttributeValue) -> Result<Self, Error> {
        match value {
            AttributeValue::S(s) => Attribute::new(s.as_str(), Some(AttributeKind::String)),
            AttributeValue::N(n) => Attribute::new(n.as_str(), Some(AttributeKind::Number)),
            AttributeValue::Ss(set) => Attribute::new(json!(set), Some(AttributeKind::StringSet)),
            AttributeValue::Ns(set) => Attribute::new(json!(set), Some(AttributeKind::NumberSet)),
            AttributeValue::Bool(b) => Attribute::new(*b, Some(AttributeKind::Number)),
            AttributeValue::M(_) | AttributeValue::L(_) => {
                let json: Json =
                    serde_dynamo::from_attribute_value(value.clone()).map_err(Error::Serde)?;
                Attribute::new(json, Some(AttributeKind::Structured))
            }
            other => Err(Error::InvalidKind(format!(
                "{other:?}: unsupported attribute value"
            ))),
        }
    }
}

/// Convert a wire row into an SDK item.
pub fn to_aws_item(row: &Row) -> Result<AwsItem, Error> {
    row.iter()
        .map(|(name, wire)| {
            let attribute = Attribute::from_wire(wire)?;
            Ok((name.clone(), AttributeValue::from(&attribute)))
        })
        .collect()
}

/// Convert an SDK item into a wire row.  Null members are absent.
pub fn from_aws_item(item: &AwsItem) -> Result<Row, Error> {
    item.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| Ok((name.clone(), Attribute::try_from(value)?.to_wire())))
        .collect()
}

impl Item {
    /// Build an item of `table` from an SDK item.
    pub fn from_aws(table: &str, item: &AwsItem) -> Result<Self, Error> {
        Item::from_row(table, &from_aws_item(item)?)
    }

    /// The SDK form of this item.  Empty strings are left out.
    pub fn to_aws(&self) -> AwsItem {
        self.iter()
            .filter(|(_, attribute)| attribute.value() != Value::String(String::new()))
            .map(|(name, attribute)| (name.to_string(), AttributeValue::from(attribute)))
            .collect()
    }
}
