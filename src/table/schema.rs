// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::attribute::AttributeKind;
use crate::common::Error;
use serde::{Deserialize, Serialize};

/// Name and kind of one primary key element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeySchemaElement {
    /// Attribute name.
    #[serde(rename = "AttributeName")]
    pub name: String,
    /// `S` or `N`.
    #[serde(rename = "AttributeType")]
    pub kind: AttributeKind,
}

impl KeySchemaElement {
    /// Key elements must be scalar.
    pub fn new(name: &str, kind: AttributeKind) -> Result<Self, Error> {
        if !kind.is_scalar() {
            return Err(Error::InvalidKind(format!(
                "{name}: key element cannot be of kind {kind}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
        })
    }
}

/// The primary key of a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeySchema {
    /// Hash (partition) key.
    #[serde(rename = "HashKeyElement")]
    pub hash: KeySchemaElement,
    /// Range (sort) key.
    #[serde(
        rename = "RangeKeyElement",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub range: Option<KeySchemaElement>,
}

impl KeySchema {
    /// A hash-only key.
    pub fn hash(name: &str, kind: AttributeKind) -> Result<Self, Error> {
        Ok(Self {
            hash: KeySchemaElement::new(name, kind)?,
            range: None,
        })
    }

    /// Add a range element.
    pub fn range(mut self, name: &str, kind: AttributeKind) -> Result<Self, Error> {
        self.range = Some(KeySchemaElement::new(name, kind)?);
        Ok(self)
    }
}

/// Provisioned read and write capacity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    /// Read capacity units.
    pub read_capacity_units: u64,
    /// Write capacity units.
    pub write_capacity_units: u64,
    /// Seconds since the epoch, as reported by describe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_increase_date_time: Option<f64>,
    /// Seconds since the epoch, as reported by describe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_decrease_date_time: Option<f64>,
}

impl ProvisionedThroughput {
    /// Throughput to request.
    pub fn new(read_capacity_units: u64, write_capacity_units: u64) -> Self {
        Self {
            read_capacity_units,
            write_capacity_units,
            ..Default::default()
        }
    }
}
