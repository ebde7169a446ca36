// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Attribute;
use crate::common::Error;
use serde_json::{Map, Value as Json};

/// A primary key: hash element plus optional range element.
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    hash: Attribute,
    range: Option<Attribute>,
}

impl Key {
    /// A key with only a hash element, kind inferred.
    pub fn hash(hash: impl Into<Json>) -> Result<Self, Error> {
        Ok(Self {
            hash: Attribute::auto(hash)?,
            range: None,
        })
    }

    /// A key with hash and range elements, kinds inferred.
    pub fn hash_range(hash: impl Into<Json>, range: impl Into<Json>) -> Result<Self, Error> {
        Ok(Self {
            hash: Attribute::auto(hash)?,
            range: Some(Attribute::auto(range)?),
        })
    }

    /// A key from already built attributes.
    pub fn from_attributes(hash: Attribute, range: Option<Attribute>) -> Self {
        Self { hash, range }
    }

    /// The hash element.
    pub fn hash_attribute(&self) -> &Attribute {
        &self.hash
    }

    /// The range element, if any.
    pub fn range_attribute(&self) -> Option<&Attribute> {
        self.range.as_ref()
    }

    /// `{"HashKeyElement": <attr>, "RangeKeyElement": <attr>}`, the range
    /// element omitted when absent.
    pub fn to_wire(&self) -> Json {
        let mut key = Map::new();
        key.insert("HashKeyElement".to_string(), self.hash.to_wire());
        if let Some(range) = &self.range {
            key.insert("RangeKeyElement".to_string(), range.to_wire());
        }
        Json::Object(key)
    }

    /// Parse the wire form.
    pub fn from_wire(wire: &Json) -> Result<Self, Error> {
        let hash = wire
            .get("HashKeyElement")
            .ok_or_else(|| Error::Response(format!("{wire}: key without HashKeyElement")))?;
        Ok(Self {
            hash: Attribute::from_wire(hash)?,
            range: wire
                .get("RangeKeyElement")
                .map(Attribute::from_wire)
                .transpose()?,
        })
    }
}
