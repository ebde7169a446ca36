// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The value classes an attribute can hold.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum AttributeKind {
    /// `S`
    #[serde(rename = "S")]
    String,
    /// `N`
    #[serde(rename = "N")]
    Number,
    /// `SS`
    #[serde(rename = "SS")]
    StringSet,
    /// `NS`
    #[serde(rename = "NS")]
    NumberSet,
    /// JSON text decoded into a structure.  Only accepted on input; such
    /// attributes report and serialize as `S`.
    #[serde(rename = "array")]
    Structured,
}

impl AttributeKind {
    /// The wire token.
    pub fn token(&self) -> &'static str {
        match self {
            AttributeKind::String => "S",
            AttributeKind::Number => "N",
            AttributeKind::StringSet => "SS",
            AttributeKind::NumberSet => "NS",
            AttributeKind::Structured => "array",
        }
    }

    /// Returns `true` for `SS` and `NS`.
    pub fn is_collection(&self) -> bool {
        matches!(self, AttributeKind::StringSet | AttributeKind::NumberSet)
    }

    /// Returns `true` for `S` and `N`, the kinds a key element may have.
    pub fn is_scalar(&self) -> bool {
        matches!(self, AttributeKind::String | AttributeKind::Number)
    }
}

impl Display for AttributeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AttributeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(AttributeKind::String),
            "N" => Ok(AttributeKind::Number),
            "SS" => Ok(AttributeKind::StringSet),
            "NS" => Ok(AttributeKind::NumberSet),
            "array" => Ok(AttributeKind::Structured),
            _ => Err(Error::InvalidKind(format!("{s}: unrecognized kind"))),
        }
    }
}
