// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Attribute, AttributeKind};
use crate::common::Error;
use serde_json::{json, Value as Json};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Comparison operators accepted by range key conditions and scan filters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComparisonOperator {
    /// `EQ`
    Eq,
    /// `NE`
    Ne,
    /// `LE`
    Le,
    /// `LT`
    Lt,
    /// `GE`
    Ge,
    /// `GT`
    Gt,
    /// `NOT_NULL`
    NotNull,
    /// `NULL`
    Null,
    /// `CONTAINS`
    Contains,
    /// `NOT_CONTAINS`
    NotContains,
    /// `BEGINS_WITH`
    BeginsWith,
    /// `IN`
    In,
    /// `BETWEEN`
    Between,
}

impl ComparisonOperator {
    /// The wire token.
    pub fn token(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "EQ",
            ComparisonOperator::Ne => "NE",
            ComparisonOperator::Le => "LE",
            ComparisonOperator::Lt => "LT",
            ComparisonOperator::Ge => "GE",
            ComparisonOperator::Gt => "GT",
            ComparisonOperator::NotNull => "NOT_NULL",
            ComparisonOperator::Null => "NULL",
            ComparisonOperator::Contains => "CONTAINS",
            ComparisonOperator::NotContains => "NOT_CONTAINS",
            ComparisonOperator::BeginsWith => "BEGINS_WITH",
            ComparisonOperator::In => "IN",
            ComparisonOperator::Between => "BETWEEN",
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ComparisonOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "EQ" => ComparisonOperator::Eq,
            "NE" => ComparisonOperator::Ne,
            "LE" => ComparisonOperator::Le,
            "LT" => ComparisonOperator::Lt,
            "GE" => ComparisonOperator::Ge,
            "GT" => ComparisonOperator::Gt,
            "NOT_NULL" => ComparisonOperator::NotNull,
            "NULL" => ComparisonOperator::Null,
            "CONTAINS" => ComparisonOperator::Contains,
            "NOT_CONTAINS" => ComparisonOperator::NotContains,
            "BEGINS_WITH" => ComparisonOperator::BeginsWith,
            "IN" => ComparisonOperator::In,
            "BETWEEN" => ComparisonOperator::Between,
            _ => return Err(Error::UnsupportedOption(format!("{s}: comparison operator"))),
        })
    }
}

/// A comparison operator applied to one or more attribute values.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeCondition {
    operator: ComparisonOperator,
    attributes: Vec<Attribute>,
}

impl AttributeCondition {
    /// Each element of an array becomes its own attribute; any other value
    /// becomes a single attribute.  Kinds are inferred per value.
    pub fn new(operator: ComparisonOperator, values: impl Into<Json>) -> Result<Self, Error> {
        Self::build(operator, values.into(), None)
    }

    /// Like `new`, but every value is forced to `kind`, e.g. the declared
    /// kind of the range key.
    pub fn with_kind(
        operator: ComparisonOperator,
        values: impl Into<Json>,
        kind: AttributeKind,
    ) -> Result<Self, Error> {
        Self::build(operator, values.into(), Some(kind))
    }

    fn build(
        operator: ComparisonOperator,
        values: Json,
        kind: Option<AttributeKind>,
    ) -> Result<Self, Error> {
        let values = match values {
            Json::Array(values) => values,
            Json::Null => Vec::new(),
            value => vec![value],
        };
        let attributes = values
            .into_iter()
            .map(|value| Attribute::new(value, kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            operator,
            attributes,
        })
    }

    /// The comparison operator.
    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    /// The compared values, in order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// `{"ComparisonOperator": "EQ", "AttributeValueList": [...]}`
    pub fn to_wire(&self) -> Json {
        json!({
            "ComparisonOperator": self.operator.token(),
            "AttributeValueList": self.attributes.iter().map(Attribute::to_wire).collect::<Vec<_>>(),
        })
    }
}
