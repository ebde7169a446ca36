// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Number;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A value read out of an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// What an empty set reads as.
    Null,
    /// Text.
    String(String),
    /// A number.
    Number(Number),
    /// Sorted strings, two or more when read from a set attribute.
    StringSet(Vec<String>),
    /// Sorted numbers, two or more when read from a set attribute.
    NumberSet(Vec<Number>),
    /// A decoded structured value.
    Json(serde_json::Value),
}

impl Value {
    /// The text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is a number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::NumberSet(_) => 3,
            Value::StringSet(_) => 4,
            Value::Json(_) => 5,
        }
    }

    /// Total order used for sorting collections.  Values of the same shape
    /// compare naturally (sets element by element, structured values by
    /// their JSON text); different shapes order Null, Number, String,
    /// NumberSet, StringSet, Json.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::NumberSet(a), Value::NumberSet(b)) => a.cmp(b),
            (Value::StringSet(a), Value::StringSet(b)) => a.cmp(b),
            (Value::Json(a), Value::Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Number(n) => Display::fmt(n, f),
            Value::StringSet(set) => f.write_str(&set.join(",")),
            Value::NumberSet(set) => f.write_str(
                &set.iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Value::Json(json) => Display::fmt(json, f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Int(i))
    }
}
