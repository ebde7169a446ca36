// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{AttributeKind, Number, Value};
use crate::common::Error;
use serde_json::{json, Value as Json};
use std::fmt::{Display, Formatter};

/// Normalized storage.  The variant alone decides the reported kind, so a
/// scalar kind can never carry a set.
#[derive(Clone, Debug, PartialEq)]
enum Stored {
    String(String),
    Number(Number),
    StringSet(Vec<String>),
    NumberSet(Vec<Number>),
    Structured(Json),
}

/// A single typed value (or homogeneous set of values) in the item format.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    stored: Stored,
}

impl Attribute {
    /// Build an attribute from a raw value.  Without an explicit `kind` the
    /// kind is inferred from the shape of `value`.
    ///
    /// Sets are sorted ascending but never deduplicated.
    pub fn new(value: impl Into<Json>, kind: Option<AttributeKind>) -> Result<Self, Error> {
        let value = value.into();
        let kind = kind.unwrap_or_else(|| detect_kind(&value));
        let stored = match kind {
            AttributeKind::String => Stored::String(to_text(first(&value))),
            AttributeKind::Number => Stored::Number(to_number(first(&value))?),
            AttributeKind::StringSet => {
                let mut set: Vec<String> = elements(&value).map(to_text).collect();
                set.sort();
                Stored::StringSet(set)
            }
            AttributeKind::NumberSet => {
                let mut set = elements(&value)
                    .map(to_number)
                    .collect::<Result<Vec<_>, _>>()?;
                set.sort();
                Stored::NumberSet(set)
            }
            AttributeKind::Structured => Stored::Structured(match value {
                Json::String(text) => serde_json::from_str(&text)
                    .map_err(|e| Error::InvalidKind(format!("structured value: {e}")))?,
                other => other,
            }),
        };
        Ok(Self { stored })
    }

    /// Build an attribute, inferring its kind.
    pub fn auto(value: impl Into<Json>) -> Result<Self, Error> {
        Self::new(value, None)
    }

    /// Parse the wire form, a single-entry object such as `{"N": "42"}`.
    pub fn from_wire(wire: &Json) -> Result<Self, Error> {
        match wire.as_object() {
            Some(map) if map.len() == 1 => {
                let (token, value) = map.iter().next().ok_or_else(|| {
                    Error::InvalidKind("attribute wire form is empty".to_string())
                })?;
                Self::new(value.clone(), Some(token.parse()?))
            }
            _ => Err(Error::InvalidKind(format!(
                "{wire}: expected a single-entry attribute object"
            ))),
        }
    }

    /// The canonical kind.  Structured attributes report `S`.
    pub fn kind(&self) -> AttributeKind {
        match self.stored {
            Stored::String(_) | Stored::Structured(_) => AttributeKind::String,
            Stored::Number(_) => AttributeKind::Number,
            Stored::StringSet(_) => AttributeKind::StringSet,
            Stored::NumberSet(_) => AttributeKind::NumberSet,
        }
    }

    /// Returns `true` if this attribute holds a set.
    pub fn is_collection_kind(&self) -> bool {
        self.kind().is_collection()
    }

    /// The value.  Sets of zero or one element read as a bare scalar
    /// (`Value::Null` when empty), so callers need not special-case them.
    pub fn value(&self) -> Value {
        match &self.stored {
            Stored::String(s) => Value::String(s.clone()),
            Stored::Number(n) => Value::Number(*n),
            Stored::StringSet(set) => match set.as_slice() {
                [] => Value::Null,
                [only] => Value::String(only.clone()),
                _ => Value::StringSet(set.clone()),
            },
            Stored::NumberSet(set) => match set.as_slice() {
                [] => Value::Null,
                [only] => Value::Number(*only),
                _ => Value::NumberSet(set.clone()),
            },
            Stored::Structured(json) => Value::Json(json.clone()),
        }
    }

    /// Iterate over the elements of a set.
    pub fn iter(&self) -> Result<Box<dyn Iterator<Item = Value> + '_>, Error> {
        match &self.stored {
            Stored::StringSet(set) => Ok(Box::new(set.iter().map(|s| Value::String(s.clone())))),
            Stored::NumberSet(set) => Ok(Box::new(set.iter().map(|n| Value::Number(*n)))),
            _ => Err(Error::NotIterable(self.kind())),
        }
    }

    /// Number of elements: the set size, or 1 for a scalar.
    pub fn len(&self) -> usize {
        match &self.stored {
            Stored::StringSet(set) => set.len(),
            Stored::NumberSet(set) => set.len(),
            _ => 1,
        }
    }

    /// Returns `true` for an empty set or an empty string.
    pub fn is_empty(&self) -> bool {
        match &self.stored {
            Stored::String(s) => s.is_empty(),
            Stored::StringSet(set) => set.is_empty(),
            Stored::NumberSet(set) => set.is_empty(),
            Stored::Number(_) | Stored::Structured(_) => false,
        }
    }

    /// The wire form: `{"S": "text"}`, `{"N": "123"}`, `{"SS": [..]}` or
    /// `{"NS": [..]}`.  Structured values are JSON-encoded into `S`.
    pub fn to_wire(&self) -> Json {
        let token = self.kind().token();
        let value = match &self.stored {
            Stored::String(s) => Json::String(s.clone()),
            Stored::Number(n) => Json::String(n.to_string()),
            Stored::StringSet(set) => json!(set),
            Stored::NumberSet(set) => {
                Json::Array(set.iter().map(|n| Json::String(n.to_string())).collect())
            }
            Stored::Structured(Json::String(s)) => Json::String(s.clone()),
            Stored::Structured(json) => Json::String(json.to_string()),
        };
        json!({ token: value })
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.stored {
            Stored::String(s) => f.write_str(s),
            Stored::Number(n) => Display::fmt(n, f),
            Stored::StringSet(set) => f.write_str(&set.join(",")),
            Stored::NumberSet(set) => f.write_str(
                &set.iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Stored::Structured(Json::String(s)) => f.write_str(s),
            Stored::Structured(json) => Display::fmt(json, f),
        }
    }
}

fn detect_kind(value: &Json) -> AttributeKind {
    match value {
        Json::Array(values) if values.len() > 1 => {
            if values.iter().all(is_numeric) {
                AttributeKind::NumberSet
            } else {
                AttributeKind::StringSet
            }
        }
        Json::Array(values) => match values.first() {
            Some(Json::String(_)) => AttributeKind::String,
            _ => AttributeKind::Number,
        },
        scalar if is_numeric(scalar) => AttributeKind::Number,
        _ => AttributeKind::String,
    }
}

fn is_numeric(value: &Json) -> bool {
    match value {
        Json::Number(_) => true,
        Json::String(s) => Number::parse(s).is_some(),
        _ => false,
    }
}

fn first(value: &Json) -> &Json {
    match value {
        Json::Array(values) => values.first().unwrap_or(&Json::Null),
        other => other,
    }
}

fn elements(value: &Json) -> Box<dyn Iterator<Item = &Json> + '_> {
    match value {
        Json::Array(values) => Box::new(values.iter()),
        Json::Null => Box::new(std::iter::empty()),
        other => Box::new(std::iter::once(other)),
    }
}

fn to_text(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        Json::Number(n) => Number::from_json(n)
            .map(|n| n.to_string())
            .unwrap_or_else(|| n.to_string()),
        Json::Bool(b) => b.to_string(),
        structured => structured.to_string(),
    }
}

fn to_number(value: &Json) -> Result<Number, Error> {
    match value {
        Json::Null => Ok(Number::Int(0)),
        Json::Bool(b) => Ok(Number::Int(i64::from(*b))),
        Json::Number(n) => {
            Number::from_json(n).ok_or_else(|| Error::InvalidKind(format!("{n}: not a finite number")))
        }
        Json::String(s) => {
            Number::parse(s).ok_or_else(|| Error::InvalidKind(format!("{s:?}: not numeric")))
        }
        structured => Err(Error::InvalidKind(format!("{structured}: not numeric"))),
    }
}
