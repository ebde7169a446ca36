// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::AwsItem;
use crate::attribute::{Number, Value};
use crate::common::{Error, SerdeError};
use crate::item::{Hydrator, Item, Row};
use serde::de::value::{MapDeserializer, SeqDeserializer, StringDeserializer};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::{forward_to_deserialize_any, Deserializer, Serialize};
use serde_json::Value as Json;
use std::marker::PhantomData;

/// Hydrates rows into any `T: DeserializeOwned`.
///
/// Rows written by `Item::from_serialize` read back into the same type:
/// numbers stand in for booleans, lists and maps stored as JSON text decode
/// again, sets feed sequences, and absent attributes leave `Option` fields
/// `None`.
pub struct SerdeHydrator<T> {
    _spooky: PhantomData<fn() -> T>,
}

impl<T> SerdeHydrator<T> {
    /// Create a hydrator for `T`.
    pub fn new() -> Self {
        Self {
            _spooky: PhantomData,
        }
    }
}

impl<T> Default for SerdeHydrator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Hydrator<T> for SerdeHydrator<T> {
    fn hydrate(&self, table: &str, row: &Row) -> Result<T, Error> {
        let item = Item::from_row(table, row)?;
        let fields = item
            .iter()
            .map(|(name, attribute)| (name.to_string(), AttributeDeserializer(attribute.value())));
        T::deserialize(MapDeserializer::new(fields)).map_err(Error::Serde)
    }
}

impl Item {
    /// Build an item of `table` from anything `serde_dynamo` can serialize
    /// into an item.  `None` fields are left out.
    pub fn from_serialize<T: Serialize>(table: &str, value: &T) -> Result<Self, Error> {
        let item: AwsItem = serde_dynamo::to_item(value).map_err(Error::Serde)?;
        Item::from_aws(table, &item)
    }
}

/// Reads one attribute value, guided by what the target type asks for.
struct AttributeDeserializer(Value);

impl AttributeDeserializer {
    /// A structured value, or JSON text decoding to one, of the wanted shape.
    fn structured(&self, wanted: fn(&Json) -> bool) -> Option<Json> {
        match &self.0 {
            Value::Json(json) if wanted(json) => Some(json.clone()),
            Value::String(text) => serde_json::from_str(text).ok().filter(wanted),
            _ => None,
        }
    }

    fn boolean(&self) -> Option<bool> {
        match &self.0 {
            Value::Number(n) => Some(n.as_f64() != 0.0),
            Value::String(s) if s == "true" => Some(true),
            Value::String(s) if s == "false" => Some(false),
            Value::Json(Json::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

fn json_error(e: serde_json::Error) -> SerdeError {
    de::Error::custom(e)
}

impl<'de> IntoDeserializer<'de, SerdeError> for AttributeDeserializer {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> Deserializer<'de> for AttributeDeserializer {
    type Error = SerdeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        match self.0 {
            Value::Null => visitor.visit_none(),
            Value::String(s) => visitor.visit_string(s),
            Value::Number(Number::Int(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::StringSet(set) => SeqDeserializer::new(
                set.into_iter()
                    .map(|s| AttributeDeserializer(Value::String(s))),
            )
            .deserialize_any(visitor),
            Value::NumberSet(set) => SeqDeserializer::new(
                set.into_iter()
                    .map(|n| AttributeDeserializer(Value::Number(n))),
            )
            .deserialize_any(visitor),
            Value::Json(json) => json.deserialize_any(visitor).map_err(json_error),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        match self.boolean() {
            Some(b) => visitor.visit_bool(b),
            None => self.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        if matches!(self.0, Value::Null) {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        match self.0 {
            Value::Number(n) => visitor.visit_string(n.to_string()),
            Value::Json(Json::String(s)) => visitor.visit_string(s),
            other => AttributeDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        if let Some(json) = self.structured(Json::is_array) {
            return json.deserialize_seq(visitor).map_err(json_error);
        }
        match self.0 {
            Value::Null => {
                SeqDeserializer::new(std::iter::empty::<AttributeDeserializer>())
                    .deserialize_any(visitor)
            }
            // A set of one reads as a scalar.
            Value::String(_) | Value::Number(_) => {
                SeqDeserializer::new(std::iter::once(self)).deserialize_any(visitor)
            }
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, SerdeError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, SerdeError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeError> {
        match self.structured(Json::is_object) {
            Some(json) => json.deserialize_map(visitor).map_err(json_error),
            None => self.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, SerdeError> {
        match self.structured(Json::is_object) {
            Some(json) => json
                .deserialize_struct(name, fields, visitor)
                .map_err(json_error),
            None => self.deserialize_any(visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, SerdeError> {
        if let Some(json) = self.structured(Json::is_object) {
            return json
                .deserialize_enum(name, variants, visitor)
                .map_err(json_error);
        }
        match self.0 {
            Value::String(s) => {
                let variant: StringDeserializer<SerdeError> = s.into_deserializer();
                visitor.visit_enum(variant)
            }
            other => AttributeDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, SerdeError> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char bytes byte_buf
        unit unit_struct identifier ignored_any
    }
}
