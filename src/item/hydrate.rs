// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Item, Row};
use crate::attribute::Value;
use crate::common::Error;

/// Turns a raw wire row into a domain object.
///
/// Implemented by `ItemHydrator`, by any `Fn(&str, &Row) -> Result<T, Error>`
/// and, with the `aws` feature, by `SerdeHydrator<T>`.
pub trait Hydrator<T> {
    /// Build a `T` from a row read from `table`.
    fn hydrate(&self, table: &str, row: &Row) -> Result<T, Error>;
}

impl<T, F> Hydrator<T> for F
where
    F: Fn(&str, &Row) -> Result<T, Error>,
{
    fn hydrate(&self, table: &str, row: &Row) -> Result<T, Error> {
        self(table, row)
    }
}

/// Hydrates rows into `Item`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemHydrator;

impl Hydrator<Item> for ItemHydrator {
    fn hydrate(&self, table: &str, row: &Row) -> Result<Item, Error> {
        Item::from_row(table, row)
    }
}

/// Named field access, used to sort collections.
pub trait FieldValue {
    /// The value of field `name`, if present.
    fn field_value(&self, name: &str) -> Option<Value>;
}
