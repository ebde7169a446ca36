// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// A typed attribute value and its wire form.
mod attribute;
/// Comparison operators and conditions.
mod condition;
/// Primary keys.
mod key;
/// Attribute kinds.
mod kind;
/// Numeric values.
mod number;
/// Attribute updates.
mod update;
/// Values read out of attributes.
mod value;

pub use self::attribute::Attribute;
pub use self::condition::{AttributeCondition, ComparisonOperator};
pub use self::key::Key;
pub use self::kind::AttributeKind;
pub use self::number::Number;
pub use self::update::{AttributeUpdate, UpdateAction};
pub use self::value::Value;
