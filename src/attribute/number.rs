// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A numeric attribute value.  Integers stay exact; anything with a
/// fraction or exponent is held as a finite `f64`.
///
/// Floats keep about 17 significant digits, so decimal text beyond that
/// (or integers outside `i64`) is rounded to the nearest `f64` and written
/// back in that rounded form.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    /// Integral value.
    Int(i64),
    /// Finite floating point value.
    Float(f64),
}

impl Number {
    /// Parse numeric text, allowing surrounding whitespace.  Returns `None`
    /// for anything that is not a finite decimal or scientific number
    /// (`"inf"`, `"NaN"`, `"0x10"`, `""`).  Non-integral text is subject to
    /// `f64` precision.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        if digits.is_empty()
            || !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            || !digits
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        {
            return None;
        }
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Int(i));
        }
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Number::Float)
    }

    /// Convert a JSON number.
    pub fn from_json(n: &serde_json::Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Number::Int(i))
        } else {
            n.as_f64().filter(|f| f.is_finite()).map(Number::Float)
        }
    }

    /// Lossy conversion to `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// The value as an `i64`, if it is integral.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
            Number::Float(_) => None,
        }
    }

    /// Convert to a JSON number.
    pub fn to_json(&self) -> serde_json::Value {
        match *self {
            Number::Int(i) => serde_json::Value::from(i),
            Number::Float(f) => serde_json::Value::from(f),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => Display::fmt(i, f),
            Number::Float(x) => Display::fmt(x, f),
        }
    }
}

/// Exact ordering of an integer against a float; no rounding through `f64`.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return Ordering::Less;
    }
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal if f > whole => Ordering::Less,
        Ordering::Equal if f < whole => Ordering::Greater,
        ordering => ordering,
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
            // -0.0 and 0.0 are equal.
            (Number::Float(a), Number::Float(b)) => {
                a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
            }
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Number::Int(i)
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Number::Int(i.into())
    }
}

impl From<u32> for Number {
    fn from(i: u32) -> Self {
        Number::Int(i.into())
    }
}
