// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Cursor, NextContext};
use crate::item::{FieldValue, Row};
use std::cmp::Ordering;

/// Sort direction for `Collection::sort`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// `"ASC"` (any case) is ascending, anything else descending.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("ASC") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

/// Result items of a call, with pagination state.
///
/// Rows read off the wire sit in `request_items` until a hydrator turns them
/// into items; `count()` reports the remote count until the first item is
/// added, which is what count-only calls rely on.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    request_items: Vec<Row>,
    next_context: Option<NextContext>,
    request_count: usize,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            items: Vec::new(),
            request_items: Vec::new(),
            next_context: None,
            request_count: 0,
        }
    }
}

impl<T> Collection<T> {
    /// Create a collection from a response.
    pub fn new(
        next_context: Option<NextContext>,
        request_count: usize,
        request_items: Vec<Row>,
    ) -> Self {
        Self {
            items: Vec::new(),
            request_items,
            next_context,
            request_count,
        }
    }

    /// The context to issue for the next page, if any.
    pub fn next_context(&self) -> Option<&NextContext> {
        self.next_context.as_ref()
    }

    /// The continuation cursor, if any.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_context.as_ref().and_then(NextContext::cursor)
    }

    /// Returns `true` if the call has more items to retrieve.
    pub fn more(&self) -> bool {
        self.next_context.is_some()
    }

    /// Append an item.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the first item.
    pub fn shift(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Keep a slice of the items.  A negative `offset` counts from the end;
    /// a negative `length` stops that many items before the end; no length
    /// keeps everything from `offset` on.
    pub fn slice(&mut self, offset: isize, length: Option<isize>) -> &mut Self {
        let len = self.items.len() as isize;
        let start = if offset < 0 {
            (len + offset).max(0)
        } else {
            offset.min(len)
        };
        let end = match length {
            None => len,
            Some(length) if length < 0 => (len + length).max(start),
            Some(length) => start.saturating_add(length).min(len),
        };
        self.items.truncate(end as usize);
        self.items.drain(..start as usize);
        self
    }

    /// Sort by the given `(field, direction)` pairs, the first pair being the
    /// primary key.  The sort is stable; items missing a field come first in
    /// ascending order.
    pub fn sort(&mut self, criteria: &[(&str, SortDirection)]) -> &mut Self
    where
        T: FieldValue,
    {
        self.items.sort_by(|a, b| {
            for (field, direction) in criteria {
                let ordering = match (a.field_value(field), b.field_value(field)) {
                    (Some(a), Some(b)) => a.compare(&b),
                    (a, b) => a.is_some().cmp(&b.is_some()),
                };
                let ordering = match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
        self
    }

    /// Append the items of `other`.  The request count grows by
    /// `other.count()`, so merging count-only collections sums their counts.
    pub fn merge(&mut self, other: Collection<T>) {
        self.request_count += other.count();
        self.items.extend(other.items);
    }

    /// Rows not hydrated yet.
    pub fn request_items(&self) -> &[Row] {
        &self.request_items
    }

    /// Take the rows not hydrated yet, leaving none behind.
    pub fn take_request_items(&mut self) -> Vec<Row> {
        std::mem::take(&mut self.request_items)
    }

    /// The count reported by the remote call.
    pub fn request_count(&self) -> usize {
        self.request_count
    }

    /// The number of items, or the remote count when there are none.
    pub fn count(&self) -> usize {
        if self.items.is_empty() {
            self.request_count
        } else {
            self.items.len()
        }
    }

    /// The items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if no items were added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first item.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// The last item.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
