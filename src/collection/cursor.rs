// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::context::{QueryContext, ScanContext};
use serde::{Deserialize, Serialize};

/// Opaque continuation token (`LastEvaluatedKey`).  It is handed back
/// exactly as received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(serde_json::Value);

impl Cursor {
    /// The token, as received.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Cursor {
    fn from(value: serde_json::Value) -> Self {
        Cursor(value)
    }
}

/// The context to issue for the next page of a paginated call.
#[derive(Clone, Debug, PartialEq)]
pub enum NextContext {
    /// Continue a query.
    Query(QueryContext),
    /// Continue a scan.
    Scan(ScanContext),
}

impl NextContext {
    /// The cursor installed in the context.
    pub fn cursor(&self) -> Option<&Cursor> {
        match self {
            NextContext::Query(query) => query.collection().start_key(),
            NextContext::Scan(scan) => scan.collection().start_key(),
        }
    }
}
