// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Batch get context.
mod batch_get;
/// Batch write context.
mod batch_write;
/// Options shared by query and scan.
mod collection;
/// Get context.
mod get;
/// Query context.
mod query;
/// Scan context.
mod scan;
/// Put, update and delete context.
mod write;

pub use self::batch_get::BatchGetContext;
pub use self::batch_write::{BatchWriteContext, WriteRequest};
pub use self::collection::CollectionContext;
pub use self::get::GetContext;
pub use self::query::QueryContext;
pub use self::scan::ScanContext;
pub use self::write::{DeleteContext, Expected, PutContext, ReturnValues, UpdateContext, WriteContext};

/// Request parameters of one remote call.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// High level options of a call, rendered as request parameters.
pub trait Context {
    /// The parameters this context contributes.
    fn parameters(&self) -> Parameters;

    /// Add this context's parameters to `parameters`, keeping any member
    /// the call already set.
    fn merge_into(&self, parameters: &mut Parameters) {
        for (name, value) in self.parameters() {
            parameters.entry(name).or_insert(value);
        }
    }
}
