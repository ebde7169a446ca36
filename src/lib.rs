// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! This crate maps typed items onto Dynamo DB tables: attributes and their
//! kinds, request contexts, paginated collections, and a connection that
//! issues calls through a pluggable transport.

/// Typed attribute values, conditions, keys and updates.
pub mod attribute;
pub use attribute::*;

#[cfg(feature = "aws")]
/// Conversions to and from the AWS SDK item representation.
pub mod aws;
#[cfg(feature = "aws")]
pub use aws::*;

/// Paginated result items.
pub mod collection;
pub use collection::*;

/// Types common to multiple modules.
pub mod common;
pub use common::*;

/// Issues calls and interprets responses.
pub mod connection;
pub use connection::*;

/// Request options rendered as call parameters.
pub mod context;
pub use context::*;

/// Items and their hydration.
pub mod item;
pub use item::*;

/// Thread-safe logging.
pub mod log;
pub use log::*;

/// Table schemas and descriptions.
pub mod table;
pub use table::*;
