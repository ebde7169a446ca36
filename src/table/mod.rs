// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Table descriptions and listings.
mod description;
/// Key schema and throughput.
mod schema;
/// Unit tests.
mod tests;

pub use self::description::{TableCollection, TableDescription, TableStatus};
pub use self::schema::{KeySchema, KeySchemaElement, ProvisionedThroughput};
