// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{KeySchema, ProvisionedThroughput};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lifecycle state of a table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    /// Being created.
    Creating,
    /// Throughput being changed.
    Updating,
    /// Being deleted.
    Deleting,
    /// Ready.
    Active,
}

impl Display for TableStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TableStatus::Creating => "CREATING",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
            TableStatus::Active => "ACTIVE",
        })
    }
}

/// The `Table` member of a describe table response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    /// Table name.
    pub table_name: String,
    /// Current state.
    pub table_status: TableStatus,
    /// Seconds since the epoch.
    #[serde(default)]
    pub creation_date_time: Option<f64>,
    /// Approximate number of items.
    #[serde(default)]
    pub item_count: Option<u64>,
    /// Approximate size.
    #[serde(default)]
    pub table_size_bytes: Option<u64>,
    /// Primary key.
    #[serde(default)]
    pub key_schema: Option<KeySchema>,
    /// Capacity.
    #[serde(default)]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
}

/// One page of table names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCollection {
    tables: Vec<String>,
    last_evaluated_table_name: Option<String>,
}

impl TableCollection {
    /// Create an empty page.
    pub fn new(last_evaluated_table_name: Option<String>) -> Self {
        Self {
            tables: Vec::new(),
            last_evaluated_table_name,
        }
    }

    /// Append a table name.
    pub fn add(&mut self, table: String) {
        self.tables.push(table);
    }

    /// The name to resume listing after.
    pub fn last_evaluated_table_name(&self) -> Option<&str> {
        self.last_evaluated_table_name.as_deref()
    }

    /// Returns `true` if there are more tables to list.
    pub fn more(&self) -> bool {
        self.last_evaluated_table_name.is_some()
    }

    /// The table names.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Number of table names.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
