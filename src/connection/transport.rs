// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::RemoteError;
use crate::context::Parameters;
use async_trait::async_trait;
use std::fmt::{Display, Formatter};

/// Response members of one remote call.
pub type Response = serde_json::Map<String, serde_json::Value>;

/// API version whose item format this crate speaks.
pub const API_VERSION: &str = "20111205";

/// The remote calls a connection issues.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    /// Store an item.
    PutItem,
    /// Read an item by key.
    GetItem,
    /// Modify attributes of an item.
    UpdateItem,
    /// Delete an item by key.
    DeleteItem,
    /// Read items sharing a hash key.
    Query,
    /// Read a whole table.
    Scan,
    /// Read items across tables.
    BatchGetItem,
    /// Put and delete items across tables.
    BatchWriteItem,
    /// Create a table.
    CreateTable,
    /// Change table throughput.
    UpdateTable,
    /// Delete a table.
    DeleteTable,
    /// Describe a table.
    DescribeTable,
    /// List table names.
    ListTables,
}

impl Operation {
    /// The operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::PutItem => "PutItem",
            Operation::GetItem => "GetItem",
            Operation::UpdateItem => "UpdateItem",
            Operation::DeleteItem => "DeleteItem",
            Operation::Query => "Query",
            Operation::Scan => "Scan",
            Operation::BatchGetItem => "BatchGetItem",
            Operation::BatchWriteItem => "BatchWriteItem",
            Operation::CreateTable => "CreateTable",
            Operation::UpdateTable => "UpdateTable",
            Operation::DeleteTable => "DeleteTable",
            Operation::DescribeTable => "DescribeTable",
            Operation::ListTables => "ListTables",
        }
    }

    /// The `X-Amz-Target` header value, e.g. `DynamoDB_20111205.PutItem`.
    pub fn target(&self) -> String {
        format!("DynamoDB_{API_VERSION}.{}", self.name())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sends one call to the database and returns its response members.
/// Signing, networking and retries are the transport's business.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `operation` with `parameters`.
    async fn call(
        &self,
        operation: Operation,
        parameters: Parameters,
    ) -> Result<Response, RemoteError>;
}
