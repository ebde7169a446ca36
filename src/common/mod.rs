// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(feature = "toml")]
/// Connection configuration read from TOML.
mod config;
/// An enum that encapsulates a variety of error types.
mod error;
/// Unit tests.
mod tests;

#[cfg(feature = "toml")]
pub use self::config::{ConnectionConfig, ConnectionConfigBuilder, DynamoSettings, DYNAMO_SECTION};
pub use self::error::{Error, RemoteError};
#[cfg(feature = "aws")]
pub use self::error::SerdeError;
