// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::attribute::AttributeKind;
use std::fmt::{Display, Formatter};

/// An opaque failure reported by a `Transport`, passed through untouched.
pub type RemoteError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(feature = "aws")]
/// A convenient alias for Serde Dynamo error so consuming code doesn't need to add it to `Cargo.toml`
pub type SerdeError = serde_dynamo::Error;

#[derive(Debug)]
/// An enum that encapsulates a variety of error types.
///
/// # Example
///
/// Error::MissingTable(format!("put(h={hash})"))
pub enum Error {
    /// Empty batch context submitted.
    EmptyBatch(String),
    /// Unrecognized or malformed attribute kind, or a value that cannot be
    /// coerced to the requested kind.
    InvalidKind(String),
    /// JSON (de)serialization error.
    Json(serde_json::Error),
    /// Write operation without a table name.
    MissingTable(String),
    /// Iteration requested on a scalar attribute.
    NotIterable(AttributeKind),
    /// Transport failure, with a description of the call that failed.
    Remote(RemoteError, String),
    /// Response lacks a member the call depends on.
    Response(String),
    #[cfg(feature = "aws")]
    /// Serde (serialization or deserialization) error
    Serde(SerdeError),
    /// String error.
    String(String),
    /// Polling exceeded its attempts.
    Timeout(String),
    /// Option not supported by the operation.
    UnsupportedOption(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::EmptyBatch(mesg) => write!(f, "empty batch: {mesg}"),
            Error::InvalidKind(mesg) => write!(f, "invalid kind: {mesg}"),
            Error::Json(e) => write!(f, "json: {e}"),
            Error::MissingTable(mesg) => write!(f, "missing table: {mesg}"),
            Error::NotIterable(kind) => write!(f, "attribute of kind {kind} is not iterable"),
            Error::Remote(e, source) => write!(f, "{source} failed: {e}"),
            Error::Response(mesg) => write!(f, "unexpected response: {mesg}"),
            #[cfg(feature = "aws")]
            Error::Serde(e) => write!(f, "serde: {e}"),
            Error::String(s) => Display::fmt(&s, f),
            Error::Timeout(mesg) => write!(f, "timeout: {mesg}"),
            Error::UnsupportedOption(mesg) => write!(f, "unsupported option: {mesg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            Error::Remote(e, _) => Some(e.as_ref()),
            #[cfg(feature = "aws")]
            Error::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
