// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Results of batch reads.
mod batch;
/// Consumed capacity counters.
mod capacity;
/// Calls and response handling.
mod connection;
/// Unit tests.
mod tests;
/// The remote call seam.
mod transport;

pub use self::batch::BatchCollection;
pub use self::capacity::CapacityUnits;
pub use self::connection::{Attributes, Connection};
pub use self::transport::{Operation, Response, Transport, API_VERSION};
