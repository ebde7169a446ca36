// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Conversions between attributes and `aws_sdk_dynamodb` attribute values.
mod convert;
/// Hydration and dehydration through `serde_dynamo`.
mod serde_item;

pub use crate::aws::convert::{from_aws_item, to_aws_item, AwsItem};
pub use crate::aws::serde_item::SerdeHydrator;

/// A convenient alias so consuming code doesn't need to add `aws-sdk-dynamodb` to `Cargo.toml`.
pub type AttributeValue = aws_sdk_dynamodb::types::AttributeValue;
