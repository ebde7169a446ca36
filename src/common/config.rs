// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Error;
use crate::log::LogLevel;
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[allow(deprecated)]
use std::env::home_dir;
use std::fs::read_to_string;
use std::path::PathBuf;
use std::time::Duration;

/// Name of the table read by `ConnectionConfig::dynamo`.
pub const DYNAMO_SECTION: &str = "dynamo";

/// Parsed connection configuration.
///
/// The TOML document is parsed once when the builder finishes; the
/// `[dynamo]` table is validated then too, so a bad `log_level` fails early.
/// Other tables stay available to callers through `section`.
#[derive(Debug)]
pub struct ConnectionConfig {
    debug_enabled: bool,
    document: toml::Table,
    dynamo: DynamoSettings,
}

/// Connection settings from the `[dynamo]` table.  Unset keys are `None`,
/// leaving the connection defaults in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamoSettings {
    /// Attach a logger even when debug is off.
    pub log: bool,
    /// Lowest level the logger keeps.
    pub log_level: Option<LogLevel>,
    /// Delay between `wait_for_table` polls.
    pub table_poll_interval: Option<Duration>,
    /// Number of `wait_for_table` polls before giving up.
    pub table_poll_max_attempts: Option<u32>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DynamoToml {
    log: bool,
    log_level: Option<String>,
    table_poll_interval_secs: Option<u64>,
    table_poll_max_attempts: Option<u32>,
}

impl TryFrom<DynamoToml> for DynamoSettings {
    type Error = Error;

    fn try_from(raw: DynamoToml) -> Result<Self, Error> {
        Ok(Self {
            log: raw.log,
            log_level: raw.log_level.as_deref().map(str::parse::<LogLevel>).transpose()?,
            table_poll_interval: raw.table_poll_interval_secs.map(Duration::from_secs),
            table_poll_max_attempts: raw.table_poll_max_attempts,
        })
    }
}

fn toml_error(e: toml::de::Error) -> Error {
    Error::String(format!("toml: {e}"))
}

impl ConnectionConfig {
    /// Creates a configuration builder.
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            debug_enabled: false,
            source: None,
        }
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }

    /// The `[dynamo]` settings.
    pub fn dynamo(&self) -> &DynamoSettings {
        &self.dynamo
    }

    /// Deserialize the table called `name`, if present.
    pub fn section<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        self.document
            .get(name)
            .cloned()
            .map(|value| value.try_into().map_err(toml_error))
            .transpose()
    }

    /// Deserialize the whole document.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        toml::Value::Table(self.document.clone())
            .try_into()
            .map_err(toml_error)
    }

    fn parse(debug_enabled: bool, text: &str) -> Result<Self, Error> {
        let document: toml::Table = toml::from_str(text).map_err(toml_error)?;
        let dynamo = match document.get(DYNAMO_SECTION) {
            Some(value) => {
                let raw: DynamoToml = value.clone().try_into().map_err(toml_error)?;
                DynamoSettings::try_from(raw)?
            }
            None => DynamoSettings::default(),
        };
        Ok(Self {
            debug_enabled,
            document,
            dynamo,
        })
    }
}

/// Builder for `ConnectionConfig`.  Errors from reading a file are held
/// until `build`.
pub struct ConnectionConfigBuilder {
    debug_enabled: bool,
    source: Option<Result<String, Error>>,
}

impl ConnectionConfigBuilder {
    /// Parse the configured TOML, reporting the first error encountered.
    pub fn build(self) -> Result<ConnectionConfig, Error> {
        match self.source {
            Some(text) => ConnectionConfig::parse(self.debug_enabled, &text?),
            None => Err(Error::String("config not set".to_string())),
        }
    }

    /// Enable or disable debug output.
    pub fn debug(self, debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            ..self
        }
    }

    /// Read the named file from the home directory, falling back to the
    /// current directory.
    pub fn toml_file(self, file_name: &str) -> Self {
        #[allow(deprecated)]
        let candidates = home_dir()
            .map(|home| home.join(file_name))
            .into_iter()
            .chain([PathBuf::from(".").join(file_name)]);
        let text = candidates
            .filter_map(|path| read_to_string(path).ok())
            .next()
            .ok_or_else(|| Error::String(format!("{file_name}: cannot read")));
        Self {
            source: Some(text),
            ..self
        }
    }

    /// Use the given TOML text.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Use the given TOML text.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            source: Some(Ok(toml)),
            ..self
        }
    }
}
