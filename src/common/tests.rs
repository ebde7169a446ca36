// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod common_tests {
    use crate::common::Error;

    #[cfg(feature = "toml")]
    #[test]
    fn config_tests() {
        use crate::common::{ConnectionConfig, DynamoSettings};
        use crate::log::LogLevel;
        use serde::Deserialize;
        use std::time::Duration;

        #[derive(Debug, Deserialize, PartialEq)]
        struct Tables {
            prefix: String,
        }

        let config = ConnectionConfig::builder()
            .debug(true)
            .toml_str(
                r#"
                [dynamo]
                log_level = "debug"
                table_poll_interval_secs = 1
                table_poll_max_attempts = 7

                [tables]
                prefix = "staging_"
                "#,
            )
            .build()
            .expect("config_tests.toml");
        assert!(config.debug());
        assert_eq!(
            *config.dynamo(),
            DynamoSettings {
                log: false,
                log_level: Some(LogLevel::Debug),
                table_poll_interval: Some(Duration::from_secs(1)),
                table_poll_max_attempts: Some(7),
            }
        );
        assert_eq!(
            config.section::<Tables>("tables").expect("tables section"),
            Some(Tables {
                prefix: "staging_".to_string()
            })
        );
        assert_eq!(config.section::<Tables>("missing").unwrap(), None);
        assert!(config.section::<Tables>("dynamo").is_err());

        let empty = ConnectionConfig::builder().toml_str("").build().unwrap();
        assert_eq!(*empty.dynamo(), DynamoSettings::default());

        let broken = ConnectionConfig::builder().toml_str("[dynamo").build();
        assert!(matches!(broken, Err(Error::String(_))));

        let bad_level = ConnectionConfig::builder()
            .toml_str("[dynamo]\nlog_level = \"loud\"")
            .build();
        assert!(matches!(bad_level, Err(Error::String(_))));

        let missing = ConnectionConfig::builder()
            .toml_file("no-such-dynamap-config.toml")
            .build();
        assert!(matches!(missing, Err(Error::String(_))));

        assert!(ConnectionConfig::builder().build().is_err());
    }

    #[test]
    fn error_display_tests() {
        let e = Error::MissingTable("put".to_string());
        println!("{e}");
        assert_eq!(e.to_string(), "missing table: put");
        let e = Error::Remote("throttled".into(), "query(t=Books)".to_string());
        assert_eq!(e.to_string(), "query(t=Books) failed: throttled");
    }
}
