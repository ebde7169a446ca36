// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod log_tests {
    use crate::common::Error;
    use crate::log::{LogLevel, StringLogger};

    #[test]
    fn logger_tests() {
        println!("Testing logger");
        let log1 = StringLogger::default();

        let bar = 123;
        log1.trace(format!("foo {bar}"));
        log1.trace(format!("bar {bar}"));
        log1.debug(format!("hidden {bar}"));
        println!("Testing trace:\n{log1}");
        assert_eq!(log1.lines(), vec!["foo 123", "bar 123"]);
        assert!(!log1.contains_warnings());

        let log2 = log1.clone();
        log2.trace("clone shares lines".to_string());
        assert_eq!(log1.lines().len(), 3);

        let log3 = StringLogger::new(false).with_level(LogLevel::Debug);
        log3.debug("first".to_string());
        log3.extend(&log1);
        assert_eq!(log3.lines().len(), 4);
        assert_eq!(log3.lines_at(LogLevel::Debug), vec!["first"]);

        let log4 = StringLogger::default();
        log4.trace("not a warning".to_string());
        assert!(!log4.contains_warnings());
        log4.warn("this is a warning".to_string());
        assert!(log4.contains_warnings());
        println!("Testing warnings text:\n{log4}");

        let log5 = StringLogger::default().with_level(LogLevel::Error);
        let ok: Result<u32, Error> = Ok(1);
        assert!(log5.call("quiet".to_string(), ok).is_ok());
        assert!(log5.lines().is_empty());
        let err: Result<u32, Error> = Err(Error::String("this is an error".to_string()));
        assert!(log5.call("loud".to_string(), err).is_err());
        assert_eq!(log5.lines(), vec!["loud failed\nthis is an error"]);

        let log6 = StringLogger::default();
        log6.indent("a\nb".to_string(), "  ");
        assert_eq!(log6.to_string(), "  a\n  b");
    }

    #[test]
    fn level_tests() {
        assert_eq!("debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert_eq!("ERROR".parse::<LogLevel>().ok(), Some(LogLevel::Error));
        assert!("TRACE".parse::<LogLevel>().is_err());
        assert!(LogLevel::Debug < LogLevel::Info && LogLevel::Info < LogLevel::Error);
    }
}
