// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Severity of a log line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LogLevel {
    /// Request parameters and raw responses.
    Debug,
    /// Call boundaries and counter updates.
    #[default]
    Info,
    /// Contract violations and timeouts.
    Error,
}

impl LogLevel {
    /// Level token, as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(Error::String(format!("{s}: unknown log level"))),
        }
    }
}

/// Shared state behind a `StringLogger` and its clones.
#[derive(Default)]
pub struct LoggerInner {
    pub(crate) lines: Vec<(LogLevel, String)>,
    pub(crate) warn: bool,
}

/// Thread-safe string logger.
#[derive(Clone, Default)]
pub struct StringLogger {
    pub(crate) debug: bool,
    pub(crate) level: LogLevel,
    pub(crate) inner: Arc<Mutex<LoggerInner>>,
}

impl StringLogger {
    /// Create a new string logger.  With `debug` set, lines are also echoed
    /// to stdout.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            level: LogLevel::default(),
            inner: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Set the minimum level recorded by this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// The minimum level recorded by this logger.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether a line at `level` would be recorded.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Record a line at the given level.
    pub fn log(&self, level: LogLevel, line: String) {
        if line.is_empty() || !self.enabled(level) {
            return;
        }
        if self.debug {
            println!("[{level}] {line}");
        }
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.push((level, line));
            if level == LogLevel::Error {
                inner.warn = true;
            }
        }
    }

    /// Call a function and trace the result.
    pub fn call<T>(&self, line: String, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.trace(format!("{line} succeeded")),
            Err(e) => self.warn(format!("{line} failed\n{e}")),
        }
        result
    }

    /// Whether the log contains any warnings.
    pub fn contains_warnings(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.warn)
            .unwrap_or(false)
    }

    /// Add a debug line to this logger.
    pub fn debug(&self, line: String) {
        self.log(LogLevel::Debug, line);
    }

    /// Add all lines from the specified logger to this logger.
    pub fn extend(&self, string_logger: &StringLogger) {
        if Arc::ptr_eq(&self.inner, &string_logger.inner) {
            return;
        }
        let lines = match string_logger.inner.lock() {
            Ok(from_inner) => from_inner.lines.clone(),
            Err(_) => return,
        };
        for (level, line) in lines {
            self.log(level, line);
        }
    }

    /// Add an indented trace line to this logger.
    pub fn indent(&self, line: String, indentation: &str) {
        if !line.is_empty() {
            let indented_line = format!(
                "{indentation}{}",
                line.replace('\n', &format!("\n{indentation}"))
            );
            self.trace(indented_line);
        }
    }

    /// Lines recorded so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.lines.iter().map(|(_, line)| line.clone()).collect())
            .unwrap_or_default()
    }

    /// Lines recorded at exactly the given level.
    pub fn lines_at(&self, level: LogLevel) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| {
                inner
                    .lines
                    .iter()
                    .filter(|(l, _)| *l == level)
                    .map(|(_, line)| line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Add a trace line to this logger.
    pub fn trace(&self, line: String) {
        self.log(LogLevel::Info, line);
    }

    /// Add a warning or error line to this logger.
    pub fn warn(&self, line: String) {
        self.log(LogLevel::Error, line);
    }
}

impl Display for StringLogger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
