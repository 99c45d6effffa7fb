//! Log record structure

use super::level::Level;
use chrono::{DateTime, Utc};

/// Source location of the call that produced a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: String,
    pub function: String,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }
}

/// One structured log event as handed over by the logging framework.
///
/// The timestamp and logger name travel with the record for the benefit of
/// other sinks; the shipped document carries only level, message, and caller
/// location (the collector stamps arrival time itself).
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger_name: String,
    pub caller: Option<Caller>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            logger_name: String::new(),
            caller: None,
        }
    }

    #[must_use]
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    #[must_use]
    pub fn with_caller(mut self, file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        self.caller = Some(Caller::new(file, function, line));
        self
    }
}
