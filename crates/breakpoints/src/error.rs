use core::fmt::{Display, Formatter, Result as FmtResult};
use std::error::Error;

/// Why a breakpoint table could not be built from JSON.
#[derive(Debug)]
pub enum TableError {
    /// The text is not valid JSON, or not an object of strings.
    Json(serde_json::Error),
    /// A key is not a positive integer threshold.
    InvalidThreshold(String),
    /// A class name is empty or contains whitespace.
    InvalidClass {
        /// Threshold the class was declared for.
        threshold: u32,
        /// The rejected class name.
        class: String,
    },
}

impl Display for TableError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Json(err) => write!(formatter, "malformed breakpoint JSON: {err}"),
            Self::InvalidThreshold(key) => {
                write!(formatter, "breakpoint threshold {key:?} is not a positive integer")
            }
            Self::InvalidClass { threshold, class } => write!(
                formatter,
                "breakpoint {threshold} has invalid class name {class:?}"
            ),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidThreshold(_) | Self::InvalidClass { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Engine options that could not be turned into a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The options document is not valid JSON or has a wrongly typed field.
    Json(serde_json::Error),
    /// An attribute or class name option is empty.
    EmptyName(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Json(err) => write!(formatter, "invalid engine options: {err}"),
            Self::EmptyName(option) => write!(formatter, "option `{option}` must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::EmptyName(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// A module whose breakpoint override was rejected during discovery.
#[derive(Debug)]
pub struct ModuleError {
    /// Position of the module in document order.
    pub index: usize,
    /// The raw attribute value.
    pub value: String,
    pub source: TableError,
}

impl Display for ModuleError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(
            formatter,
            "module #{} has an unusable breakpoint override {:?}: {}",
            self.index, self.value, self.source
        )
    }
}

impl Error for ModuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
