//! Structured error types shared across the election workshop crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ElecError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (state names, parameter values, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for aggregation and simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ElecError {
    /// A required state or region has no usable poll or delegate data.
    #[error("insufficient data: {0}")]
    InsufficientData(ErrorInfo),
    /// Configured vote shares do not form a probability distribution.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(ErrorInfo),
    /// Sample size was not a positive integer.
    #[error("invalid sample size: {0}")]
    InvalidSampleSize(ErrorInfo),
    /// Trial count was not a positive integer.
    #[error("invalid trial count: {0}")]
    InvalidTrialCount(ErrorInfo),
    /// A ratio was requested over an empty sample.
    #[error("division undefined: {0}")]
    DivisionUndefined(ErrorInfo),
    /// Win formula parsing or region resolution failures.
    #[error("formula error: {0}")]
    Formula(ErrorInfo),
    /// A raw table row could not be interpreted.
    #[error("table error: {0}")]
    Table(ErrorInfo),
    /// Configuration loading and serialization failures.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ElecError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ElecError::InsufficientData(info)
            | ElecError::InvalidDistribution(info)
            | ElecError::InvalidSampleSize(info)
            | ElecError::InvalidTrialCount(info)
            | ElecError::DivisionUndefined(info)
            | ElecError::Formula(info)
            | ElecError::Table(info)
            | ElecError::Config(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Wraps an I/O or decoding failure as a configuration error.
    pub fn config(code: &str, err: impl ToString) -> Self {
        ElecError::Config(ErrorInfo::new(code, err.to_string()))
    }
}
