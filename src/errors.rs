use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result alias used by the driver and page layers
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors raised while resolving locators or talking to the browser
#[derive(Debug, Error)]
pub enum PageError {
    /// Placeholder/value arity mismatch or malformed placeholder
    #[error("Invalid locator '{locator}': {reason}")]
    LocatorFormat { locator: String, reason: String },
    /// No element matched the locator
    #[error("No elements found matching locator: {0}")]
    ElementNotFound(String),
    /// No window matched the requested handle or title
    #[error("No window found matching: {0}")]
    WindowNotFound(String),
    /// Explicit wait gave up
    #[error("Timed out after {timeout:?} waiting for {condition}")]
    WaitTimeout { condition: String, timeout: Duration },
    /// Element text could not be converted for comparison
    #[error("Cannot convert '{input}' to {target}")]
    Conversion { input: String, target: &'static str },
    /// Script raised or the driver rejected it
    #[error("Failed to execute script: {0}")]
    ScriptExecution(String),
    /// The element does not support the requested operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// WebDriver command failed
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),
    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PageError {
    /// Classify this error for assertions in calling tests
    pub fn outcome(&self) -> Outcome {
        match self {
            PageError::LocatorFormat { .. } => Outcome::LocatorFormatError,
            PageError::ElementNotFound(_) | PageError::WindowNotFound(_) => Outcome::NotFound,
            PageError::WaitTimeout { .. } => Outcome::Timeout,
            PageError::Conversion { .. } => Outcome::ConversionError,
            PageError::ScriptExecution(_) => Outcome::ScriptError,
            PageError::UnsupportedOperation(_)
            | PageError::WebDriver(_)
            | PageError::Other(_) => Outcome::DriverError,
        }
    }
}

/// How a page operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    NotFound,
    Timeout,
    ConversionError,
    LocatorFormatError,
    ScriptError,
    DriverError,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Ok => "ok",
            Outcome::NotFound => "not found",
            Outcome::Timeout => "timeout",
            Outcome::ConversionError => "conversion error",
            Outcome::LocatorFormatError => "locator format error",
            Outcome::ScriptError => "script error",
            Outcome::DriverError => "driver error",
        };
        f.write_str(name)
    }
}

/// Value of a page operation together with how it ended.
///
/// Failed operations still carry a value: the default for the type (empty
/// string, empty list, zero, `false`, `None`). Use [`Checked::value`] where only
/// that default-or-result matters and [`Checked::outcome`] to assert on the
/// failure cause.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    value: T,
    outcome: Outcome,
    error: Option<String>,
}

impl<T> Checked<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            outcome: Outcome::Ok,
            error: None,
        }
    }

    pub fn failed(value: T, error: &PageError) -> Self {
        Self {
            value,
            outcome: error.outcome(),
            error: Some(error.to_string()),
        }
    }

    /// The result, or the default value if the operation failed
    pub fn value(self) -> T {
        self.value
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_ok(&self) -> bool {
        self.outcome == Outcome::Ok
    }

    /// Error message when the operation failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The value only if the operation succeeded
    pub fn ok_value(self) -> Option<T> {
        if self.outcome == Outcome::Ok {
            Some(self.value)
        } else {
            None
        }
    }
}
