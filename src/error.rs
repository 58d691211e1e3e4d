use std::fmt;

/// Errors raised while building a gate configuration.
///
/// Every variant is fatal: a host that gets one must not start serving.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON was malformed, or a field had an unusable encoding
    /// (for example a non-numeric `denyStatus`).
    Parse(serde_json::Error),
    /// The JSON parsed but the values are not acceptable.
    Invalid(ConfigViolation),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config unmarshal: {}", e),
            ConfigError::Invalid(v) => write!(f, "invalid config: {}", v),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(v) => Some(v),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ConfigViolation> for ConfigError {
    fn from(v: ConfigViolation) -> Self {
        ConfigError::Invalid(v)
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigViolation {
    /// Which rule was broken
    pub kind: ConfigViolationKind,
    /// Human-readable detail
    pub message: String,
}

impl ConfigViolation {
    /// Creates a new violation.
    pub fn new(kind: ConfigViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConfigViolation {}

/// The validation rule a [`ConfigViolation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigViolationKind {
    /// `paramName` is missing or empty
    MissingParamName,
    /// `allowedValues` is missing or empty
    MissingAllowedValues,
    /// `denyStatus` does not fit in a `u16` status code
    DenyStatusOutOfRange {
        /// The rejected value
        status: i64,
    },
}

impl fmt::Display for ConfigViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigViolationKind::MissingParamName => write!(f, "missing paramName"),
            ConfigViolationKind::MissingAllowedValues => write!(f, "missing allowedValues"),
            ConfigViolationKind::DenyStatusOutOfRange { status } => {
                write!(f, "denyStatus {} out of range", status)
            }
        }
    }
}
