//! Parameter error types

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Invalid configuration (e.g., name too long)
    InvalidConfig,
    /// No parameter registered under this name
    Unknown,
    /// Value text does not parse as the parameter's type
    TypeMismatch,
    /// Store is full
    StoreFull,
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::InvalidConfig => write!(f, "invalid parameter configuration"),
            ParameterError::Unknown => write!(f, "unknown parameter"),
            ParameterError::TypeMismatch => write!(f, "value does not match parameter type"),
            ParameterError::StoreFull => write!(f, "parameter store full"),
        }
    }
}
