use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Caller-input problems with a submitted [`crate::Filter`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("{field} must be a whole number, got \"{value}\"")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must contain digits only, got \"{value}\"")]
    InvalidPostalCode { field: &'static str, value: String },

    #[error("{from_field} ({from}) is greater than {to_field} ({to})")]
    InvertedRange {
        from_field: &'static str,
        to_field: &'static str,
        from: u32,
        to: u32,
    },
}
