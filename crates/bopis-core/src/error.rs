use thiserror::Error;

/// Input validation failures, raised before any remote call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("zip code is required")]
    MissingPostalCode,

    #[error("zip code length must lie between 5 and 9 (got {len})")]
    PostalCodeLength { len: usize },
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
