//! Error types for signer construction.

/// Errors raised while building a signer configuration.
///
/// These are programmer or deployment errors: a signer with missing or
/// malformed configuration is never silently defaulted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No signer options were supplied at all.
    #[error("signer options are undefined")]
    OptionsUndefined,

    /// The credential identity is missing or empty.
    #[error("credential is undefined")]
    CredentialUndefined,

    /// The shared secret key is missing or empty.
    #[error("secret key is undefined")]
    SecretKeyUndefined,

    /// The hash algorithm name is not one the key derivation supports.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The default validity window must be a positive number of seconds.
    #[error("ttl must be a positive number of seconds, got {0}")]
    InvalidTtl(u64),

    /// The key derivation work factor must be positive.
    #[error("iterations must be positive, got {0}")]
    InvalidIterations(u32),

    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Name of the offending variable.
        name: &'static str,
        /// The raw value as found.
        value: String,
    },
}

impl ConfigError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OptionsUndefined => "OPTIONS_UNDEFINED",
            Self::CredentialUndefined => "CREDENTIAL_UNDEFINED",
            Self::SecretKeyUndefined => "SECRET_KEY_UNDEFINED",
            Self::UnsupportedAlgorithm(_) => "UNSUPPORTED_ALGORITHM",
            Self::InvalidTtl(_) => "TTL_IS_NOT_VALID",
            Self::InvalidIterations(_) => "ITERATIONS_IS_NOT_VALID",
            Self::InvalidValue { .. } => "CONFIG_VALUE_IS_NOT_VALID",
        }
    }
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
