//! Error types for signed URL generation.
//!
//! Only misuse of the API is an error. A URL that fails verification is a
//! normal [`VerifyOutcome`](crate::VerifyOutcome), not a [`SignError`].

use ocsign_core::ConfigError;

/// Errors that can occur while generating a signed URL.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// No URL was supplied.
    #[error("url parameter is undefined")]
    UrlParamUndefined,

    /// No HTTP method was supplied.
    #[error("http method parameter is undefined")]
    HttpMethodParamUndefined,

    /// The URL ends with `/` or is not an absolute URL.
    #[error("url is not valid: {0}")]
    UrlIsNotValid(String),

    /// The hash algorithm name is not supported by the key derivation.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signer could not be built from its options.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SignError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UrlParamUndefined => "URL_PARAM_UNDEFINED",
            Self::HttpMethodParamUndefined => "HTTP_METHOD_PARAM_UNDEFINED",
            Self::UrlIsNotValid(_) => "URL_IS_NOT_VALID",
            Self::UnsupportedAlgorithm(_) => "UNSUPPORTED_ALGORITHM",
            Self::Config(err) => err.code(),
        }
    }
}
