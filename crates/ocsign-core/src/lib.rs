//! Core configuration and shared types for OCSign.
//!
//! This crate holds everything a signer needs before it can sign anything:
//! the raw [`SignerOptions`] as supplied by an external configuration system,
//! the validated and immutable [`SignerConfig`], the [`HashAlgorithm`] used
//! inside the key derivation function, and the construction-time
//! [`ConfigError`].

mod config;
mod error;
mod types;

pub use config::{
    DEFAULT_ALGORITHM, DEFAULT_ITERATIONS, DEFAULT_TTL_SECONDS, SignerConfig, SignerOptions,
};
pub use error::{ConfigError, ConfigResult};
pub use types::HashAlgorithm;
