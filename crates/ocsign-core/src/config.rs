//! Signer configuration.
//!
//! [`SignerOptions`] is the raw, loosely-typed shape an external configuration
//! system hands over (a JSON document, environment variables, or code using the
//! builder). [`SignerConfig`] is the validated, immutable value a signer is
//! built from. Changing any setting means building a new [`SignerConfig`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::error::{ConfigError, ConfigResult};
use crate::types::HashAlgorithm;

/// Default validity window of a signed URL, in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 60;

/// Default hash algorithm name used inside PBKDF2.
pub const DEFAULT_ALGORITHM: &str = "sha512";

/// Default PBKDF2 work factor.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

const ENV_CREDENTIAL: &str = "OCSIGN_CREDENTIAL";
const ENV_SECRET_KEY: &str = "OCSIGN_SECRET_KEY";
const ENV_TTL: &str = "OCSIGN_TTL";
const ENV_ALGORITHM: &str = "OCSIGN_ALGORITHM";
const ENV_ITERATIONS: &str = "OCSIGN_ITERATIONS";

/// Raw signer options as supplied by the caller.
///
/// Only `credential` and `secretKey` are required; every other field falls
/// back to its default. The secret key is never serialized back out.
///
/// # Examples
///
/// ```
/// use ocsign_core::SignerOptions;
///
/// let options = SignerOptions::builder()
///     .credential("alice")
///     .secret_key("s3cr3t")
///     .ttl(120)
///     .build();
/// assert_eq!(options.ttl, 120);
/// assert_eq!(options.iterations, 10_000);
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SignerOptions {
    /// Opaque identity embedded in every signed URL.
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub credential: Option<String>,

    /// Shared secret used as the KDF password.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,

    /// Validity window in seconds.
    #[builder(default = DEFAULT_TTL_SECONDS)]
    #[serde(default = "default_ttl")]
    pub ttl: u64,

    /// Hash algorithm name (e.g. `"sha512"`).
    #[builder(default = String::from(DEFAULT_ALGORITHM), setter(into))]
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// PBKDF2 iteration count.
    #[builder(default = DEFAULT_ITERATIONS)]
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_ttl() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_algorithm() -> String {
    String::from(DEFAULT_ALGORITHM)
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl Default for SignerOptions {
    fn default() -> Self {
        Self {
            credential: None,
            secret_key: None,
            ttl: DEFAULT_TTL_SECONDS,
            algorithm: String::from(DEFAULT_ALGORITHM),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl fmt::Debug for SignerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerOptions")
            .field("credential", &self.credential)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("ttl", &self.ttl)
            .field("algorithm", &self.algorithm)
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl SignerOptions {
    /// Load options from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `OCSIGN_CREDENTIAL` | *(required)* |
    /// | `OCSIGN_SECRET_KEY` | *(required)* |
    /// | `OCSIGN_TTL` | `60` |
    /// | `OCSIGN_ALGORITHM` | `sha512` |
    /// | `OCSIGN_ITERATIONS` | `10000` |
    ///
    /// Returns `Ok(None)` when none of the variables is set.
    pub fn from_env() -> ConfigResult<Option<Self>> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load options through an arbitrary variable lookup.
    ///
    /// This is the engine behind [`SignerOptions::from_env`].
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = lookup(ENV_CREDENTIAL);
        let secret_key = lookup(ENV_SECRET_KEY);
        let ttl = lookup(ENV_TTL);
        let algorithm = lookup(ENV_ALGORITHM);
        let iterations = lookup(ENV_ITERATIONS);

        if credential.is_none()
            && secret_key.is_none()
            && ttl.is_none()
            && algorithm.is_none()
            && iterations.is_none()
        {
            return Ok(None);
        }

        let mut options = Self {
            credential,
            secret_key,
            ..Self::default()
        };

        if let Some(v) = ttl {
            options.ttl = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_TTL,
                value: v.clone(),
            })?;
        }
        if let Some(v) = algorithm {
            options.algorithm = v;
        }
        if let Some(v) = iterations {
            options.iterations = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_ITERATIONS,
                value: v.clone(),
            })?;
        }

        Ok(Some(options))
    }
}

/// Validated, immutable signer configuration.
///
/// # Examples
///
/// ```
/// use ocsign_core::{HashAlgorithm, SignerConfig, SignerOptions};
///
/// let config = SignerConfig::new(
///     SignerOptions::builder().credential("user").secret_key("secr").build(),
/// )
/// .unwrap();
/// assert_eq!(config.ttl_seconds(), 60);
/// assert_eq!(config.algorithm(), HashAlgorithm::Sha512);
/// assert_eq!(config.iterations(), 10_000);
/// ```
#[derive(Clone)]
pub struct SignerConfig {
    credential: String,
    secret_key: String,
    ttl_seconds: u64,
    algorithm: HashAlgorithm,
    iterations: u32,
}

impl SignerConfig {
    /// Validate raw options into a configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::CredentialUndefined`] if the credential is missing or empty
    /// - [`ConfigError::SecretKeyUndefined`] if the secret key is missing or empty
    /// - [`ConfigError::InvalidTtl`] for a zero ttl or one above `i64::MAX`
    /// - [`ConfigError::InvalidIterations`] for zero iterations
    /// - [`ConfigError::UnsupportedAlgorithm`] for an unknown hash name
    pub fn new(options: SignerOptions) -> ConfigResult<Self> {
        let credential = options
            .credential
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::CredentialUndefined)?;
        let secret_key = options
            .secret_key
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::SecretKeyUndefined)?;

        // `OC-Expires` is read back as a signed 64-bit integer.
        if options.ttl == 0 || i64::try_from(options.ttl).is_err() {
            return Err(ConfigError::InvalidTtl(options.ttl));
        }
        if options.iterations == 0 {
            return Err(ConfigError::InvalidIterations(options.iterations));
        }

        let algorithm: HashAlgorithm = options.algorithm.parse()?;

        debug!(
            credential = %credential,
            ttl_seconds = options.ttl,
            algorithm = %algorithm,
            iterations = options.iterations,
            "built signer configuration"
        );

        Ok(Self {
            credential,
            secret_key,
            ttl_seconds: options.ttl,
            algorithm,
            iterations: options.iterations,
        })
    }

    /// Build a configuration from options that may be absent altogether.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OptionsUndefined`] for `None`, otherwise whatever
    /// [`SignerConfig::new`] returns.
    pub fn from_options(options: Option<SignerOptions>) -> ConfigResult<Self> {
        Self::new(options.ok_or(ConfigError::OptionsUndefined)?)
    }

    /// Build a configuration from `OCSIGN_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_options(SignerOptions::from_env()?)
    }

    /// The credential identity.
    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// The shared secret. Never log or transmit this value.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Validity window in seconds.
    #[must_use]
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Hash algorithm used inside PBKDF2.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// PBKDF2 work factor.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("credential", &self.credential)
            .field("secret_key", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("algorithm", &self.algorithm)
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl TryFrom<SignerOptions> for SignerConfig {
    type Error = ConfigError;

    fn try_from(options: SignerOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}
