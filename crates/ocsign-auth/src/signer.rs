//! Signed URL generation.
//!
//! [`Signer::generate`] augments a URL with the signing parameters and appends
//! a PBKDF2 signature tag computed over the result:
//!
//! 1. Set `OC-Credential`, `OC-Date`, `OC-Expires` and `OC-Verb`, in that order.
//! 2. Serialize the URL; this is the string to sign.
//! 3. Derive the tag with the configured secret, algorithm and iterations.
//! 4. Append `OC-Algo` and `OC-Signature`.
//!
//! Verification lives in [`crate::verify`].

use chrono::{DateTime, SecondsFormat, Utc};
use ocsign_core::{SignerConfig, SignerOptions};
use tracing::debug;
use url::Url;

use crate::canonical::{
    OC_ALGO, OC_CREDENTIAL, OC_DATE, OC_EXPIRES, OC_SIGNATURE, OC_VERB, remove_query_params,
    set_query_param, string_to_sign,
};
use crate::error::SignError;
use crate::kdf::derive_tag;

/// Issues and verifies signed URLs for one credential.
///
/// A `Signer` is an immutable configuration value. It is cheap to clone and
/// safe to share between threads.
///
/// # Examples
///
/// ```
/// use ocsign_auth::{Signer, VerifyOutcome};
/// use ocsign_core::SignerOptions;
///
/// let signer = Signer::from_options(
///     SignerOptions::builder()
///         .credential("alice")
///         .secret_key("s3cr3t")
///         .iterations(100)
///         .build(),
/// )
/// .unwrap();
///
/// let signed = signer.generate("http://cloud.example.com/files/report.pdf", "get").unwrap();
/// assert!(signed.contains("OC-Verb=GET"));
/// assert_eq!(signer.verify(&signed), VerifyOutcome::Ok);
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    config: SignerConfig,
}

impl Signer {
    /// Create a signer from a validated configuration.
    #[must_use]
    pub fn new(config: SignerConfig) -> Self {
        Self { config }
    }

    /// Validate `options` and create a signer from them.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Config`] if the options are incomplete or invalid.
    pub fn from_options(options: SignerOptions) -> Result<Self, SignError> {
        Ok(Self::new(SignerConfig::new(options)?))
    }

    /// The configuration this signer was built from.
    #[must_use]
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// The `OC-Algo` value this signer emits, e.g. `PBKDF2/10000-SHA512`.
    #[must_use]
    pub fn algorithm_descriptor(&self) -> String {
        format!(
            "PBKDF2/{}-{}",
            self.config.iterations(),
            self.config.algorithm().descriptor_name()
        )
    }

    /// Sign `url` for requests using `http_method`, issued now.
    ///
    /// # Errors
    ///
    /// - [`SignError::UrlParamUndefined`] if `url` is empty
    /// - [`SignError::HttpMethodParamUndefined`] if `http_method` is empty
    /// - [`SignError::UrlIsNotValid`] if `url` ends with `/` or is not an absolute URL
    pub fn generate(&self, url: &str, http_method: &str) -> Result<String, SignError> {
        self.generate_at(url, http_method, Utc::now())
    }

    /// Sign `url` with an explicit issuance time.
    ///
    /// # Errors
    ///
    /// Same as [`Signer::generate`].
    pub fn generate_at(
        &self,
        url: &str,
        http_method: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, SignError> {
        if url.is_empty() {
            return Err(SignError::UrlParamUndefined);
        }
        if http_method.is_empty() {
            return Err(SignError::HttpMethodParamUndefined);
        }
        // Paths must be normalized by the caller.
        if url.ends_with('/') {
            return Err(SignError::UrlIsNotValid(url.to_owned()));
        }

        let mut parsed = Url::parse(url).map_err(|_| SignError::UrlIsNotValid(url.to_owned()))?;
        let verb = http_method.to_uppercase();

        // Stale signing parameters from an earlier signature are not part of the message.
        remove_query_params(&mut parsed, &[OC_ALGO, OC_SIGNATURE]);

        set_query_param(&mut parsed, OC_CREDENTIAL, self.config.credential());
        set_query_param(&mut parsed, OC_DATE, &format_timestamp(issued_at));
        set_query_param(
            &mut parsed,
            OC_EXPIRES,
            &self.config.ttl_seconds().to_string(),
        );
        set_query_param(&mut parsed, OC_VERB, &verb);

        let signature = self.compute_signature(&parsed);

        set_query_param(&mut parsed, OC_ALGO, &self.algorithm_descriptor());
        set_query_param(&mut parsed, OC_SIGNATURE, &signature);

        debug!(
            credential = %self.config.credential(),
            verb = %verb,
            algorithm = %self.config.algorithm(),
            iterations = self.config.iterations(),
            "Generated signed URL"
        );

        Ok(parsed.into())
    }

    /// Derive the signature tag over the current state of `url`.
    pub(crate) fn compute_signature(&self, url: &Url) -> String {
        derive_tag(
            &string_to_sign(url),
            self.config.algorithm(),
            self.config.secret_key(),
            self.config.iterations(),
        )
    }
}

/// Render an issuance time as RFC 3339 UTC with millisecond precision.
fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
