//! Keyed hash primitive.
//!
//! A signature tag is PBKDF2 run with the shared secret as the password and
//! the string to sign as the salt:
//!
//! ```text
//! tag = hex(PBKDF2-HMAC-<algorithm>(password = secret_key,
//!                                   salt     = message,
//!                                   rounds   = iterations,
//!                                   dk_len   = 32))
//! ```
//!
//! The output is always 64 lowercase hex characters.

use ocsign_core::HashAlgorithm;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::error::SignError;

/// Length of the derived tag in bytes.
pub const TAG_LENGTH: usize = 32;

/// Derive the hex signature tag for `message`.
///
/// # Examples
///
/// ```
/// use ocsign_auth::kdf::derive_tag;
/// use ocsign_core::HashAlgorithm;
///
/// let tag = derive_tag("message", HashAlgorithm::Sha512, "secret", 1);
/// assert_eq!(tag.len(), 64);
/// assert_eq!(tag, derive_tag("message", HashAlgorithm::Sha512, "secret", 1));
/// ```
#[must_use]
pub fn derive_tag(
    message: &str,
    algorithm: HashAlgorithm,
    secret_key: &str,
    iterations: u32,
) -> String {
    let password = secret_key.as_bytes();
    let salt = message.as_bytes();
    let mut tag = [0u8; TAG_LENGTH];

    match algorithm {
        HashAlgorithm::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, iterations, &mut tag),
        HashAlgorithm::Sha224 => pbkdf2_hmac::<Sha224>(password, salt, iterations, &mut tag),
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut tag),
        HashAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, iterations, &mut tag),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut tag),
    }

    hex::encode(tag)
}

/// Derive the hex signature tag, resolving the hash algorithm by name.
///
/// # Errors
///
/// Returns [`SignError::UnsupportedAlgorithm`] if `algorithm` does not name a
/// supported hash function.
pub fn derive(
    message: &str,
    algorithm: &str,
    secret_key: &str,
    iterations: u32,
) -> Result<String, SignError> {
    let algorithm: HashAlgorithm = algorithm
        .parse()
        .map_err(|_| SignError::UnsupportedAlgorithm(algorithm.to_owned()))?;
    Ok(derive_tag(message, algorithm, secret_key, iterations))
}
