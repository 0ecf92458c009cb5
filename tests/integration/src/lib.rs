//! Integration tests for OCSign.
//!
//! These exercise the signer and verifier together through the public API of
//! `ocsign-core` and `ocsign-auth`, the way a resource server and a URL issuer
//! would use them from separate processes sharing only configuration.
//!
//! Run them with:
//! ```text
//! cargo test -p ocsign-integration
//! ```

use std::sync::Once;

use ocsign_auth::Signer;
use ocsign_core::{SignerConfig, SignerOptions};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Credential shared by the test issuer and verifier.
pub const TEST_CREDENTIAL: &str = "user";

/// Secret shared by the test issuer and verifier.
pub const TEST_SECRET_KEY: &str = "secr";

/// A resource URL of the shape a WebDAV server hands out.
pub const TEST_RESOURCE: &str = "https://cloud.example.com/remote.php/dav/files/user/Photos/cat.jpg";

/// Build options for the shared test credential, with a low work factor.
#[must_use]
pub fn test_options() -> SignerOptions {
    SignerOptions::builder()
        .credential(TEST_CREDENTIAL)
        .secret_key(TEST_SECRET_KEY)
        .iterations(100)
        .build()
}

/// Build a signer from `options`.
#[must_use]
pub fn signer_from(options: SignerOptions) -> Signer {
    init_tracing();
    Signer::new(SignerConfig::new(options).expect("valid test options"))
}

/// Build a signer for the shared test credential.
#[must_use]
pub fn test_signer() -> Signer {
    signer_from(test_options())
}

mod test_concurrency;
mod test_config;
mod test_expiry;
mod test_roundtrip;
