//! Signed URL issuance and verification for OCSign.
//!
//! A signed URL grants bearer-style, time-limited access to one resource for
//! one HTTP method. The issuer adds its credential, an issuance timestamp, a
//! validity window and the method to the URL's query, then appends a PBKDF2
//! tag computed over the whole URL with a shared secret. The receiver
//! recomputes the tag with the same secret and decides.
//!
//! # Usage
//!
//! ```rust
//! use ocsign_auth::{Signer, VerifyOutcome};
//! use ocsign_core::SignerOptions;
//!
//! let signer = Signer::from_options(
//!     SignerOptions::builder()
//!         .credential("alice")
//!         .secret_key("s3cr3t")
//!         .build(),
//! )
//! .unwrap();
//!
//! let url = signer.generate("https://cloud.example.com/files/a.txt", "GET").unwrap();
//! assert_eq!(signer.verify(&url), VerifyOutcome::Ok);
//! assert_eq!(signer.verify_with_method(&url, "DELETE"), VerifyOutcome::Forbidden);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Query parameter names and the canonical string to sign
//! - [`error`] - Generation error types
//! - [`kdf`] - The PBKDF2 keyed hash primitive
//! - [`signer`] - The [`Signer`] and signed URL generation
//! - [`verify`] - Verification and [`VerifyOutcome`]

pub mod canonical;
pub mod error;
pub mod kdf;
pub mod signer;
pub mod verify;

pub use error::SignError;
pub use kdf::{derive, derive_tag};
pub use signer::Signer;
pub use verify::{DEFAULT_VERIFY_METHOD, EXPIRED_STATUS, VerifyOutcome};
