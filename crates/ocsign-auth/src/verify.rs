//! Signed URL verification.
//!
//! Verification is a total decision over untrusted input: every URL maps to
//! exactly one [`VerifyOutcome`], and nothing here returns an error. The checks
//! run in a fixed order and the first failing one decides:
//!
//! 1. `OC-Signature` must be present (`BadRequest`).
//! 2. The tag recomputed over the URL without `OC-Signature` and `OC-Algo`,
//!    using this signer's own secret, algorithm and iterations, must match
//!    (`Forbidden`).
//! 3. `OC-Verb`, when present, must match the request method (`Forbidden`).
//!    A URL without `OC-Verb` is accepted for any method.
//! 4. `OC-Date` and `OC-Expires` must be present and well-formed (`BadRequest`).
//! 5. `OC-Date + OC-Expires` must not lie in the past (`Expired`).

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use http::StatusCode;
use subtle::ConstantTimeEq;
use tracing::debug;
use url::Url;

use crate::canonical::{
    OC_ALGO, OC_CREDENTIAL, OC_DATE, OC_EXPIRES, OC_SIGNATURE, OC_VERB, get_query_param,
    remove_query_params,
};
use crate::signer::Signer;

/// HTTP method assumed when the caller does not supply one.
pub const DEFAULT_VERIFY_METHOD: &str = "GET";

/// Status code reported for an expired signed URL. Never equal to 403.
pub const EXPIRED_STATUS: u16 = 498;

/// The result of verifying a signed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum VerifyOutcome {
    /// The URL is authentic, bound to this method and still valid.
    Ok,
    /// The URL is malformed or lacks a required parameter.
    BadRequest,
    /// The signature does not match or the method is not the signed one.
    Forbidden,
    /// The signature is valid but the validity window has passed.
    Expired,
}

impl VerifyOutcome {
    /// Numeric status code for this outcome.
    #[must_use]
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::Expired => EXPIRED_STATUS,
        }
    }

    /// HTTP status code for this outcome.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Expired => {
                StatusCode::from_u16(EXPIRED_STATUS).expect("498 is within the valid status range")
            }
        }
    }

    /// Whether access should be granted.
    #[must_use]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Outcome name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "BadRequest",
            Self::Forbidden => "Forbidden",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VerifyOutcome> for StatusCode {
    fn from(outcome: VerifyOutcome) -> Self {
        outcome.status_code()
    }
}

impl Signer {
    /// Verify `url` for a `GET` request.
    pub fn verify(&self, url: &str) -> VerifyOutcome {
        self.verify_with_method(url, DEFAULT_VERIFY_METHOD)
    }

    /// Verify `url` for a request made with `http_method`.
    pub fn verify_with_method(&self, url: &str, http_method: &str) -> VerifyOutcome {
        self.verify_at(url, http_method, Utc::now())
    }

    /// Verify `url` against an explicit "now".
    pub fn verify_at(&self, url: &str, http_method: &str, now: DateTime<Utc>) -> VerifyOutcome {
        let Ok(mut parsed) = Url::parse(url) else {
            debug!("Signed URL is not a valid absolute URL");
            return VerifyOutcome::BadRequest;
        };

        let Some(provided) = get_query_param(&parsed, OC_SIGNATURE) else {
            debug!("Signed URL has no {OC_SIGNATURE}");
            return VerifyOutcome::BadRequest;
        };

        remove_query_params(&mut parsed, &[OC_SIGNATURE, OC_ALGO]);
        let expected = self.compute_signature(&parsed);

        if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            debug!(
                credential = ?get_query_param(&parsed, OC_CREDENTIAL),
                "Signed URL signature mismatch"
            );
            return VerifyOutcome::Forbidden;
        }

        if let Some(verb) = get_query_param(&parsed, OC_VERB) {
            if verb.to_uppercase() != http_method.to_uppercase() {
                debug!(signed = %verb, requested = %http_method, "Signed URL method mismatch");
                return VerifyOutcome::Forbidden;
            }
        }

        let Some(date) = get_query_param(&parsed, OC_DATE) else {
            debug!("Signed URL has no {OC_DATE}");
            return VerifyOutcome::BadRequest;
        };

        let Some(expires) = get_query_param(&parsed, OC_EXPIRES) else {
            debug!("Signed URL has no {OC_EXPIRES}");
            return VerifyOutcome::BadRequest;
        };

        let Ok(expires) = expires.parse::<i64>() else {
            debug!(expires = %expires, "Signed URL has a non-numeric {OC_EXPIRES}");
            return VerifyOutcome::BadRequest;
        };

        let Some(expiry) = expiry_time(&date, expires) else {
            debug!(date = %date, expires, "Signed URL has an unusable validity window");
            return VerifyOutcome::BadRequest;
        };

        if expiry < now {
            debug!(%expiry, %now, "Signed URL has expired");
            return VerifyOutcome::Expired;
        }

        VerifyOutcome::Ok
    }

    /// Verify an incoming HTTP request carrying a signed URL.
    ///
    /// The method is taken from the request. If the request URI is not
    /// absolute, the URL is rebuilt from `scheme`, the `Host` header and the
    /// path and query; without a `Host` header the request is a `BadRequest`.
    pub fn verify_request(&self, parts: &http::request::Parts, scheme: &str) -> VerifyOutcome {
        let Some(url) = request_url(parts, scheme) else {
            debug!("Request carries no usable host");
            return VerifyOutcome::BadRequest;
        };
        self.verify_with_method(&url, parts.method.as_str())
    }
}

/// Parse a strict RFC 3339 issuance timestamp and add `expires` seconds.
///
/// Windows reaching past the representable calendar saturate to its bounds.
fn expiry_time(date: &str, expires: i64) -> Option<DateTime<Utc>> {
    let issued_at = DateTime::parse_from_rfc3339(date).ok()?.with_timezone(&Utc);
    let saturated = if expires < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };

    Some(
        TimeDelta::try_seconds(expires)
            .and_then(|window| issued_at.checked_add_signed(window))
            .unwrap_or(saturated),
    )
}

fn request_url(parts: &http::request::Parts, scheme: &str) -> Option<String> {
    if parts.uri.scheme().is_some() && parts.uri.authority().is_some() {
        return Some(parts.uri.to_string());
    }

    let host = parts.headers.get(http::header::HOST)?.to_str().ok()?;
    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or("/", http::uri::PathAndQuery::as_str);

    Some(format!("{scheme}://{host}{path_and_query}"))
}
