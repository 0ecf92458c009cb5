//! Signed URL query parameters and the canonical string to sign.
//!
//! The string to sign is simply the serialized URL, including every query
//! parameter in its current order. Both sides therefore have to rewrite the
//! query the same way: every mutation here re-serializes the whole query as
//! `application/x-www-form-urlencoded`, so percent-encoding differences in
//! the original input are normalized before signing and before verifying.

use url::Url;

/// Opaque identity of the signer.
pub const OC_CREDENTIAL: &str = "OC-Credential";
/// ISO-8601 issuance timestamp.
pub const OC_DATE: &str = "OC-Date";
/// Validity duration in seconds.
pub const OC_EXPIRES: &str = "OC-Expires";
/// Upper-cased HTTP method the URL is bound to.
pub const OC_VERB: &str = "OC-Verb";
/// `PBKDF2/<iterations>-<HASH>` descriptor.
pub const OC_ALGO: &str = "OC-Algo";
/// Hex signature tag.
pub const OC_SIGNATURE: &str = "OC-Signature";

/// Build the canonical string to sign for `url`.
///
/// # Examples
///
/// ```
/// use ocsign_auth::canonical::string_to_sign;
///
/// let url = url::Url::parse("http://host/file.txt?a=b").unwrap();
/// assert_eq!(string_to_sign(&url), "http://host/file.txt?a=b");
/// ```
#[must_use]
pub fn string_to_sign(url: &Url) -> String {
    url.as_str().to_owned()
}

/// Return the value of the first query parameter called `name`.
#[must_use]
pub fn get_query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Set query parameter `name` to `value`.
///
/// The first existing pair with that name keeps its position and takes the
/// new value; later duplicates are dropped. If there is no such pair, one is
/// appended at the end.
pub fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let mut pairs = collect_pairs(url);
    let mut replaced = false;

    pairs.retain_mut(|(key, existing)| {
        if key.as_str() != name {
            return true;
        }
        if replaced {
            return false;
        }
        value.clone_into(existing);
        replaced = true;
        true
    });

    if !replaced {
        pairs.push((name.to_owned(), value.to_owned()));
    }

    write_pairs(url, &pairs);
}

/// Remove every query parameter whose name is in `names`.
pub fn remove_query_params(url: &mut Url, names: &[&str]) {
    let mut pairs = collect_pairs(url);
    pairs.retain(|(key, _)| !names.contains(&key.as_str()));
    write_pairs(url, &pairs);
}

fn collect_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Replace the query with `pairs`. An empty list removes the `?` entirely.
fn write_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
        return;
    }

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())));
}
