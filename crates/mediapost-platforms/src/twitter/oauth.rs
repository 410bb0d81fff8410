//! OAuth 1.0a request signing (HMAC-SHA1) for the Twitter API.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use mediapost_types::{PublishError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is; everything else is encoded.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The four-part key tuple of a user-context OAuth 1.0a app.
#[derive(Clone, Copy)]
pub struct OAuthKeys<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

/// Percent-encode per RFC 3986, as OAuth 1.0a requires.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE).to_string()
}

/// Build an `Authorization` header for `method url` with a fresh nonce and
/// timestamp.
///
/// `params` are the query or form parameters that take part in the
/// signature. JSON bodies do not.
pub fn authorization_header(
    method: &str,
    url: &str,
    keys: OAuthKeys<'_>,
    params: &[(&str, &str)],
) -> Result<String> {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    signed_header(method, url, keys, params, &nonce, &timestamp)
}

/// Deterministic core of [`authorization_header`].
pub fn signed_header(
    method: &str,
    url: &str,
    keys: OAuthKeys<'_>,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let mut oauth_params = vec![
        ("oauth_consumer_key", keys.consumer_key),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", keys.token),
        ("oauth_version", "1.0"),
    ];

    let mut signed: Vec<(String, String)> = oauth_params
        .iter()
        .chain(params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    signed.sort();
    let param_string = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    );
    let signing_key = format!(
        "{}&{}",
        percent_encode(keys.consumer_secret),
        percent_encode(keys.token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .map_err(|e| PublishError::Internal(format!("oauth signing key: {e}")))?;
    mac.update(base_string.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    oauth_params.push(("oauth_signature", signature.as_str()));
    oauth_params.sort_by(|a, b| a.0.cmp(b.0));
    let header = oauth_params
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {header}"))
}
