//! Webhook signature verification.
//!
//! Implements constant-time comparison to mitigate timing attacks. The default
//! mode is a direct comparison of the header with the shared secret; the HMAC
//! mode checks a hex HMAC-SHA256 of the raw payload instead.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::SignatureMode;
use crate::errors::AppError;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

type HmacSha256 = Hmac<Sha256>;

/// Read the signature header, treating a missing or non-ASCII value as empty.
pub fn signature_from_headers(headers: &HeaderMap) -> &str {
    headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Verify a webhook delivery.
///
/// A missing secret is a configuration error rather than an auth failure.
pub fn verify_signature(
    mode: SignatureMode,
    secret: Option<&str>,
    payload: &[u8],
    signature: &str,
) -> Result<(), AppError> {
    let secret =
        secret.ok_or_else(|| AppError::Config("STORYBLOK_WEBHOOK_SECRET not configured".into()))?;

    let valid = match mode {
        SignatureMode::Plain => constant_time_compare(signature, secret),
        SignatureMode::HmacSha256 => verify_hmac(secret, payload, signature),
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Unauthorized".into()))
    }
}

/// Hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    // HMAC accepts keys of any length.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

fn verify_hmac(secret: &str, payload: &[u8], signature: &str) -> bool {
    let expected = sign_payload(secret, payload);
    !expected.is_empty() && constant_time_compare(&expected, &signature.trim().to_ascii_lowercase())
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }

    #[test]
    fn test_plain_mode_accepts_secret() {
        assert!(verify_signature(SignatureMode::Plain, Some("s3cret"), b"{}", "s3cret").is_ok());
    }

    #[test]
    fn test_plain_mode_rejects_mismatch() {
        let err = verify_signature(SignatureMode::Plain, Some("s3cret"), b"{}", "guess").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = verify_signature(SignatureMode::Plain, Some("s3cret"), b"{}", "").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let err = verify_signature(SignatureMode::Plain, None, b"{}", "anything").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_hmac_mode() {
        let payload = br#"{"action":"published","story_id":1}"#;
        let signature = sign_payload("s3cret", payload);
        assert_eq!(signature.len(), 64);

        assert!(verify_signature(SignatureMode::HmacSha256, Some("s3cret"), payload, &signature).is_ok());
        assert!(verify_signature(SignatureMode::HmacSha256, Some("other"), payload, &signature).is_err());
        assert!(verify_signature(SignatureMode::HmacSha256, Some("s3cret"), b"tampered", &signature).is_err());
        assert!(verify_signature(SignatureMode::HmacSha256, Some("s3cret"), payload, "s3cret").is_err());
    }

    #[test]
    fn test_signature_header_missing_is_empty() {
        let headers = HeaderMap::new();
        assert_eq!(signature_from_headers(&headers), "");

        let mut headers = HeaderMap::new();
        headers.insert("X-Webhook-Signature", "abc".parse().unwrap());
        assert_eq!(signature_from_headers(&headers), "abc");
    }
}
