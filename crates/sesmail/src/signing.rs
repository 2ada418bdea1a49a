//! `AWS3-HTTPS` request signing.
//!
//! The signature is an HMAC-SHA256 over the exact `Date` header value,
//! keyed with the secret key and rendered as base64.

use crate::config::Credentials;
use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Algorithm name carried in the authorization header.
pub const ALGORITHM: &str = "HmacSHA256";

/// Name of the header that carries the signature.
pub const AUTHORIZATION_HEADER: &str = "X-Amzn-Authorization";

/// Computes the base64 HMAC-SHA256 of `timestamp` keyed by `secret_key`.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the MAC rejects the key.
pub fn signature(secret_key: &str, timestamp: &str) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).map_err(|_| Error::InvalidKey)?;
    mac.update(timestamp.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds the `X-Amzn-Authorization` header value for a request whose
/// `Date` header is `timestamp`.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the MAC rejects the key.
pub fn sign(credentials: &Credentials, timestamp: &str) -> Result<String> {
    let signature = signature(credentials.secret_key(), timestamp)?;
    Ok(format!(
        "AWS3-HTTPS AWSAccessKeyId={}, Algorithm={ALGORITHM}, Signature={signature}",
        credentials.access_key()
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TIMESTAMP: &str = "Tue, 05 Mar 2024 09:07:01 +0000";

    #[test]
    fn test_signature_known_vector() {
        // RFC 4231 test case 2
        let sig = signature("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(sig, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");
    }

    #[test]
    fn test_sign_header_format() {
        let credentials = Credentials::new("AKIDEXAMPLE", "secret");
        let header = sign(&credentials, TIMESTAMP).unwrap();

        let expected_sig = signature("secret", TIMESTAMP).unwrap();
        assert_eq!(
            header,
            format!(
                "AWS3-HTTPS AWSAccessKeyId=AKIDEXAMPLE, Algorithm=HmacSHA256, Signature={expected_sig}"
            )
        );
    }

    #[test]
    fn test_sign_deterministic() {
        let credentials = Credentials::new("AKID", "secret");
        assert_eq!(
            sign(&credentials, TIMESTAMP).unwrap(),
            sign(&credentials, TIMESTAMP).unwrap()
        );
    }

    #[test]
    fn test_sign_changes_with_each_input() {
        let base = sign(&Credentials::new("AKID", "secret"), TIMESTAMP).unwrap();

        let other_access = sign(&Credentials::new("AKID2", "secret"), TIMESTAMP).unwrap();
        let other_secret = sign(&Credentials::new("AKID", "secret2"), TIMESTAMP).unwrap();
        let other_time = sign(
            &Credentials::new("AKID", "secret"),
            "Tue, 05 Mar 2024 09:07:02 +0000",
        )
        .unwrap();

        assert_ne!(base, other_access);
        assert_ne!(base, other_secret);
        assert_ne!(base, other_time);
    }

    #[test]
    fn test_empty_secret_is_accepted() {
        assert!(signature("", TIMESTAMP).is_ok());
    }
}
