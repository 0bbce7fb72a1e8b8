//! Access code verification against a configured SHA-256 fingerprint
//!
//! # Security Features
//!
//! - **Fail closed**: a missing or empty fingerprint aborts before any
//!   comparison is attempted, distinct from an invalid code
//! - **Constant-time compare**: digests are compared with `subtle` so the
//!   comparison does not leak match length through timing
//! - **No plaintext retention**: the code is read once through
//!   `ExposeSecret` for hashing and never copied elsewhere

use crate::core::config_loader::ENV_ACCESS_CODE_HASH;
use crate::core::error::TriggerError;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Verifier holding the expected fingerprint
///
/// The fingerprint is canonicalized to lowercase at construction, so hex
/// casing carries no meaning in the comparison.
pub struct AccessVerifier {
    fingerprint: String,
}

impl AccessVerifier {
    /// Create a verifier from the configured fingerprint
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::ConfigMissing` when the fingerprint is absent
    /// or empty. Verification must not be attempted in that case.
    pub fn new(fingerprint: Option<&str>) -> Result<Self, TriggerError> {
        match fingerprint {
            Some(value) if !value.is_empty() => Ok(Self {
                fingerprint: value.to_ascii_lowercase(),
            }),
            _ => Err(TriggerError::ConfigMissing {
                name: ENV_ACCESS_CODE_HASH.to_string(),
            }),
        }
    }

    /// Verify an access code against the fingerprint
    ///
    /// Computes the SHA-256 digest of the UTF-8 code, renders it as lowercase
    /// hex, and compares in constant time. One comparison per invocation, no
    /// retries.
    pub fn verify(&self, access_code: &SecretString) -> bool {
        let digest = Sha256::digest(access_code.expose_secret().as_bytes());
        let computed = hex::encode(digest);

        computed
            .as_bytes()
            .ct_eq(self.fingerprint.as_bytes())
            .into()
    }
}

// The fingerprint stays out of Debug output.
impl std::fmt::Debug for AccessVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessVerifier")
            .field("fingerprint", &"[REDACTED]")
            .finish()
    }
}
