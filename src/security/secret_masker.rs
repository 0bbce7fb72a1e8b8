//! Redaction of configured secrets from echoed output
//!
//! The captured stdout/stderr of the dispatched command is echoed back to the
//! operator verbatim. Before printing, any occurrence of a registered secret
//! (access code, API key) is replaced so diagnostics can never carry a
//! plaintext credential.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

/// Replacement written over each matched secret
const MASK: &str = "****";

/// Masks registered secrets in arbitrary text
#[derive(Default)]
pub struct SecretMasker {
    patterns: Vec<Regex>,
}

impl SecretMasker {
    /// Create an empty masker
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a secret to be masked
    ///
    /// Empty secrets are ignored.
    pub fn add_secret(&mut self, secret: &SecretString) {
        let exposed = secret.expose_secret();
        if exposed.is_empty() {
            return;
        }
        if let Ok(pattern) = Regex::new(&regex::escape(exposed)) {
            self.patterns.push(pattern);
        }
    }

    /// Replace every occurrence of every registered secret
    pub fn redact(&self, text: &str) -> String {
        let mut masked = text.to_string();

        for pattern in &self.patterns {
            masked = pattern.replace_all(&masked, MASK).to_string();
        }

        masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_without_secrets_is_identity() {
        let masker = SecretMasker::new();
        let input = "workflow run queued";
        assert_eq!(masker.redact(input), input);
    }

    #[test]
    fn test_redact_masks_registered_secret() {
        let mut masker = SecretMasker::new();
        masker.add_secret(&SecretString::new("s3cr3t-code".into()));

        let output = masker.redact("refused access for s3cr3t-code (retry later)");
        assert!(!output.contains("s3cr3t-code"));
        assert!(output.contains("****"));
    }

    #[test]
    fn test_redact_masks_every_occurrence() {
        let mut masker = SecretMasker::new();
        masker.add_secret(&SecretString::new("abc123".into()));

        let output = masker.redact("abc123 abc123 abc123");
        assert_eq!(output, "**** **** ****");
    }

    #[test]
    fn test_redact_handles_regex_metacharacters() {
        let mut masker = SecretMasker::new();
        masker.add_secret(&SecretString::new("a.b+c(d)".into()));

        assert_eq!(masker.redact("token a.b+c(d) rejected"), "token **** rejected");
        // The dot must not match arbitrary characters
        assert_eq!(masker.redact("aXb+c(d)"), "aXb+c(d)");
    }

    #[test]
    fn test_empty_secret_is_ignored() {
        let mut masker = SecretMasker::new();
        masker.add_secret(&SecretString::new("".into()));

        assert_eq!(masker.redact("untouched"), "untouched");
    }
}
