//! Deterministic digests of credential fields used as lookup keys.
//!
//! Phone numbers and email addresses are never stored in clear. Instead the
//! SHA-256 digest of the raw text is stored and looked up by exact match.
//! The digest is unsalted so the same input always produces the same key,
//! which means it is a blind index only: anyone holding the database can
//! recover a value by hashing candidate phone numbers or emails.

use std::fmt::Display;

use sha2::{Digest, Sha256};

/// The lowercase hex SHA-256 digest of a credential field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialDigest(String);

impl CredentialDigest {
    /// Digest the raw UTF-8 bytes of `value`.
    ///
    /// No trimming or case folding is applied, so `"a@x.com"` and
    /// `"A@x.com"` produce different digests.
    pub fn of(value: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(value.as_bytes())))
    }

    /// Wrap a digest read back from the database.
    ///
    /// The caller should ensure that `raw_digest` was produced by [CredentialDigest::of].
    pub fn new_unchecked(raw_digest: &str) -> Self {
        Self(raw_digest.to_owned())
    }
}

impl AsRef<str> for CredentialDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CredentialDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod credential_digest_tests {
    use super::CredentialDigest;

    #[test]
    fn produces_sha256_hex_digest() {
        let digest = CredentialDigest::of("555");

        assert_eq!(
            digest.as_ref(),
            "91a73fd806ab2c005c13b4dc19130a884e909dea3f72d46e30266fe1a1f588d8"
        );
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(
            CredentialDigest::of("a@x.com"),
            CredentialDigest::of("a@x.com")
        );
    }

    #[test]
    fn does_not_normalize_input() {
        assert_ne!(
            CredentialDigest::of("a@x.com"),
            CredentialDigest::of("A@x.com")
        );
        assert_ne!(CredentialDigest::of("555"), CredentialDigest::of(" 555"));
    }
}
