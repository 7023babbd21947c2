use std::fmt;

use sha2::{Digest, Sha256};

use crate::app::{LensError, Result};

/// Bearer token authorizing requests on behalf of one user.
///
/// The secret never shows up in `Debug`/`Display` output. Caches key on
/// [`Credential::fingerprint`] instead of the raw value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
    fingerprint: String,
}

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into().trim().to_string();
        if secret.is_empty() {
            return Err(LensError::MissingCredential);
        }
        let fingerprint = Self::generate_fingerprint(&secret);
        Ok(Self {
            secret,
            fingerprint,
        })
    }

    /// Hex SHA-256 of the secret
    pub fn generate_fingerprint(secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.fingerprint[..8];
        f.debug_struct("Credential")
            .field("fingerprint", &short)
            .finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", &self.fingerprint[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Credential::new("secret-token").unwrap();
        let b = Credential::new("secret-token").unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_differs_per_secret() {
        let a = Credential::new("token-a").unwrap();
        let b = Credential::new("token-b").unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_blank_secret_rejected() {
        assert!(matches!(
            Credential::new("   "),
            Err(LensError::MissingCredential)
        ));
    }

    #[test]
    fn test_secret_not_leaked_in_debug() {
        let cred = Credential::new("super-secret").unwrap();
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("super-secret"));
        assert_eq!(
            debug,
            format!("Credential {{ fingerprint: {:?} }}", &cred.fingerprint()[..8])
        );
        assert!(!cred.to_string().contains("super-secret"));
        assert_eq!(cred.bearer(), "Bearer super-secret");
    }
}
