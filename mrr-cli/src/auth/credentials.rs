//! API key and secret.
//!
//! The secret is wrapped in `SecretString`, which keeps it out of Debug
//! output and zeroes its memory on drop.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// API credentials for signed requests.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from explicit values.
    ///
    /// # Errors
    /// Returns `Error::Config` if either value is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(Error::Config("API key is empty".into()));
        }
        if api_secret.is_empty() {
            return Err(Error::Config("API secret is empty".into()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// The API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret as key material for the HMAC.
    ///
    /// Never log or display the return value.
    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.api_secret.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("my_api_key", "my_secret").unwrap();
        assert_eq!(creds.api_key(), "my_api_key");
        assert_eq!(creds.secret_bytes(), b"my_secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("my_api_key", "super_secret_key").unwrap();
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test_case("", "secret" ; "empty key")]
    #[test_case("   ", "secret" ; "blank key")]
    #[test_case("key", "" ; "empty secret")]
    fn test_rejects_missing_material(key: &str, secret: &str) {
        let err = Credentials::new(key, secret).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
