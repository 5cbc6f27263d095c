//! HMAC-SHA1 request signing.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::credentials::Credentials;
use super::nonce::NonceGenerator;

type HmacSha1 = Hmac<Sha1>;

pub const HEADER_SIGN: &str = "x-api-sign";
pub const HEADER_KEY: &str = "x-api-key";
pub const HEADER_NONCE: &str = "x-api-nonce";

/// Authentication headers for exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Lowercase hex HMAC-SHA1 digest
    pub signature: String,
    pub key: String,
    /// Unix milliseconds, base 10
    pub nonce: String,
}

impl AuthHeaders {
    /// Header name/value pairs in the order the API documents them.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_SIGN, self.signature.as_str()),
            (HEADER_KEY, self.key.as_str()),
            (HEADER_NONCE, self.nonce.as_str()),
        ]
    }
}

/// Request signer holding the process credentials and nonce state.
#[derive(Debug)]
pub struct Signer {
    credentials: Credentials,
    nonces: NonceGenerator,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            nonces: NonceGenerator::new(),
        }
    }

    /// Sign a request to `endpoint` with a fresh nonce.
    ///
    /// `endpoint` must be the path only, e.g. `/info/algos`, without any
    /// query string.
    pub fn sign(&self, endpoint: &str) -> AuthHeaders {
        self.sign_with_nonce(endpoint, self.nonces.next())
    }

    /// Sign a request to `endpoint` with an explicit nonce.
    ///
    /// Deterministic: the same credentials, endpoint, and nonce always
    /// produce the same headers.
    pub fn sign_with_nonce(&self, endpoint: &str, nonce: u64) -> AuthHeaders {
        let key = self.credentials.api_key();
        let nonce = nonce.to_string();
        let message = format!("{key}{nonce}{endpoint}");

        AuthHeaders {
            signature: hmac_sha1_hex(self.credentials.secret_bytes(), message.as_bytes()),
            key: key.to_string(),
            nonce,
        }
    }
}

/// Lowercase hex HMAC-SHA1 of `message` keyed with `secret`.
fn hmac_sha1_hex(secret: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
