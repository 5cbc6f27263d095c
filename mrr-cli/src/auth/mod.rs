//! Request authentication for the MRR API.
//!
//! Every request carries three headers:
//!
//! - `x-api-key`: the public API key
//! - `x-api-nonce`: Unix time in milliseconds, as a decimal string
//! - `x-api-sign`: lowercase hex HMAC-SHA1 of `key || nonce || endpoint`,
//!   keyed with the API secret
//!
//! The endpoint is the URL path only. Query parameters are never part of
//! the signed message.
//!
//! # Example
//!
//! ```rust
//! use mrr_cli::auth::{Credentials, Signer};
//!
//! let credentials = Credentials::new("key", "secret").unwrap();
//! let signer = Signer::new(credentials);
//! let headers = signer.sign_with_nonce("/whoami", 1_700_000_000_000);
//! assert_eq!(headers.nonce, "1700000000000");
//! ```

mod credentials;
mod nonce;
mod signer;

pub use credentials::Credentials;
pub use nonce::NonceGenerator;
pub use signer::{AuthHeaders, Signer, HEADER_KEY, HEADER_NONCE, HEADER_SIGN};
