//! Command-line client for the MiningRigRentals API.
//!
//! The library is split the way a request flows through it:
//!
//! - [`config`] validates the base URL and credentials once at startup.
//! - [`auth`] signs each request with an HMAC-SHA1 over key, nonce, and
//!   endpoint path.
//! - [`api_client`] sends the signed request and normalizes the response.
//! - [`shell`] parses input lines into commands and renders results.

pub mod api_client;
pub mod auth;
pub mod config;
pub mod error;
pub mod shell;
pub mod tracing;

pub use error::{Error, Result};
