//! Request types shared by the dispatcher and the endpoint wrappers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// HTTP methods used by the MRR API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Query parameters for GET requests. Ordered so URLs are reproducible.
pub type Query = BTreeMap<String, String>;

/// One API call, before signing.
///
/// `endpoint` is the path below the base URL and is exactly what gets
/// signed. Query parameters live apart from it and are never signed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub query: Option<Query>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            endpoint: endpoint.into(),
            query: None,
            body: None,
        }
    }

    pub fn get_with_query(endpoint: impl Into<String>, query: Query) -> Self {
        Self {
            query: Some(query),
            ..Self::get(endpoint)
        }
    }

    pub fn put(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            endpoint: endpoint.into(),
            query: None,
            body: Some(body),
        }
    }

    /// DELETE without a body.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            endpoint: endpoint.into(),
            query: None,
            body: None,
        }
    }
}

static SINGLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid regex"));
static ID_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+(;[A-Za-z0-9._-]+)*$").expect("valid regex")
});

/// A value substituted into an endpoint path.
///
/// Restricted to `[A-Za-z0-9._-]`, plus `;` separators for lists, so that
/// user input can never add path segments or a query string to the signed
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam(String);

impl PathParam {
    /// A single identifier, e.g. an algo name or profile ID.
    pub fn single(value: &str) -> Option<Self> {
        SINGLE_ID.is_match(value).then(|| Self(value.to_string()))
    }

    /// One or more identifiers joined by `;`, e.g. `1234;5678`.
    pub fn list(value: &str) -> Option<Self> {
        ID_LIST.is_match(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PathParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body for assigning a pool profile to rentals.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileAssignment<'a> {
    pub profile_id: &'a str,
}

/// Body for messaging rental owners.
#[derive(Debug, Clone, Serialize)]
pub struct RentalMessage<'a> {
    pub message: &'a str,
}
