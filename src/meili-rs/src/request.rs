//! Request descriptors: one value per API call.

use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Describes one API call: where it goes, what it sends, which statuses count
/// as success, and the labels used in error reports.
///
/// The payload is borrowed; `B` defaults to `()` for calls without a body.
///
/// ```
/// use meili_rs::request::{Method, Request};
///
/// let request = Request::new(Method::Get, "/indexes/movies/documents")
///     .query("limit", "10")
///     .accept(&[200])
///     .describe("Documents", "list");
/// assert_eq!(request.accepted_status_codes(), &[200]);
/// ```
#[derive(Debug)]
pub struct Request<'a, B: ?Sized = ()> {
    endpoint: String,
    method: Method,
    body: Option<&'a B>,
    query: BTreeMap<String, String>,
    accepted_status_codes: Vec<u16>,
    function: &'static str,
    api_name: &'static str,
}

impl<'a> Request<'a> {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            query: BTreeMap::new(),
            accepted_status_codes: Vec::new(),
            function: "",
            api_name: "",
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }
}

impl<'a, B: ?Sized> Request<'a, B> {
    /// Attach a JSON payload
    pub fn body<T: ?Sized>(self, body: &'a T) -> Request<'a, T> {
        Request {
            endpoint: self.endpoint,
            method: self.method,
            body: Some(body),
            query: self.query,
            accepted_status_codes: self.accepted_status_codes,
            function: self.function,
            api_name: self.api_name,
        }
    }

    /// Set a query parameter; a later call with the same key replaces the value
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Statuses treated as success. An empty set accepts every status.
    pub fn accept(mut self, codes: &[u16]) -> Self {
        self.accepted_status_codes = codes.to_vec();
        self
    }

    /// Labels reported in errors and logs
    pub fn describe(mut self, api_name: &'static str, function: &'static str) -> Self {
        self.api_name = api_name;
        self.function = function;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn payload(&self) -> Option<&'a B> {
        self.body
    }

    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn accepted_status_codes(&self) -> &[u16] {
        &self.accepted_status_codes
    }

    pub fn function(&self) -> &'static str {
        self.function
    }

    pub fn api_name(&self) -> &'static str {
        self.api_name
    }

    /// Whether `status` counts as success for this call
    pub fn accepts(&self, status: u16) -> bool {
        self.accepted_status_codes.is_empty() || self.accepted_status_codes.contains(&status)
    }
}
