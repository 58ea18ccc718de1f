//! Structured errors produced by the dispatcher.

use std::fmt;

use meili_core::ServerError;

use crate::request::Method;

/// Boxed lower-level cause attached to an [`ApiError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub(crate) const EMPTY_REQUEST: &str = "empty request";
pub(crate) const EMPTY_RESPONSE: &str = "empty response";

/// Stage of a call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Host and endpoint do not form a valid URL; nothing was sent
    UrlConstruction,
    /// The payload could not be encoded; nothing was sent
    RequestSerialization,
    /// The transport failed (connection, timeout, DNS...)
    TransportExecution,
    /// The status code is outside the accepted set
    UnexpectedStatusCode,
    /// The body could not be decoded into the response type
    ResponseDeserialization,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UrlConstruction => "unable to build request url",
            ErrorKind::RequestSerialization => "unable to serialize request body",
            ErrorKind::TransportExecution => "request execution failed",
            ErrorKind::UnexpectedStatusCode => "unexpected response status code",
            ErrorKind::ResponseDeserialization => "unable to deserialize response body",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call, with enough context to reproduce it.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub endpoint: String,
    pub method: Method,
    pub function: &'static str,
    pub api_name: &'static str,
    /// Observed status, absent when no response was received
    pub status_code: Option<u16>,
    pub expected_status_codes: Vec<u16>,
    /// Encoded request body, or `"empty request"`
    pub request: String,
    /// Raw response body, or `"empty response"`
    pub response: String,
    /// Message extracted from the server's error body, if any
    pub server_message: Option<String>,
    pub server_code: Option<String>,
    source: Option<BoxError>,
}

impl ApiError {
    pub(crate) fn new(
        kind: ErrorKind,
        endpoint: impl Into<String>,
        method: Method,
        function: &'static str,
        api_name: &'static str,
        expected_status_codes: Vec<u16>,
    ) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            method,
            function,
            api_name,
            status_code: None,
            expected_status_codes,
            request: EMPTY_REQUEST.to_string(),
            response: EMPTY_RESPONSE.to_string(),
            server_message: None,
            server_code: None,
            source: None,
        }
    }

    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Records the raw response body and pulls the server's error message out of it.
    pub(crate) fn with_error_body(mut self, body: &[u8]) -> Self {
        self.response = body_snapshot(body, EMPTY_RESPONSE);
        if let Some(server) = parse_server_error(body) {
            self.server_message = server.message;
            self.server_code = server.error_code;
        }
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}.{} {} {}",
            self.kind, self.api_name, self.function, self.method, self.endpoint
        )?;
        if let Some(status) = self.status_code {
            write!(f, " (status {}, expected {:?})", status, self.expected_status_codes)?;
        }
        if let Some(message) = &self.server_message {
            write!(f, ": {}", message)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        write!(f, " [request: {}] [response: {}]", self.request, self.response)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

pub(crate) fn body_snapshot(body: &[u8], empty: &str) -> String {
    if body.is_empty() {
        empty.to_string()
    } else {
        String::from_utf8_lossy(body).into_owned()
    }
}

/// Tolerant parse of the server error body; anything unexpected yields `None`.
pub(crate) fn parse_server_error(body: &[u8]) -> Option<ServerError> {
    let server: ServerError = serde_json::from_slice(body).ok()?;
    if server.message.is_none() && server.error_code.is_none() {
        return None;
    }
    Some(server)
}
