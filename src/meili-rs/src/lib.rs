//! meili-rs Client Library
//!
//! Typed client for the Meilisearch REST API. Every call goes through one
//! dispatcher ([`Client::execute`] / [`Client::execute_empty`]) that builds
//! the URL, encodes the body, runs the request over a [`Transport`], checks
//! the status against the accepted set and decodes the response.
//! Asynchronous writes return an [`AsyncUpdateId`] that can be awaited with
//! [`Client::wait_for_pending_update`].
//!
//! ```no_run
//! use meili_rs::{Client, ClientConfig, CreateIndexRequest};
//!
//! # async fn run() -> meili_rs::Result<()> {
//! let client = Client::new(ClientConfig::new("http://localhost:7700").with_api_key("masterKey"))?;
//! client.indexes().create(&CreateIndexRequest::new("movies")).await?;
//!
//! let update = client
//!     .documents("movies")
//!     .add_or_replace(&[serde_json::json!({ "id": 1, "title": "Carol" })])
//!     .await?;
//! let status = client.default_wait_for_pending_update("movies", &update).await?;
//! println!("update {} is {}", update.update_id, status);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;
pub mod request;
pub mod resources;
pub mod transport;
mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Client;
pub use error::{ApiError, ErrorKind};
pub use meili_core::config::{ClientConfig, FetchErrorPolicy, WaitConfig};
pub use meili_core::models::*;
pub use request::{Method, Request};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use wait::WaitContext;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(Box<ApiError>),

    #[error("waiting for update {update_id} on index {index_uid} was cancelled")]
    Cancelled { index_uid: String, update_id: i64 },

    #[error("deadline exceeded while waiting for update {update_id} on index {index_uid}")]
    DeadlineExceeded { index_uid: String, update_id: i64 },

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[source] error::BoxError),
}

impl ClientError {
    /// The structured dispatch error, if this is one
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.api().map(|err| err.kind)
    }

    /// True for the errors that end a wait early
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            ClientError::Cancelled { .. } | ClientError::DeadlineExceeded { .. }
        )
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Api(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
