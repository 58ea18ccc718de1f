use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{body_snapshot, ApiError, ErrorKind, EMPTY_REQUEST};
use crate::request::Request;
use crate::resources::{
    Documents, HealthApi, Indexes, KeysApi, Search, SettingsApi, StatsApi, Updates, VersionApi,
};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::{ClientConfig, ClientError, Result};

const CONTENT_TYPE: &str = "Content-Type";
const JSON_MEDIA_TYPE: &str = "application/json";
const API_KEY_HEADER: &str = "X-Meili-API-Key";

/// Meilisearch REST API Client
///
/// Cheap to clone; clones share the transport and configuration.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.config.host)
            .field("api_key", &(!self.config.api_key.is_empty()))
            .finish()
    }
}

impl Client {
    /// Create a client using the reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport =
            ReqwestTransport::new(config.request_timeout()).map_err(ClientError::Transport)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn indexes(&self) -> Indexes<'_> {
        Indexes::new(self)
    }

    pub fn documents<'a>(&'a self, index_uid: &'a str) -> Documents<'a> {
        Documents::new(self, index_uid)
    }

    pub fn search<'a>(&'a self, index_uid: &'a str) -> Search<'a> {
        Search::new(self, index_uid)
    }

    pub fn settings<'a>(&'a self, index_uid: &'a str) -> SettingsApi<'a> {
        SettingsApi::new(self, index_uid)
    }

    pub fn updates<'a>(&'a self, index_uid: &'a str) -> Updates<'a> {
        Updates::new(self, index_uid)
    }

    pub fn keys(&self) -> KeysApi<'_> {
        KeysApi::new(self)
    }

    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    pub fn version(&self) -> VersionApi<'_> {
        VersionApi::new(self)
    }

    /// Run `request` and decode the response body into `R`.
    pub async fn execute<B, R>(&self, request: Request<'_, B>) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let (response, request_snapshot) = self.round_trip(&request).await?;

        match serde_json::from_slice::<R>(&response.body) {
            Ok(decoded) => {
                trace!(
                    api = request.api_name(),
                    function = request.function(),
                    "Response decoded"
                );
                Ok(decoded)
            }
            Err(e) => {
                warn!(
                    api = request.api_name(),
                    function = request.function(),
                    error = %e,
                    "Failed to decode response body"
                );
                let mut err = api_error(&request, ErrorKind::ResponseDeserialization)
                    .with_source(e);
                err.status_code = Some(response.status);
                err.request = request_snapshot;
                err.response = body_snapshot(&response.body, crate::error::EMPTY_RESPONSE);
                Err(err.into())
            }
        }
    }

    /// Run `request` without looking at the response body.
    pub async fn execute_empty<B>(&self, request: Request<'_, B>) -> Result<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.round_trip(&request).await?;
        Ok(())
    }

    /// Everything up to and including status classification.
    /// Returns the response and the request body snapshot.
    #[tracing::instrument(
        name = "dispatch",
        skip_all,
        fields(
            api = request.api_name(),
            function = request.function(),
            method = %request.method(),
            endpoint = request.endpoint(),
        )
    )]
    async fn round_trip<B>(&self, request: &Request<'_, B>) -> Result<(HttpResponse, String)>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self
            .build_url(request)
            .map_err(|e| api_error(request, ErrorKind::UrlConstruction).with_source(e))?;

        let mut headers = Vec::new();
        let mut body = None;
        let mut request_snapshot = EMPTY_REQUEST.to_string();

        if let Some(payload) = request.payload() {
            let bytes = serde_json::to_vec(payload).map_err(|e| {
                warn!(error = %e, "Failed to serialize request body");
                api_error(request, ErrorKind::RequestSerialization).with_source(e)
            })?;
            request_snapshot = body_snapshot(&bytes, EMPTY_REQUEST);
            headers.push((CONTENT_TYPE.to_string(), JSON_MEDIA_TYPE.to_string()));
            body = Some(bytes);
        }

        if !self.config.api_key.is_empty() {
            headers.push((API_KEY_HEADER.to_string(), self.config.api_key.clone()));
        }

        debug!(url = %url, "Sending request");

        let response = self
            .transport
            .execute(HttpRequest {
                method: request.method(),
                url,
                headers,
                body,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Request execution failed");
                let mut err = api_error(request, ErrorKind::TransportExecution).with_source(e);
                err.request = request_snapshot.clone();
                err
            })?;

        debug!(
            status = response.status,
            bytes = response.body.len(),
            "Response received"
        );

        if !request.accepts(response.status) {
            warn!(
                status = response.status,
                expected = ?request.accepted_status_codes(),
                "Unexpected status code"
            );
            let mut err = api_error(request, ErrorKind::UnexpectedStatusCode)
                .with_error_body(&response.body);
            err.status_code = Some(response.status);
            err.request = request_snapshot;
            return Err(err.into());
        }

        Ok((response, request_snapshot))
    }

    /// Joins host and endpoint, then merges the descriptor's query parameters
    /// over any already present in the endpoint.
    fn build_url<B: ?Sized>(&self, request: &Request<'_, B>) -> std::result::Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}{}",
            self.config.host.trim_end_matches('/'),
            request.endpoint()
        ))?;

        if !request.query_params().is_empty() {
            let mut merged: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
            for (key, value) in request.query_params() {
                merged.insert(key.clone(), value.clone());
            }
            url.query_pairs_mut().clear().extend_pairs(merged.iter());
        }

        Ok(url)
    }
}

fn api_error<B: ?Sized>(request: &Request<'_, B>, kind: ErrorKind) -> ApiError {
    ApiError::new(
        kind,
        request.endpoint(),
        request.method(),
        request.function(),
        request.api_name(),
        request.accepted_status_codes().to_vec(),
    )
}
