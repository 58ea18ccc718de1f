//! Instance-wide resources: keys, stats, health and version.

use crate::request::Request;
use crate::{Client, Health, IndexStats, Keys, Result, Stats, Version};

/// API keys of the instance: `/keys`
#[derive(Debug, Clone, Copy)]
pub struct KeysApi<'a> {
    client: &'a Client,
}

impl<'a> KeysApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Keys> {
        self.client
            .execute(Request::get("/keys").accept(&[200]).describe("Keys", "get"))
            .await
    }
}

/// Database and per-index statistics
#[derive(Debug, Clone, Copy)]
pub struct StatsApi<'a> {
    client: &'a Client,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Stats> {
        self.client
            .execute(Request::get("/stats").accept(&[200]).describe("Stats", "get_all"))
            .await
    }

    pub async fn get(&self, index_uid: &str) -> Result<IndexStats> {
        self.client
            .execute(
                Request::get(format!("/indexes/{}/stats", index_uid))
                    .accept(&[200])
                    .describe("Stats", "get"),
            )
            .await
    }
}

/// Server health flag: `/health`
#[derive(Debug, Clone, Copy)]
pub struct HealthApi<'a> {
    client: &'a Client,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Succeeds when the server reports itself healthy (204)
    pub async fn get(&self) -> Result<()> {
        self.client
            .execute_empty(Request::get("/health").accept(&[204]).describe("Health", "get"))
            .await
    }

    pub async fn update(&self, health: bool) -> Result<()> {
        self.client
            .execute_empty(
                Request::put("/health")
                    .body(&Health { health })
                    .accept(&[204])
                    .describe("Health", "update"),
            )
            .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VersionApi<'a> {
    client: &'a Client,
}

impl<'a> VersionApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Version> {
        self.client
            .execute(Request::get("/version").accept(&[200]).describe("Version", "get"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::request::Method;
    use crate::testing::{client_with, MockTransport};
    use crate::ErrorKind;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_keys() {
        let transport = Arc::new(
            MockTransport::new().respond(200, r#"{"public":"pub-key","private":"priv-key"}"#),
        );
        let client = client_with(transport.clone());

        let keys = client.keys().get().await.unwrap();

        assert_eq!(keys.public.as_deref(), Some("pub-key"));
        assert_eq!(keys.private.as_deref(), Some("priv-key"));
        assert_eq!(transport.requests()[0].url.path(), "/keys");
    }

    #[tokio::test]
    async fn test_stats() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(
                    200,
                    r#"{"databaseSize":4096,"lastUpdate":"2021-01-01T00:00:00Z","indexes":{"movies":{"numberOfDocuments":2,"isIndexing":false,"fieldsFrequency":{"id":2}}}}"#,
                )
                .respond(
                    200,
                    r#"{"numberOfDocuments":2,"isIndexing":true,"fieldsDistribution":{"id":2,"title":1}}"#,
                ),
        );
        let client = client_with(transport.clone());

        let stats = client.stats().get_all().await.unwrap();
        assert_eq!(stats.database_size, 4096);
        assert!(stats.last_update.is_some());
        assert_eq!(stats.indexes["movies"].number_of_documents, 2);

        let index = client.stats().get("movies").await.unwrap();
        assert!(index.is_indexing);
        assert_eq!(index.fields_frequency["title"], 1);

        let sent = transport.requests();
        assert_eq!(sent[0].url.path(), "/stats");
        assert_eq!(sent[1].url.path(), "/indexes/movies/stats");
    }

    #[tokio::test]
    async fn test_health() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(204, "")
                .respond(204, "")
                .respond(503, ""),
        );
        let client = client_with(transport.clone());

        client.health().get().await.unwrap();
        client.health().update(false).await.unwrap();
        let err = client.health().get().await.unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::UnexpectedStatusCode));
        assert_eq!(err.api().unwrap().status_code, Some(503));
        let sent = transport.requests();
        assert_eq!(sent[1].method, Method::Put);
        assert_eq!(transport.json_body(1), json!({ "health": false }));
    }

    #[tokio::test]
    async fn test_version() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            r#"{"commitSha":"b46889b5f0f2f8b91438a08a358ba8f05fc09fc1","buildDate":"2021-01-18T10:00:00Z","pkgVersion":"0.19.0"}"#,
        ));
        let client = client_with(transport);

        let version = client.version().get().await.unwrap();

        assert_eq!(version.pkg_version, "0.19.0");
    }
}
