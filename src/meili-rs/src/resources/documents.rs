use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::request::Request;
use crate::{AsyncUpdateId, Client, ListDocumentsRequest, Result};

const API: &str = "Documents";

/// Document CRUD for one index: `/indexes/{uid}/documents`
///
/// Documents are any serde-serializable type; writes are processed
/// asynchronously by the server and return an [`AsyncUpdateId`].
#[derive(Debug, Clone, Copy)]
pub struct Documents<'a> {
    client: &'a Client,
    index_uid: &'a str,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(client: &'a Client, index_uid: &'a str) -> Self {
        Self { client, index_uid }
    }

    pub fn index_uid(&self) -> &str {
        self.index_uid
    }

    fn path(&self) -> String {
        format!("/indexes/{}/documents", self.index_uid)
    }

    pub async fn get<T: DeserializeOwned>(&self, identifier: &str) -> Result<T> {
        self.client
            .execute(
                Request::get(format!("{}/{}", self.path(), identifier))
                    .accept(&[200])
                    .describe(API, "get"),
            )
            .await
    }

    pub async fn list<T: DeserializeOwned>(&self, request: &ListDocumentsRequest) -> Result<Vec<T>> {
        let mut req = Request::get(self.path()).accept(&[200]).describe(API, "list");
        if request.limit != 0 {
            req = req.query("limit", request.limit.to_string());
        }
        if request.offset != 0 {
            req = req.query("offset", request.offset.to_string());
        }
        if !request.attributes_to_retrieve.is_empty() {
            req = req.query(
                "attributesToRetrieve",
                request.attributes_to_retrieve.join(","),
            );
        }
        self.client.execute(req).await
    }

    /// Add documents, replacing any existing document with the same id
    pub async fn add_or_replace<T: Serialize + Sync>(&self, documents: &[T]) -> Result<AsyncUpdateId> {
        self.write(Request::post(self.path()), documents, None, "add_or_replace")
            .await
    }

    pub async fn add_or_replace_with_primary_key<T: Serialize + Sync>(
        &self,
        documents: &[T],
        primary_key: &str,
    ) -> Result<AsyncUpdateId> {
        self.write(
            Request::post(self.path()),
            documents,
            Some(primary_key),
            "add_or_replace_with_primary_key",
        )
        .await
    }

    /// Add documents, merging fields into any existing document with the same id
    pub async fn add_or_update<T: Serialize + Sync>(&self, documents: &[T]) -> Result<AsyncUpdateId> {
        self.write(Request::put(self.path()), documents, None, "add_or_update")
            .await
    }

    pub async fn add_or_update_with_primary_key<T: Serialize + Sync>(
        &self,
        documents: &[T],
        primary_key: &str,
    ) -> Result<AsyncUpdateId> {
        self.write(
            Request::put(self.path()),
            documents,
            Some(primary_key),
            "add_or_update_with_primary_key",
        )
        .await
    }

    async fn write<'r, T: Serialize + Sync>(
        &self,
        request: Request<'r>,
        documents: &'r [T],
        primary_key: Option<&str>,
        function: &'static str,
    ) -> Result<AsyncUpdateId> {
        let mut request = request.body(documents).accept(&[202]).describe(API, function);
        if let Some(primary_key) = primary_key {
            request = request.query("primaryKey", primary_key);
        }
        self.client.execute(request).await
    }

    pub async fn delete(&self, identifier: &str) -> Result<AsyncUpdateId> {
        self.client
            .execute(
                Request::delete(format!("{}/{}", self.path(), identifier))
                    .accept(&[202])
                    .describe(API, "delete"),
            )
            .await
    }

    /// Delete several documents by id in one update
    pub async fn delete_batch<I: Serialize + Sync>(&self, identifiers: &[I]) -> Result<AsyncUpdateId> {
        self.client
            .execute(
                Request::post(format!("{}/delete-batch", self.path()))
                    .body(identifiers)
                    .accept(&[202])
                    .describe(API, "delete_batch"),
            )
            .await
    }

    pub async fn delete_all(&self) -> Result<AsyncUpdateId> {
        self.client
            .execute(
                Request::delete(self.path())
                    .accept(&[202])
                    .describe(API, "delete_all"),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::request::Method;
    use crate::testing::{client_with, MockTransport};
    use crate::ListDocumentsRequest;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Movie {
        id: u32,
        title: String,
    }

    const UPDATE: &str = r#"{"updateId":3}"#;

    #[tokio::test]
    async fn test_get_document() {
        let transport = Arc::new(MockTransport::new().respond(200, r#"{"id":1,"title":"Carol"}"#));
        let client = client_with(transport.clone());

        let movie: Movie = client.documents("movies").get("1").await.unwrap();

        assert_eq!(movie, Movie { id: 1, title: "Carol".to_string() });
        assert_eq!(transport.requests()[0].url.path(), "/indexes/movies/documents/1");
    }

    #[tokio::test]
    async fn test_list_documents_query() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(200, r#"[{"id":1,"title":"Carol"}]"#)
                .respond(200, "[]"),
        );
        let client = client_with(transport.clone());

        let request = ListDocumentsRequest {
            offset: 10,
            limit: 5,
            attributes_to_retrieve: vec!["id".to_string(), "title".to_string()],
        };
        let movies: Vec<Movie> = client.documents("movies").list(&request).await.unwrap();
        assert_eq!(movies.len(), 1);

        let _: Vec<Movie> = client
            .documents("movies")
            .list(&ListDocumentsRequest::default())
            .await
            .unwrap();

        let sent = transport.requests();
        assert_eq!(
            sent[0].url.query(),
            Some("attributesToRetrieve=id%2Ctitle&limit=5&offset=10")
        );
        assert!(sent[0].body.is_none());
        assert_eq!(sent[1].url.query(), None);
    }

    #[tokio::test]
    async fn test_add_or_replace_and_update() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(202, UPDATE)
                .respond(202, UPDATE)
                .respond(202, UPDATE),
        );
        let client = client_with(transport.clone());
        let docs = [Movie { id: 1, title: "Carol".to_string() }];

        let update = client.documents("movies").add_or_replace(&docs).await.unwrap();
        assert_eq!(update.update_id, 3);
        client
            .documents("movies")
            .add_or_update_with_primary_key(&docs, "id")
            .await
            .unwrap();
        client
            .documents("movies")
            .add_or_replace_with_primary_key(&docs, "id")
            .await
            .unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(transport.json_body(0), json!([{ "id": 1, "title": "Carol" }]));
        assert_eq!(sent[0].url.query(), None);
        assert_eq!(sent[1].method, Method::Put);
        assert_eq!(sent[1].url.query(), Some("primaryKey=id"));
        assert_eq!(sent[2].method, Method::Post);
        assert_eq!(sent[2].url.query(), Some("primaryKey=id"));
    }

    #[tokio::test]
    async fn test_deletes() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(202, UPDATE)
                .respond(202, UPDATE)
                .respond(202, UPDATE),
        );
        let client = client_with(transport.clone());
        let documents = client.documents("movies");

        documents.delete("1").await.unwrap();
        documents.delete_batch(&["1", "2"]).await.unwrap();
        documents.delete_all().await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].url.path(), "/indexes/movies/documents/1");
        assert_eq!(sent[1].url.path(), "/indexes/movies/documents/delete-batch");
        assert_eq!(transport.json_body(1), json!(["1", "2"]));
        assert_eq!(sent[2].method, Method::Delete);
        assert_eq!(sent[2].url.path(), "/indexes/movies/documents");
    }

    #[tokio::test]
    async fn test_write_rejects_ok_status() {
        let transport = Arc::new(MockTransport::new().respond(200, UPDATE));
        let client = client_with(transport);

        let err = client
            .documents("movies")
            .add_or_replace(&[json!({ "id": 1 })])
            .await
            .unwrap_err();

        assert_eq!(err.api().unwrap().expected_status_codes, vec![202]);
    }
}
