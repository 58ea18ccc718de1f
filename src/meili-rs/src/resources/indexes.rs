use serde::Serialize;

use crate::request::Request;
use crate::{Client, CreateIndexRequest, CreateIndexResponse, Index, Result};

const API: &str = "Indexes";

#[derive(Serialize)]
struct Name<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryKey<'a> {
    primary_key: &'a str,
}

/// Index management: `/indexes`
#[derive(Debug, Clone, Copy)]
pub struct Indexes<'a> {
    client: &'a Client,
}

impl<'a> Indexes<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, uid: &str) -> Result<Index> {
        self.client
            .execute(
                Request::get(format!("/indexes/{}", uid))
                    .accept(&[200])
                    .describe(API, "get"),
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<Index>> {
        self.client
            .execute(Request::get("/indexes").accept(&[200]).describe(API, "list"))
            .await
    }

    pub async fn create(&self, request: &CreateIndexRequest) -> Result<CreateIndexResponse> {
        self.client
            .execute(
                Request::post("/indexes")
                    .body(request)
                    .accept(&[201])
                    .describe(API, "create"),
            )
            .await
    }

    pub async fn update_name(&self, uid: &str, name: &str) -> Result<Index> {
        self.client
            .execute(
                Request::put(format!("/indexes/{}", uid))
                    .body(&Name { name })
                    .accept(&[200])
                    .describe(API, "update_name"),
            )
            .await
    }

    pub async fn update_primary_key(&self, uid: &str, primary_key: &str) -> Result<Index> {
        self.client
            .execute(
                Request::put(format!("/indexes/{}", uid))
                    .body(&PrimaryKey { primary_key })
                    .accept(&[200])
                    .describe(API, "update_primary_key"),
            )
            .await
    }

    /// Delete the index; the server answers 204 with no body
    pub async fn delete(&self, uid: &str) -> Result<()> {
        self.client
            .execute_empty(
                Request::delete(format!("/indexes/{}", uid))
                    .accept(&[204])
                    .describe(API, "delete"),
            )
            .await
    }
}
