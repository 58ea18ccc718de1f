use crate::request::Request;
use crate::{Client, Result, Update};

const API: &str = "Updates";

/// Asynchronous update records of one index: `/indexes/{uid}/updates`
#[derive(Debug, Clone, Copy)]
pub struct Updates<'a> {
    client: &'a Client,
    index_uid: &'a str,
}

impl<'a> Updates<'a> {
    pub(crate) fn new(client: &'a Client, index_uid: &'a str) -> Self {
        Self { client, index_uid }
    }

    pub fn index_uid(&self) -> &str {
        self.index_uid
    }

    pub async fn get(&self, update_id: i64) -> Result<Update> {
        self.client
            .execute(
                Request::get(format!("/indexes/{}/updates/{}", self.index_uid, update_id))
                    .accept(&[200])
                    .describe(API, "get"),
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<Update>> {
        self.client
            .execute(
                Request::get(format!("/indexes/{}/updates", self.index_uid))
                    .accept(&[200])
                    .describe(API, "list"),
            )
            .await
    }
}
