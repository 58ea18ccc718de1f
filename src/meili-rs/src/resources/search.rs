use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::request::Request;
use crate::{Client, Result, SearchRequest, SearchResponse};

const API: &str = "Search";
const DEFAULT_LIMIT: u64 = 20;

/// Body of `POST /indexes/{uid}/search`. Options left at their default are
/// omitted so the server applies its own defaults.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery<'r> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes_to_retrieve: Option<&'r [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes_to_crop: Option<&'r [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crop_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes_to_highlight: Option<&'r [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facets_distribution: Option<&'r [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facet_filters: Option<&'r serde_json::Value>,
}

fn non_empty(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}

fn non_zero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

impl<'r> From<&'r SearchRequest> for SearchQuery<'r> {
    fn from(request: &'r SearchRequest) -> Self {
        let limit = if request.limit == 0 {
            DEFAULT_LIMIT
        } else {
            request.limit
        };

        SearchQuery {
            q: (!request.placeholder_search).then_some(request.query.as_str()),
            offset: non_zero(request.offset),
            limit: (limit != DEFAULT_LIMIT).then_some(limit),
            attributes_to_retrieve: non_empty(&request.attributes_to_retrieve),
            attributes_to_crop: non_empty(&request.attributes_to_crop),
            crop_length: non_zero(request.crop_length),
            attributes_to_highlight: non_empty(&request.attributes_to_highlight),
            filters: (!request.filters.is_empty()).then_some(request.filters.as_str()),
            matches: request.matches.then_some(true),
            facets_distribution: non_empty(&request.facets_distribution),
            facet_filters: request.facet_filters.as_ref(),
        }
    }
}

/// Search in one index: `/indexes/{uid}/search`
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    client: &'a Client,
    index_uid: &'a str,
}

impl<'a> Search<'a> {
    pub(crate) fn new(client: &'a Client, index_uid: &'a str) -> Self {
        Self { client, index_uid }
    }

    pub fn index_uid(&self) -> &str {
        self.index_uid
    }

    /// Run a search; hits are decoded into `T` (use `serde_json::Value` for
    /// untyped hits)
    pub async fn search<T: DeserializeOwned>(&self, request: &SearchRequest) -> Result<SearchResponse<T>> {
        let query = SearchQuery::from(request);
        self.client
            .execute(
                Request::post(format!("/indexes/{}/search", self.index_uid))
                    .body(&query)
                    .accept(&[200])
                    .describe(API, "search"),
            )
            .await
    }
}
