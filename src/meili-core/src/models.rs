use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Index represents an index as reported by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// CreateIndexRequest is the body sent when creating an index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

impl CreateIndexRequest {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }
}

/// CreateIndexResponse is returned by the server after an index is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexResponse {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Synonyms maps a word to the list of words treated as equivalent
pub type Synonyms = BTreeMap<String, Vec<String>>;

/// Settings holds every index setting; unset fields are left untouched on update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Synonyms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_for_faceting: Option<Vec<String>>,
}

/// Version describes the server build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub commit_sha: String,
    pub build_date: DateTime<Utc>,
    pub pkg_version: String,
}

/// IndexStats describes the content of one index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub number_of_documents: i64,
    pub is_indexing: bool,
    #[serde(default, alias = "fieldsDistribution")]
    pub fields_frequency: HashMap<String, i64>,
}

/// Stats describes the whole database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(alias = "database_size")]
    pub database_size: i64,
    #[serde(default, alias = "last_update")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub indexes: HashMap<String, IndexStats>,
}

/// UpdateStatus is the lifecycle state of an asynchronous update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    /// Accepted by the server but not handled yet
    Enqueued,
    /// Handled successfully
    Processed,
    /// Handled, and the server reported an error
    Failed,
    /// Not reported by the server; also used when the status could not be read
    #[default]
    #[serde(other)]
    Unknown,
}

impl UpdateStatus {
    /// Any status other than `Enqueued` ends a wait
    pub fn is_terminal(self) -> bool {
        !matches!(self, UpdateStatus::Enqueued)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateStatus::Unknown => "unknown",
            UpdateStatus::Enqueued => "enqueued",
            UpdateStatus::Processed => "processed",
            UpdateStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Update is the server-side record of an asynchronous write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    #[serde(default)]
    pub status: UpdateStatus,
    #[serde(alias = "updateID")]
    pub update_id: i64,
    #[serde(rename = "type", default)]
    pub update_type: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enqueued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

/// AsyncUpdateId is returned by every write the server processes asynchronously
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncUpdateId {
    #[serde(alias = "updateID")]
    pub update_id: i64,
}

impl AsyncUpdateId {
    pub fn new(update_id: i64) -> Self {
        Self { update_id }
    }
}

/// Keys holds the public and private API keys of the instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
}

/// Health is the body used to toggle the server health flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub health: bool,
}

/// SearchRequest describes a search; encoded into the wire query by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub offset: u64,
    /// Zero means the server default of 20
    pub limit: u64,
    pub attributes_to_retrieve: Vec<String>,
    pub attributes_to_crop: Vec<String>,
    pub crop_length: u64,
    pub attributes_to_highlight: Vec<String>,
    pub filters: String,
    pub matches: bool,
    pub facets_distribution: Vec<String>,
    pub facet_filters: Option<serde_json::Value>,
    /// Ignore `query` and return documents in their default order
    pub placeholder_search: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn placeholder() -> Self {
        Self {
            placeholder_search: true,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = filters.into();
        self
    }

    pub fn with_facet_filters(mut self, facet_filters: serde_json::Value) -> Self {
        self.facet_filters = Some(facet_filters);
        self
    }
}

/// SearchResponse holds the hits and metadata of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T = serde_json::Value> {
    pub hits: Vec<T>,
    pub nb_hits: i64,
    #[serde(default)]
    pub exhaustive_nb_hits: bool,
    pub offset: i64,
    pub limit: i64,
    pub processing_time_ms: i64,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets_distribution: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaustive_facets_count: Option<serde_json::Value>,
}

/// ListDocumentsRequest pages through the documents of an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDocumentsRequest {
    /// Zero leaves the server default
    pub offset: u64,
    /// Zero leaves the server default
    pub limit: u64,
    pub attributes_to_retrieve: Vec<String>,
}

/// ServerError is the error body the server attaches to failed calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "code")]
    pub error_code: Option<String>,
    #[serde(default, alias = "type")]
    pub error_type: Option<String>,
    #[serde(default, alias = "link")]
    pub error_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_from_server_json() {
        let index: Index = serde_json::from_value(json!({
            "uid": "movies",
            "name": "movies",
            "primaryKey": "id",
            "createdAt": "2021-01-01T00:00:00Z",
            "updatedAt": "2021-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(index.uid, "movies");
        assert_eq!(index.primary_key.as_deref(), Some("id"));
    }

    #[test]
    fn test_update_status_unrecognised_is_unknown() {
        let status: UpdateStatus = serde_json::from_value(json!("processing")).unwrap();
        assert_eq!(status, UpdateStatus::Unknown);
        assert!(status.is_terminal());
        assert!(!UpdateStatus::Enqueued.is_terminal());
    }

    #[test]
    fn test_update_status_wire_names() {
        for (wire, status) in [
            ("enqueued", UpdateStatus::Enqueued),
            ("processed", UpdateStatus::Processed),
            ("failed", UpdateStatus::Failed),
        ] {
            assert_eq!(serde_json::from_value::<UpdateStatus>(json!(wire)).unwrap(), status);
            assert_eq!(serde_json::to_value(status).unwrap(), json!(wire));
        }
        assert_eq!(UpdateStatus::default(), UpdateStatus::Unknown);

        let update: Update = serde_json::from_value(json!({ "updateId": 2 })).unwrap();
        assert_eq!(update.status, UpdateStatus::Unknown);
    }

    #[test]
    fn test_enqueued_update_without_processed_at() {
        let update: Update = serde_json::from_value(json!({
            "status": "enqueued",
            "updateId": 4,
            "type": { "name": "DocumentsAddition", "number": 2 },
            "enqueuedAt": "2021-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(update.status, UpdateStatus::Enqueued);
        assert_eq!(update.update_id, 4);
        assert_eq!(update.update_type["name"], json!("DocumentsAddition"));
        assert!(update.processed_at.is_none());
        assert!(update.error.is_none());
    }

    #[test]
    fn test_settings_omit_unset_fields() {
        let settings = Settings {
            stop_words: Some(vec!["the".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({ "stopWords": ["the"] })
        );
    }

    #[test]
    fn test_create_index_request_builder() {
        let request = CreateIndexRequest::new("movies").with_primary_key("id");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "uid": "movies", "primaryKey": "id" })
        );
    }
}
