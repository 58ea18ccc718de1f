use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::request::Request;
use crate::{AsyncUpdateId, Client, Result, Settings, Synonyms};

const API: &str = "Settings";

/// Index settings: `/indexes/{uid}/settings` and its sub-resources.
///
/// Every update and reset is asynchronous and returns an [`AsyncUpdateId`].
#[derive(Debug, Clone, Copy)]
pub struct SettingsApi<'a> {
    client: &'a Client,
    index_uid: &'a str,
}

impl<'a> SettingsApi<'a> {
    pub(crate) fn new(client: &'a Client, index_uid: &'a str) -> Self {
        Self { client, index_uid }
    }

    pub fn index_uid(&self) -> &str {
        self.index_uid
    }

    fn path(&self, sub: &str) -> String {
        if sub.is_empty() {
            format!("/indexes/{}/settings", self.index_uid)
        } else {
            format!("/indexes/{}/settings/{}", self.index_uid, sub)
        }
    }

    async fn fetch<R: DeserializeOwned>(&self, sub: &str, function: &'static str) -> Result<R> {
        self.client
            .execute(
                Request::get(self.path(sub))
                    .accept(&[200])
                    .describe(API, function),
            )
            .await
    }

    async fn update<B: Serialize + ?Sized + Sync>(
        &self,
        sub: &str,
        function: &'static str,
        body: &B,
    ) -> Result<AsyncUpdateId> {
        self.client
            .execute(
                Request::post(self.path(sub))
                    .body(body)
                    .accept(&[202])
                    .describe(API, function),
            )
            .await
    }

    async fn reset(&self, sub: &str, function: &'static str) -> Result<AsyncUpdateId> {
        self.client
            .execute(
                Request::delete(self.path(sub))
                    .accept(&[202])
                    .describe(API, function),
            )
            .await
    }

    pub async fn get_all(&self) -> Result<Settings> {
        self.fetch("", "get_all").await
    }

    /// Update every setting present in `settings`; absent ones are kept
    pub async fn update_all(&self, settings: &Settings) -> Result<AsyncUpdateId> {
        self.update("", "update_all", settings).await
    }

    pub async fn reset_all(&self) -> Result<AsyncUpdateId> {
        self.reset("", "reset_all").await
    }

    pub async fn get_ranking_rules(&self) -> Result<Vec<String>> {
        self.fetch("ranking-rules", "get_ranking_rules").await
    }

    pub async fn update_ranking_rules(&self, rules: &[String]) -> Result<AsyncUpdateId> {
        self.update("ranking-rules", "update_ranking_rules", rules)
            .await
    }

    pub async fn reset_ranking_rules(&self) -> Result<AsyncUpdateId> {
        self.reset("ranking-rules", "reset_ranking_rules").await
    }

    /// `None` when no distinct attribute is set
    pub async fn get_distinct_attribute(&self) -> Result<Option<String>> {
        self.fetch("distinct-attribute", "get_distinct_attribute")
            .await
    }

    pub async fn update_distinct_attribute(&self, attribute: &str) -> Result<AsyncUpdateId> {
        self.update("distinct-attribute", "update_distinct_attribute", attribute)
            .await
    }

    pub async fn reset_distinct_attribute(&self) -> Result<AsyncUpdateId> {
        self.reset("distinct-attribute", "reset_distinct_attribute")
            .await
    }

    pub async fn get_searchable_attributes(&self) -> Result<Vec<String>> {
        self.fetch("searchable-attributes", "get_searchable_attributes")
            .await
    }

    pub async fn update_searchable_attributes(&self, attributes: &[String]) -> Result<AsyncUpdateId> {
        self.update(
            "searchable-attributes",
            "update_searchable_attributes",
            attributes,
        )
        .await
    }

    pub async fn reset_searchable_attributes(&self) -> Result<AsyncUpdateId> {
        self.reset("searchable-attributes", "reset_searchable_attributes")
            .await
    }

    pub async fn get_displayed_attributes(&self) -> Result<Vec<String>> {
        self.fetch("displayed-attributes", "get_displayed_attributes")
            .await
    }

    pub async fn update_displayed_attributes(&self, attributes: &[String]) -> Result<AsyncUpdateId> {
        self.update(
            "displayed-attributes",
            "update_displayed_attributes",
            attributes,
        )
        .await
    }

    pub async fn reset_displayed_attributes(&self) -> Result<AsyncUpdateId> {
        self.reset("displayed-attributes", "reset_displayed_attributes")
            .await
    }

    pub async fn get_stop_words(&self) -> Result<Vec<String>> {
        self.fetch("stop-words", "get_stop_words").await
    }

    pub async fn update_stop_words(&self, stop_words: &[String]) -> Result<AsyncUpdateId> {
        self.update("stop-words", "update_stop_words", stop_words)
            .await
    }

    pub async fn reset_stop_words(&self) -> Result<AsyncUpdateId> {
        self.reset("stop-words", "reset_stop_words").await
    }

    pub async fn get_synonyms(&self) -> Result<Synonyms> {
        self.fetch("synonyms", "get_synonyms").await
    }

    pub async fn update_synonyms(&self, synonyms: &Synonyms) -> Result<AsyncUpdateId> {
        self.update("synonyms", "update_synonyms", synonyms).await
    }

    pub async fn reset_synonyms(&self) -> Result<AsyncUpdateId> {
        self.reset("synonyms", "reset_synonyms").await
    }

    pub async fn get_attributes_for_faceting(&self) -> Result<Vec<String>> {
        self.fetch("attributes-for-faceting", "get_attributes_for_faceting")
            .await
    }

    pub async fn update_attributes_for_faceting(&self, attributes: &[String]) -> Result<AsyncUpdateId> {
        self.update(
            "attributes-for-faceting",
            "update_attributes_for_faceting",
            attributes,
        )
        .await
    }

    pub async fn reset_attributes_for_faceting(&self) -> Result<AsyncUpdateId> {
        self.reset("attributes-for-faceting", "reset_attributes_for_faceting")
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::request::Method;
    use crate::testing::{client_with, MockTransport};
    use crate::{Settings, Synonyms};
    use serde_json::json;
    use std::sync::Arc;

    const UPDATE: &str = r#"{"updateId":9}"#;

    #[tokio::test]
    async fn test_get_and_update_all() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(
                    200,
                    r#"{"rankingRules":["typo","words"],"distinctAttribute":null,"searchableAttributes":["*"],"displayedAttributes":["*"],"stopWords":[],"synonyms":{},"attributesForFaceting":[]}"#,
                )
                .respond(202, UPDATE)
                .respond(202, UPDATE),
        );
        let client = client_with(transport.clone());
        let settings = client.settings("movies");

        let current = settings.get_all().await.unwrap();
        assert_eq!(
            current.ranking_rules,
            Some(vec!["typo".to_string(), "words".to_string()])
        );
        assert!(current.distinct_attribute.is_none());

        let update = settings
            .update_all(&Settings {
                stop_words: Some(vec!["the".to_string()]),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(update.update_id, 9);
        settings.reset_all().await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].url.path(), "/indexes/movies/settings");
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(transport.json_body(1), json!({ "stopWords": ["the"] }));
        assert_eq!(sent[2].method, Method::Delete);
        assert_eq!(sent[2].url.path(), "/indexes/movies/settings");
    }

    #[tokio::test]
    async fn test_sub_resource_paths() {
        let transport = Arc::new(MockTransport::new().repeat(202, UPDATE));
        let client = client_with(transport.clone());
        let settings = client.settings("movies");
        let attrs = vec!["title".to_string()];

        settings.update_ranking_rules(&attrs).await.unwrap();
        settings.update_distinct_attribute("url").await.unwrap();
        settings.update_searchable_attributes(&attrs).await.unwrap();
        settings.update_displayed_attributes(&attrs).await.unwrap();
        settings.update_stop_words(&attrs).await.unwrap();
        settings.update_attributes_for_faceting(&attrs).await.unwrap();
        settings.reset_synonyms().await.unwrap();

        let paths: Vec<String> = transport
            .requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect();
        assert_eq!(
            paths,
            vec![
                "POST /indexes/movies/settings/ranking-rules",
                "POST /indexes/movies/settings/distinct-attribute",
                "POST /indexes/movies/settings/searchable-attributes",
                "POST /indexes/movies/settings/displayed-attributes",
                "POST /indexes/movies/settings/stop-words",
                "POST /indexes/movies/settings/attributes-for-faceting",
                "DELETE /indexes/movies/settings/synonyms",
            ]
        );
        assert_eq!(transport.json_body(1), json!("url"));
    }

    #[tokio::test]
    async fn test_synonyms_round() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(200, r#"{"wolverine":["logan","xmen"]}"#)
                .respond(202, UPDATE),
        );
        let client = client_with(transport.clone());
        let settings = client.settings("movies");

        let synonyms = settings.get_synonyms().await.unwrap();
        assert_eq!(synonyms["wolverine"], vec!["logan", "xmen"]);

        let mut updated = Synonyms::new();
        updated.insert("logan".to_string(), vec!["wolverine".to_string()]);
        settings.update_synonyms(&updated).await.unwrap();
        assert_eq!(
            transport.json_body(1),
            json!({ "logan": ["wolverine"] })
        );
    }

    #[tokio::test]
    async fn test_distinct_attribute_null() {
        let transport = Arc::new(MockTransport::new().respond(200, "null").respond(200, r#""url""#));
        let client = client_with(transport);
        let settings = client.settings("movies");

        assert_eq!(settings.get_distinct_attribute().await.unwrap(), None);
        assert_eq!(
            settings.get_distinct_attribute().await.unwrap().as_deref(),
            Some("url")
        );
    }
}
