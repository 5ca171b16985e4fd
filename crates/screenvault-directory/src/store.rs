//! Document store abstraction and the in-memory backend

use crate::error::Result;
use crate::query::{Document, Fields, Page, Query};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Collection path for the claims of one bounty
pub fn claims_collection(bounty_id: &str) -> String {
    format!("bounties/{}/claims", bounty_id)
}

/// Generate a fresh document id
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A collection-of-documents store
///
/// Collections are addressed by path; sub-collections use
/// `parent/{id}/child`. Backends only implement `list` to get query support.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Fetch one document
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Create or replace a document
    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<()>;

    /// Every document in a collection, in insertion order
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Create a document under a generated id
    async fn add(&self, collection: &str, data: Fields) -> Result<String> {
        let id = new_document_id();
        self.set(collection, &id, data).await?;
        Ok(id)
    }

    /// Run a filtered, ordered, paged query
    async fn query(&self, query: &Query) -> Result<Page> {
        let docs = self.list(&query.collection).await?;
        let page = query.apply(docs);
        debug!(
            "{} query on '{}' returned {} documents (has_more: {})",
            self.name(),
            query.collection,
            page.documents.len(),
            page.has_more
        );
        Ok(page)
    }

    /// Number of documents in a collection
    async fn count(&self, collection: &str) -> Result<usize> {
        Ok(self.list(collection).await?.len())
    }
}

/// Write a batch of JSON objects into a collection
///
/// Objects carrying a string `id` are stored under it; the rest get generated
/// ids. Non-objects are skipped with a warning. Returns the number written.
pub async fn import(
    store: &dyn DocumentStore,
    collection: &str,
    values: Vec<serde_json::Value>,
) -> Result<usize> {
    let mut written = 0;
    for (index, value) in values.into_iter().enumerate() {
        let serde_json::Value::Object(mut data) = value else {
            warn!("Skipping entry {} of '{}': not a JSON object", index, collection);
            continue;
        };
        match data.remove("id") {
            Some(serde_json::Value::String(id)) if !id.is_empty() => {
                store.set(collection, &id, data).await?;
            }
            _ => {
                store.add(collection, data).await?;
            }
        }
        written += 1;
    }
    info!("Imported {} documents into '{}'", written, collection);
    Ok(written)
}

/// Store that keeps everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.data = data,
            None => docs.push(Document::new(id, data)),
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::query::Direction;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_set_replaces_in_place() {
        let store = MemoryStore::new();
        store.set("agents", "a", fields(json!({"name": "A"}))).await.unwrap();
        store.set("agents", "b", fields(json!({"name": "B"}))).await.unwrap();
        store.set("agents", "a", fields(json!({"name": "A2"}))).await.unwrap();

        let docs = store.list("agents").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[0].str_field("name"), Some("A2"));
        assert_eq!(store.count("agents").await.unwrap(), 2);
        assert_eq!(store.count("missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_generates_ids() {
        let store = MemoryStore::new();
        let first = store.add("waitlist", fields(json!({"n": 1}))).await.unwrap();
        let second = store.add("waitlist", fields(json!({"n": 2}))).await.unwrap();
        assert_ne!(first, second);
        assert!(store.get("waitlist", &first).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sub_collections_are_separate() {
        let store = MemoryStore::new();
        store
            .add(&claims_collection("b1"), fields(json!({"agentId": "x"})))
            .await
            .unwrap();
        assert_eq!(store.count(&claims_collection("b1")).await.unwrap(), 1);
        assert_eq!(store.count(&claims_collection("b2")).await.unwrap(), 0);
        assert_eq!(store.count("bounties").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_import_uses_id_field() {
        let store = MemoryStore::new();
        let written = import(
            &store,
            "agents",
            vec![json!({"id": "atlas", "name": "Atlas"}), json!({"name": "Nova"}), json!(42)],
        )
        .await
        .unwrap();
        assert_eq!(written, 2);

        let atlas = store.get("agents", "atlas").await.unwrap().unwrap();
        assert!(atlas.field("id").is_none());
        assert_eq!(store.count("agents").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_default_query() {
        let store = MemoryStore::new();
        for (id, reward) in [("a", 10), ("b", 30), ("c", 20)] {
            store
                .set("bounties", id, fields(json!({"reward": reward})))
                .await
                .unwrap();
        }
        let page = store
            .query(
                &Query::collection("bounties")
                    .order_by("reward", Direction::Descending)
                    .limit(2),
            )
            .await
            .unwrap();
        let ids: Vec<_> = page.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(page.has_more);
    }
}
