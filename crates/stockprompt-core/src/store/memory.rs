//! In-process document store.

use super::{apply_query, DocumentStore, Filter, FindOptions};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps every collection in memory. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::NotAnObject(collection.to_string()));
        }
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let docs = collections.get(collection).cloned().unwrap_or_default();
        Ok(apply_query(docs, filter, options))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_find_delete() {
        let store = MemoryStore::new();
        store
            .insert("favorites", json!({"id": "a", "saved_at": "2025-01-01T00:00:00Z"}))
            .await
            .unwrap();
        store
            .insert("favorites", json!({"id": "b", "saved_at": "2025-01-02T00:00:00Z"}))
            .await
            .unwrap();

        let found = store
            .find("favorites", &Filter::all(), &FindOptions::newest_first("saved_at"))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["id"], "b");

        assert_eq!(store.delete_one("favorites", &Filter::eq("id", "a")).await.unwrap(), 1);
        assert_eq!(store.delete_one("favorites", &Filter::eq("id", "a")).await.unwrap(), 0);
        assert_eq!(store.len("favorites").await, 1);
    }

    #[tokio::test]
    async fn test_delete_from_unknown_collection() {
        let store = MemoryStore::new();
        assert_eq!(store.delete_one("nothing", &Filter::all()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store.insert("a", json!({"id": 1})).await.unwrap();
        let found = store
            .find("b", &Filter::all(), &FindOptions::default())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let store = MemoryStore::new();
        let err = store.insert("a", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(_)));
    }
}
