//! Typed access to stored generations and favorites.

use crate::config::{Config, StorageBackend};
use crate::error::{LibraryError, StoreError};
use crate::store::{
    DocumentStore, Filter, FindOptions, MemoryStore, SqliteStore, DATABASE_FILE,
    DEFAULT_FIND_LIMIT, FAVORITES, GENERATIONS,
};
use crate::types::{FavoritePrompt, PromptGeneration, SaveFavoriteRequest};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// History and favorites on top of a [`DocumentStore`].
#[derive(Clone)]
pub struct PromptLibrary {
    store: Arc<dyn DocumentStore>,
    list_limit: usize,
}

impl PromptLibrary {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            list_limit: DEFAULT_FIND_LIMIT,
        }
    }

    /// Open the store selected by `[storage]` under the configured data directory.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn DocumentStore> = match config.storage.backend {
            StorageBackend::Sqlite => {
                Arc::new(SqliteStore::open(config.data_dir().join(DATABASE_FILE)).await?)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; history will not be kept");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(store).with_list_limit(config.storage.list_limit))
    }

    /// Cap the number of records returned by listings, at most [`DEFAULT_FIND_LIMIT`].
    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit.min(DEFAULT_FIND_LIMIT);
        self
    }

    /// Append a generation to the history.
    pub async fn record_generation(&self, generation: &PromptGeneration) -> Result<(), StoreError> {
        let doc = to_document(GENERATIONS, generation)?;
        self.store.insert(GENERATIONS, doc).await
    }

    /// Stored generations, newest first.
    pub async fn history(&self) -> Result<Vec<PromptGeneration>, LibraryError> {
        self.list(GENERATIONS, "created_at").await
    }

    /// Save a single prompt as a favorite.
    ///
    /// The referenced generation is not checked for existence.
    pub async fn save_favorite(
        &self,
        request: SaveFavoriteRequest,
    ) -> Result<FavoritePrompt, LibraryError> {
        let favorite = FavoritePrompt {
            id: uuid::Uuid::new_v4().to_string(),
            prompt_generation_id: request.prompt_generation_id,
            prompt_text: request.prompt_text,
            keyword: request.keyword,
            style: request.style,
            saved_at: Utc::now(),
        };
        let doc = to_document(FAVORITES, &favorite)?;
        self.store.insert(FAVORITES, doc).await?;
        tracing::info!("Saved favorite {}", favorite.id);
        Ok(favorite)
    }

    /// Saved favorites, newest first.
    pub async fn favorites(&self) -> Result<Vec<FavoritePrompt>, LibraryError> {
        self.list(FAVORITES, "saved_at").await
    }

    /// Delete a favorite by id. An unknown id is [`LibraryError::NotFound`].
    pub async fn delete_favorite(&self, id: &str) -> Result<(), LibraryError> {
        let removed = self
            .store
            .delete_one(FAVORITES, &Filter::eq("id", id))
            .await?;
        if removed == 0 {
            return Err(LibraryError::NotFound(id.to_string()));
        }
        tracing::info!("Deleted favorite {id}");
        Ok(())
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        sort_field: &str,
    ) -> Result<Vec<T>, LibraryError> {
        let options = FindOptions::newest_first(sort_field)
            .with_limit(self.list_limit)
            .excluding("_id");
        let docs = self
            .store
            .find(collection, &Filter::all(), &options)
            .await?;

        let mut records = Vec::with_capacity(docs.len());
        let mut skipped = 0usize;
        for doc in docs {
            match serde_json::from_value::<T>(doc) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!("Unreadable document in {collection}: {e}");
                }
            }
        }
        if skipped > 0 {
            tracing::warn!("{skipped} documents in {collection} could not be read and were skipped");
        }
        Ok(records)
    }
}

fn to_document<T: Serialize>(collection: &str, record: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(record).map_err(|source| StoreError::Encoding {
        collection: collection.to_string(),
        source,
    })
}
