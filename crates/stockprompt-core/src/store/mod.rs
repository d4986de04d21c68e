//! Document storage for generations and favorites.
//!
//! Stores append JSON documents to named collections, answer equality-filter
//! queries (newest first, limited), and delete one matching document at a time.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::cmp::Reverse;

/// Collection holding [`crate::types::PromptGeneration`] documents.
pub const GENERATIONS: &str = "prompt_generations";

/// Collection holding [`crate::types::FavoritePrompt`] documents.
pub const FAVORITES: &str = "favorites";

/// File name of the SQLite database under the data directory.
pub const DATABASE_FILE: &str = "stockprompt.db";

/// Cap on documents returned by [`DocumentStore::find`].
pub const DEFAULT_FIND_LIMIT: usize = 100;

/// Equality filter on top-level fields. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter(Map<String, Value>);

impl Filter {
    /// Match every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents whose `field` equals `value`.
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Add another equality condition.
    pub fn and(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub(crate) fn conditions(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Whether `document` satisfies every condition.
    pub fn matches(&self, document: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

/// Ordering, limit, and projection for [`DocumentStore::find`].
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Timestamp field to sort on, newest first
    pub sort_desc_by: Option<String>,
    /// Maximum documents returned, at most [`DEFAULT_FIND_LIMIT`]
    pub limit: usize,
    /// Fields removed from each returned document
    pub exclude: Vec<String>,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            sort_desc_by: None,
            limit: DEFAULT_FIND_LIMIT,
            exclude: Vec::new(),
        }
    }
}

impl FindOptions {
    /// Newest first by `field`, with the default limit.
    pub fn newest_first(field: &str) -> Self {
        Self {
            sort_desc_by: Some(field.to_string()),
            ..Self::default()
        }
    }

    /// Set the limit, capped at [`DEFAULT_FIND_LIMIT`].
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(DEFAULT_FIND_LIMIT);
        self
    }

    pub fn excluding(mut self, field: &str) -> Self {
        self.exclude.push(field.to_string());
        self
    }
}

/// Append-oriented document store.
///
/// Implementations must make a single `insert` or `delete_one` atomic with
/// respect to concurrent calls on the same store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a JSON object to `collection`.
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    /// Return matching documents, ordered and limited per `options`.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Value>, StoreError>;

    /// Delete the first document matching `filter`. Returns how many were removed.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;
}

/// Apply filter, ordering, limit and projection to documents in insertion order.
///
/// Newest first means: parseable timestamps in descending time order, then
/// documents whose field is missing or unparseable. Ties go to later inserts.
pub(crate) fn apply_query(
    documents: impl IntoIterator<Item = Value>,
    filter: &Filter,
    options: &FindOptions,
) -> Vec<Value> {
    let mut matched: Vec<(usize, Value)> = documents
        .into_iter()
        .filter(|doc| filter.matches(doc))
        .enumerate()
        .collect();

    if let Some(field) = &options.sort_desc_by {
        matched.sort_by_cached_key(|(seq, doc)| {
            Reverse((doc.get(field).and_then(Value::as_str).and_then(parse_timestamp), *seq))
        });
    }

    let mut result: Vec<Value> = matched
        .into_iter()
        .take(options.limit.min(DEFAULT_FIND_LIMIT))
        .map(|(_, doc)| doc)
        .collect();
    for doc in &mut result {
        project(doc, &options.exclude);
    }
    result
}

/// Remove excluded top-level fields from a document.
pub(crate) fn project(doc: &mut Value, exclude: &[String]) {
    if let Some(obj) = doc.as_object_mut() {
        for field in exclude {
            obj.remove(field);
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
