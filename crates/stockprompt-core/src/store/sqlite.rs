//! SQLite-backed document store.
//!
//! Each collection is a table of `(seq, doc)` rows where `doc` holds the JSON
//! text. Filters and ordering run in SQL through the JSON functions, so every
//! statement is atomic across processes sharing the file.

use super::{project, DocumentStore, Filter, FindOptions, DEFAULT_FIND_LIMIT};
use crate::error::StoreError;
use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Document store persisted in a single SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let conn = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || open_connection(&path)).await??
        };
        tracing::debug!("Opened document store at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool, with `collection`'s table in place.
    async fn with_table<T, F>(&self, collection: &str, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &str) -> rusqlite::Result<T> + Send + 'static,
    {
        check_name(collection)?;
        let conn = Arc::clone(&self.conn);
        let table = collection.to_string();
        let result = tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS \"{table}\" (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    doc TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS \"{table}_id\" ON \"{table}\" (json_extract(doc, '$.id'));"
            ))?;
            f(&conn, &table)
        })
        .await?;
        result.map_err(|source| StoreError::Database {
            collection: collection.to_string(),
            source,
        })
    }
}

fn open_connection(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            collection: String::new(),
            source,
        })?;
    }
    let db_err = |source| StoreError::Database {
        collection: String::new(),
        source,
    };
    let conn = Connection::open(path).map_err(db_err)?;
    // WAL plus a busy timeout lets several processes share the file.
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(db_err)?;
    conn.busy_timeout(Duration::from_secs(5)).map_err(db_err)?;
    Ok(conn)
}

/// Table and field names are interpolated into SQL, so only `[A-Za-z0-9_]` is allowed.
fn check_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Translate an equality filter into a SQL condition and its parameters.
fn where_clause(filter: &Filter) -> Result<(String, Vec<SqlValue>), StoreError> {
    let mut clauses = Vec::new();
    let mut params = Vec::new();
    for (field, expected) in filter.conditions() {
        check_name(field)?;
        let path = format!("'$.{field}'");
        match expected {
            Value::Null => clauses.push(format!("json_type(doc, {path}) = 'null'")),
            Value::Bool(b) => {
                clauses.push(format!("json_type(doc, {path}) = ?"));
                params.push(SqlValue::Text(b.to_string()));
            }
            Value::Number(n) => {
                clauses.push(format!("json_extract(doc, {path}) = ?"));
                params.push(match n.as_i64() {
                    Some(i) => SqlValue::Integer(i),
                    None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
                });
            }
            Value::String(s) => {
                clauses.push(format!(
                    "json_type(doc, {path}) = 'text' AND json_extract(doc, {path}) = ?"
                ));
                params.push(SqlValue::Text(s.clone()));
            }
            Value::Array(_) | Value::Object(_) => {
                clauses.push(format!("json_extract(doc, {path}) = json(?)"));
                params.push(SqlValue::Text(expected.to_string()));
            }
        }
    }
    if clauses.is_empty() {
        Ok(("1".to_string(), params))
    } else {
        Ok((clauses.join(" AND "), params))
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::NotAnObject(collection.to_string()));
        }
        let text = document.to_string();
        self.with_table(collection, move |conn, table| {
            conn.execute(
                &format!("INSERT INTO \"{table}\" (doc) VALUES (?1)"),
                rusqlite::params![text],
            )
        })
        .await?;
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let (condition, mut params) = where_clause(filter)?;
        // NULL sorts last under DESC, which puts missing or unparseable timestamps at the end.
        let order = match &options.sort_desc_by {
            Some(field) => {
                check_name(field)?;
                format!("julianday(json_extract(doc, '$.{field}')) DESC, seq DESC")
            }
            None => "seq".to_string(),
        };
        let limit = options.limit.min(DEFAULT_FIND_LIMIT);
        params.push(SqlValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));

        let rows = self
            .with_table(collection, move |conn, table| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT doc FROM \"{table}\" WHERE {condition} ORDER BY {order} LIMIT ?"
                ))?;
                let rows = stmt.query_map(rusqlite::params_from_iter(params), |row| {
                    row.get::<_, String>(0)
                })?;
                rows.collect::<rusqlite::Result<Vec<String>>>()
            })
            .await?;

        let mut docs = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for text in rows {
            match serde_json::from_str::<Value>(&text) {
                Ok(mut doc) => {
                    project(&mut doc, &options.exclude);
                    docs.push(doc);
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!("{skipped} rows in '{collection}' could not be parsed and were skipped");
        }
        Ok(docs)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let (condition, params) = where_clause(filter)?;
        let removed = self
            .with_table(collection, move |conn, table| {
                conn.execute(
                    &format!(
                        "DELETE FROM \"{table}\" WHERE seq = \
                         (SELECT seq FROM \"{table}\" WHERE {condition} ORDER BY seq LIMIT 1)"
                    ),
                    rusqlite::params_from_iter(params),
                )
            })
            .await?;
        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn open_in(dir: &tempfile::TempDir) -> SqliteStore {
        SqliteStore::open(dir.path().join("data").join("stockprompt.db"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_find_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
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
        let found = store
            .find("favorites", &Filter::all(), &FindOptions::default())
            .await
            .unwrap();
        assert_eq!(found, vec![json!({"id": "b", "saved_at": "2025-01-02T00:00:00Z"})]);
    }

    #[tokio::test]
    async fn test_find_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open_in(&dir).await;
            store
                .insert("gens", json!({"id": "1", "created_at": "2025-05-01T08:00:00Z"}))
                .await
                .unwrap();
            store
                .insert("gens", json!({"id": "2", "created_at": "2025-05-02T08:00:00Z"}))
                .await
                .unwrap();
        }
        let store = open_in(&dir).await;
        let found = store
            .find("gens", &Filter::all(), &FindOptions::newest_first("created_at"))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["id"], "2");
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        let found = store
            .find("nothing", &Filter::all(), &FindOptions::default())
            .await
            .unwrap();
        assert!(found.is_empty());
        assert_eq!(store.delete_one("nothing", &Filter::all()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_newest_first_by_time_not_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        for (id, at) in [
            ("whole", "2025-03-01T10:00:00Z"),
            ("half", "2025-03-01T10:00:00.5Z"),
            ("broken", "not a timestamp"),
            ("next_day", "2025-03-02T00:00:00+02:00"),
        ] {
            store
                .insert("gens", json!({"id": id, "created_at": at}))
                .await
                .unwrap();
        }
        store.insert("gens", json!({"id": "undated"})).await.unwrap();

        let found = store
            .find("gens", &Filter::all(), &FindOptions::newest_first("created_at"))
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().filter_map(|d| d["id"].as_str()).collect();
        assert_eq!(ids, ["next_day", "half", "whole", "undated", "broken"]);
    }

    #[tokio::test]
    async fn test_limit_and_exclude() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        for i in 0..5 {
            store
                .insert("gens", json!({"_id": i, "id": i, "created_at": format!("2025-01-0{}T00:00:00Z", i + 1)}))
                .await
                .unwrap();
        }
        let options = FindOptions::newest_first("created_at")
            .with_limit(2)
            .excluding("_id");
        let found = store.find("gens", &Filter::all(), &options).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["id"], 4);
        assert!(found[0].get("_id").is_none());
    }

    #[tokio::test]
    async fn test_filter_matches_json_types() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        store
            .insert("docs", json!({"id": "5", "flag": true, "n": 5}))
            .await
            .unwrap();
        store
            .insert("docs", json!({"id": 5, "flag": false, "n": 5.5}))
            .await
            .unwrap();

        let by = |filter: Filter| {
            let store = store.clone();
            async move {
                store
                    .find("docs", &filter, &FindOptions::default())
                    .await
                    .unwrap()
                    .len()
            }
        };
        assert_eq!(by(Filter::eq("id", "5")).await, 1);
        assert_eq!(by(Filter::eq("id", 5)).await, 1);
        assert_eq!(by(Filter::eq("flag", true)).await, 1);
        assert_eq!(by(Filter::eq("n", 5.5)).await, 1);
        assert_eq!(by(Filter::eq("id", "5").and("flag", false)).await, 0);
        assert_eq!(by(Filter::eq("missing", Value::Null)).await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_handles_keep_every_insert() {
        let dir = tempfile::tempdir().unwrap();
        let deleter = open_in(&dir).await;
        let inserter = open_in(&dir).await;

        for i in 0..50 {
            deleter
                .insert("favorites", json!({"id": format!("keep-{i}")}))
                .await
                .unwrap();
            deleter
                .insert("favorites", json!({"id": format!("doomed-{i}")}))
                .await
                .unwrap();
        }

        let inserts = async {
            for i in 0..100 {
                inserter
                    .insert("favorites", json!({"id": format!("new-{i}")}))
                    .await
                    .unwrap();
            }
        };
        let deletes = async {
            let mut removed = 0;
            for i in 0..50 {
                removed += deleter
                    .delete_one("favorites", &Filter::eq("id", format!("doomed-{i}")))
                    .await
                    .unwrap();
            }
            removed
        };
        let ((), removed) = tokio::join!(inserts, deletes);
        assert_eq!(removed, 50);

        let found = open_in(&dir)
            .await
            .find("favorites", &Filter::all(), &FindOptions::default().with_limit(100))
            .await
            .unwrap();
        assert_eq!(found.len(), 100);

        let mut total = 0;
        for prefix in ["keep-", "new-"] {
            for i in 0..100 {
                let id = format!("{prefix}{i}");
                total += deleter
                    .find("favorites", &Filter::eq("id", id), &FindOptions::default())
                    .await
                    .unwrap()
                    .len();
            }
        }
        assert_eq!(total, 150);
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        let err = store.insert("a", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(_)));
    }

    #[tokio::test]
    async fn test_rejects_unsafe_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        let err = store
            .insert("favorites\"; DROP TABLE x; --", json!({"id": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));

        let err = store
            .find("favorites", &Filter::eq("id') OR 1=1 --", 1), &FindOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }
}
