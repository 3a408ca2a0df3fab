//! # In-Memory Server
//!
//! [`MemoryTransport`] is a [`Transport`] backed by a map of URL to JSON document. It
//! stands in for a remote server in the demo and in integration tests.
//!
//! - `get` returns the stored document, or fails with [`ServerError::NotFound`].
//! - `post` shallow-merges the body's fields into the stored document, creating it if
//!   needed, and returns the result. An empty object therefore changes nothing.
//! - `destroy` removes the document and returns it.

use async_trait::async_trait;
use resource_framework::{Transport, TransportError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors the in-memory server reports through [`TransportError`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Body for {0} must be a JSON object")]
    NotAnObject(String),
}

pub type Store = Arc<RwLock<HashMap<String, Value>>>;

/// Stateful transport keeping documents in memory. Clones share the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    store: Store,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `document` at `url`, replacing anything already there.
    pub async fn insert(&self, url: impl Into<String>, document: Value) {
        self.store.write().await.insert(url.into(), document);
    }

    pub async fn document(&self, url: &str) -> Option<Value> {
        self.store.read().await.get(url).cloned()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let store = self.store.read().await;
        let document = store
            .get(url)
            .ok_or_else(|| TransportError::new(ServerError::NotFound(url.to_string())))?;
        debug!(%url, "Serving document");
        Ok(document.to_string())
    }

    async fn post(&self, url: &str, body: &Value) -> Result<String, TransportError> {
        let fields = body
            .as_object()
            .ok_or_else(|| TransportError::new(ServerError::NotAnObject(url.to_string())))?;

        let mut store = self.store.write().await;
        let document = store
            .entry(url.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(existing) = document {
            for (key, value) in fields {
                existing.insert(key.clone(), value.clone());
            }
        } else {
            *document = body.clone();
        }
        debug!(%url, fields = fields.len(), "Stored document");
        Ok(document.to_string())
    }

    async fn destroy(&self, url: &str) -> Result<String, TransportError> {
        let removed = self
            .store
            .write()
            .await
            .remove(url)
            .ok_or_else(|| TransportError::new(ServerError::NotFound(url.to_string())))?;
        debug!(%url, "Removed document");
        Ok(removed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_unknown_url_is_not_found() {
        let server = MemoryTransport::new();
        let err = server.get("users/9").await.unwrap_err();
        assert_eq!(err.to_string(), "Resource not found: users/9");
        let inner = err.into_inner().downcast::<ServerError>().unwrap();
        assert_eq!(*inner, ServerError::NotFound("users/9".into()));
    }

    #[tokio::test]
    async fn post_merges_into_existing_document() {
        let server = MemoryTransport::new();
        server.insert("users/1", json!({ "a": 1, "b": 2 })).await;

        let response = server.post("users/1", &json!({ "b": 3 })).await.unwrap();
        let stored: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(stored, json!({ "a": 1, "b": 3 }));

        server.post("users/1", &json!({})).await.unwrap();
        assert_eq!(server.document("users/1").await, Some(json!({ "a": 1, "b": 3 })));
    }

    #[tokio::test]
    async fn post_rejects_non_object_body() {
        let server = MemoryTransport::new();
        assert!(server.post("users/1", &json!([1])).await.is_err());
        assert!(server.is_empty().await);
    }

    #[tokio::test]
    async fn destroy_removes_document() {
        let server = MemoryTransport::new();
        server.insert("users/1", json!({})).await;
        server.destroy("users/1").await.unwrap();
        assert!(server.destroy("users/1").await.is_err());
        assert_eq!(server.len().await, 0);
    }
}
