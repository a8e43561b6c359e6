//! Key/value store for the admin tables.
//!
//! Each key holds one JSON array that is read once when the collection is
//! loaded and rewritten wholesale after every change.

use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::redis_client::RedisClient;

pub mod collection;

pub use collection::{fresh_id, Record, RecordCollection};

pub const BOOKINGS_KEY: &str = "bookings";
pub const MOVIES_KEY: &str = "movies";
pub const THEATERS_KEY: &str = "theaters";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("stored value for `{key}` is not a valid JSON array: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
enum Backend {
    Redis(RedisClient),
    Memory(Arc<RwLock<HashMap<String, String>>>),
}

#[derive(Clone)]
pub struct LocalStore {
    backend: Backend,
}

impl LocalStore {
    pub fn redis(client: RedisClient) -> Self {
        Self { backend: Backend::Redis(client) }
    }

    pub fn memory() -> Self {
        Self { backend: Backend::Memory(Arc::default()) }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Redis(_) => "redis",
            Backend::Memory(_) => "memory",
        }
    }

    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.backend {
            Backend::Redis(client) => {
                let mut conn = client.conn.clone();
                Ok(conn.get(key).await?)
            }
            Backend::Memory(map) => Ok(map.read().await.get(key).cloned()),
        }
    }

    pub async fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Redis(client) => {
                let mut conn = client.conn.clone();
                let _: () = conn.set(key, value).await?;
            }
            Backend::Memory(map) => {
                map.write().await.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// `None` when the key has never been written.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StoreError> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };
        let items = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(items))
    }

    pub async fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        debug!("Rewriting `{}` ({} records)", key, items.len());
        self.set_raw(key, raw).await
    }

    pub async fn ping(&self) -> bool {
        match &self.backend {
            Backend::Redis(client) => {
                let mut conn = client.conn.clone();
                redis::cmd("PING")
                    .query_async::<String>(&mut conn)
                    .await
                    .is_ok()
            }
            Backend::Memory(_) => true,
        }
    }
}
