use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{LocalStore, StoreError};

/// A row of one of the admin tables.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// What the "add" form submits.
    type Draft;

    fn id(&self) -> u64;
    fn from_draft(id: u64, draft: Self::Draft) -> Self;
}

/// Id for a new record: the current time in milliseconds, bumped past the
/// largest existing id when the clock would collide.
pub fn fresh_id<T: Record>(existing: &[T], now_millis: u64) -> u64 {
    let next = existing.iter().map(Record::id).max().map_or(0, |max| max + 1);
    now_millis.max(next)
}

pub struct RecordCollection<T> {
    key: Option<&'static str>,
    store: LocalStore,
    records: RwLock<Vec<T>>,
}

impl<T: Record> RecordCollection<T> {
    /// Reads `key` from the store. A key that was never written is seeded with
    /// `seed` and persisted.
    pub async fn load(store: LocalStore, key: &'static str, seed: Vec<T>) -> Result<Self, StoreError> {
        let records = match store.load::<T>(key).await? {
            Some(records) => {
                info!("Loaded {} records from `{}`", records.len(), key);
                records
            }
            None => {
                store.save(key, &seed).await?;
                info!("Seeded `{}` with {} records", key, seed.len());
                seed
            }
        };

        Ok(Self {
            key: Some(key),
            store,
            records: RwLock::new(records),
        })
    }

    /// A table that lives only in this process.
    pub fn in_memory(store: LocalStore, seed: Vec<T>) -> Self {
        Self {
            key: None,
            store,
            records: RwLock::new(seed),
        }
    }

    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: u64) -> Option<T> {
        self.records.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn add(&self, draft: T::Draft) -> Result<T, StoreError> {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.add_at(draft, now).await
    }

    async fn add_at(&self, draft: T::Draft, now_millis: u64) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let record = T::from_draft(fresh_id(&records, now_millis), draft);

        let mut updated = records.clone();
        updated.push(record.clone());
        self.persist(&updated).await?;
        *records = updated;

        Ok(record)
    }

    /// Removes the record with `id`; `false` when there was none.
    pub async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        if !records.iter().any(|r| r.id() == id) {
            warn!("Delete of unknown record {} in `{}`", id, self.key.unwrap_or("memory"));
            return Ok(false);
        }

        let updated: Vec<T> = records.iter().filter(|r| r.id() != id).cloned().collect();
        self.persist(&updated).await?;
        *records = updated;

        Ok(true)
    }

    async fn persist(&self, records: &[T]) -> Result<(), StoreError> {
        match self.key {
            Some(key) => self.store.save(key, records).await,
            None => Ok(()),
        }
    }
}
