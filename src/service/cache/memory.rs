//! In-process TTL cache for event dedup markers.
//!
//! A mutex-guarded map of key to expiry instant. The check and the insert in
//! [`set_if_absent`](super::GenericCacheClient::set_if_absent) happen under a
//! single lock acquisition, so admission is a true set-if-absent. Expired
//! entries are dropped lazily on access.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::base::types::{Admission, Res};

use super::{CacheClient, GenericCacheClient};

// Extra methods on `CacheClient` applied by the in-memory implementation.

impl CacheClient {
    /// Creates a new in-memory dedup cache.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryCacheClient::default()))
    }
}

/// In-memory cache backend.
#[derive(Default)]
pub struct MemoryCacheClient {
    entries: Mutex<HashMap<String, Instant>>,
}

#[async_trait]
impl GenericCacheClient for MemoryCacheClient {
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Res<Admission> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        entries.retain(|_, expires_at| *expires_at > now);

        if entries.contains_key(key) {
            return Ok(Admission::Duplicate);
        }

        entries.insert(key.to_string(), now + ttl);
        Ok(Admission::Fresh)
    }
}
