pub mod memory;

use std::{ops::Deref, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::base::types::{Admission, Res};

// Traits.

/// Generic dedup cache trait that backends must implement.
///
/// The only operation the bot needs is an atomic set-if-absent with a TTL.
/// Entries self-expire; there is no removal API.
#[async_trait]
pub trait GenericCacheClient: Send + Sync + 'static {
    /// Record `key` if no live marker for it exists.
    ///
    /// Returns [`Admission::Fresh`] and writes a marker expiring after `ttl`
    /// when the key is absent, or [`Admission::Duplicate`] when a marker is
    /// already present. The check and the write must happen atomically: two
    /// concurrent calls for the same key must never both see `Fresh`. A
    /// backend that cannot provide this (a generic get/put cache) does not
    /// satisfy the contract.
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Res<Admission>;
}

// Structs.

/// Dedup cache client for the application.
///
/// This is trivially cloneable and can be passed around without the need for
/// `Arc` or `Mutex`.
#[derive(Clone)]
pub struct CacheClient {
    inner: Arc<dyn GenericCacheClient>,
}

impl Deref for CacheClient {
    type Target = dyn GenericCacheClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl CacheClient {
    pub fn new(inner: Arc<dyn GenericCacheClient>) -> Self {
        Self { inner }
    }
}
