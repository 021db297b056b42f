use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use bytes::Bytes;
use redis_connection::{CacheError, CachePolicy, CacheResult, CacheStore, MemoryCache};

#[derive(Default)]
struct Counters {
    gets: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    deleted_keys: Mutex<Vec<String>>,
}

/// Memory-backed cache store that records every call.
///
/// Clones share the same entries and counters, so a test can keep one
/// handle while the service under test owns another.
#[derive(Clone, Default)]
pub struct CountingCacheStore {
    inner: MemoryCache,
    counters: Arc<Counters>,
}

impl CountingCacheStore {
    pub fn new() -> Self { Self::default() }

    pub fn gets(&self) -> usize { self.counters.gets.load(Ordering::SeqCst) }

    pub fn sets(&self) -> usize { self.counters.sets.load(Ordering::SeqCst) }

    pub fn deletes(&self) -> usize { self.counters.deletes.load(Ordering::SeqCst) }

    /// Keys passed to `delete`, in call order.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.counters
            .deleted_keys
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default()
    }

    /// Checks presence without touching the counters.
    pub async fn contains(&self, key: &str) -> bool {
        matches!(self.inner.get(key).await, Ok(Some(_)))
    }

    pub fn reset_counters(&self) {
        self.counters.gets.store(0, Ordering::SeqCst);
        self.counters.sets.store(0, Ordering::SeqCst);
        self.counters.deletes.store(0, Ordering::SeqCst);
        if let Ok(mut keys) = self.counters.deleted_keys.lock() {
            keys.clear();
        }
    }
}

#[async_trait]
impl CacheStore for CountingCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        self.counters.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(
        &self, key: &str, value: Bytes, policy: &CachePolicy,
    ) -> CacheResult<()> {
        self.counters.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, policy).await
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.counters.deletes.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut keys) = self.counters.deleted_keys.lock() {
            keys.push(key.to_string());
        }
        self.inner.delete(key).await
    }
}

/// Cache store whose operations fail on demand with a transport error.
#[derive(Clone, Default)]
pub struct FailingCacheStore {
    inner: MemoryCache,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl FailingCacheStore {
    /// Every operation fails.
    pub fn unreachable() -> Self {
        let store = Self::default();
        store.fail_reads(true);
        store.fail_writes(true);
        store.fail_deletes(true);
        store
    }

    pub fn fail_reads(&self, fail: bool) { self.fail_reads.store(fail, Ordering::SeqCst) }

    pub fn fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst) }

    pub fn fail_deletes(&self, fail: bool) { self.fail_deletes.store(fail, Ordering::SeqCst) }

    /// Writes straight into the backing memory, bypassing failure injection.
    pub async fn seed(&self, key: &str, value: Bytes) {
        self.inner
            .set(key, value, &CachePolicy::never_expire())
            .await
            .expect("seeding the in-memory cache cannot fail");
    }

    fn refused() -> CacheError { CacheError::Backend("connection refused".into()) }
}

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.get(key).await
    }

    async fn set(
        &self, key: &str, value: Bytes, policy: &CachePolicy,
    ) -> CacheResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.set(key, value, policy).await
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.delete(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_bypasses_write_failures() {
        let store = FailingCacheStore::unreachable();
        store.seed("all_groups", Bytes::from_static(b"[]")).await;

        assert!(store.get("all_groups").await.is_err());
        store.fail_reads(false);
        assert_eq!(
            store.get("all_groups").await.unwrap(),
            Some(Bytes::from_static(b"[]"))
        );
    }

    #[tokio::test]
    async fn clones_share_entries_and_counters() {
        let store = CountingCacheStore::new();
        let handle = store.clone();
        store
            .set("group_1", Bytes::from_static(b"{}"), &CachePolicy::never_expire())
            .await
            .unwrap();
        store.delete("group_1").await.unwrap();

        assert_eq!(handle.sets(), 1);
        assert_eq!(handle.deleted_keys(), vec!["group_1".to_string()]);
        assert!(!handle.contains("group_1").await);
    }
}
