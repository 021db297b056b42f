use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use database_traits::{Document, EntityId, EntityStore, Record, StoreError};

/// Wraps an entity store, counting calls and optionally failing them.
pub struct CountingStore<D> {
    inner: Arc<dyn EntityStore<D>>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl<D> Clone for CountingStore<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            calls: self.calls.clone(),
            failing: self.failing.clone(),
        }
    }
}

impl<D: Document> CountingStore<D> {
    pub fn new(inner: Arc<dyn EntityStore<D>>) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    pub fn reset(&self) { self.calls.store(0, Ordering::SeqCst) }

    /// Makes every following call fail with `StoreError::Internal`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Internal("store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl<D: Document> EntityStore<D> for CountingStore<D> {
    async fn list_active(&self) -> Result<Vec<Record<D>>, StoreError> {
        self.enter()?;
        self.inner.list_active().await
    }

    async fn get_by_id(
        &self, id: &EntityId,
    ) -> Result<Option<Record<D>>, StoreError> {
        self.enter()?;
        self.inner.get_by_id(id).await
    }

    async fn insert(&self, document: D) -> Result<Record<D>, StoreError> {
        self.enter()?;
        self.inner.insert(document).await
    }

    async fn replace_by_id(
        &self, id: &EntityId, document: D,
    ) -> Result<bool, StoreError> {
        self.enter()?;
        self.inner.replace_by_id(id, document).await
    }

    async fn set_deleted_flag(&self, id: &EntityId) -> Result<bool, StoreError> {
        self.enter()?;
        self.inner.set_deleted_flag(id).await
    }

    async fn exists_by_id(&self, id: &EntityId) -> Result<bool, StoreError> {
        self.enter()?;
        self.inner.exists_by_id(id).await
    }

    async fn exists_by_unique_field(
        &self, fields: &[(&'static str, String)],
    ) -> Result<bool, StoreError> {
        self.enter()?;
        self.inner.exists_by_unique_field(fields).await
    }
}
