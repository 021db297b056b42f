use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use database_traits::{Document, EntityId, EntityStore, Record, StoreError};
use tokio::sync::RwLock;
use tracing::instrument;

/// Process-local document store with the same visibility rules as the
/// Postgres store.
pub struct MemoryDocumentStore<D> {
    records: RwLock<BTreeMap<EntityId, Record<D>>>,
}

impl<D> Default for MemoryDocumentStore<D> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<D> MemoryDocumentStore<D> {
    pub fn new() -> Self { Self::default() }
}

fn field_matches<D: Document>(
    document: &D, fields: &[(&'static str, String)],
) -> Result<bool, StoreError> {
    let value = serde_json::to_value(document)?;
    Ok(fields.iter().all(|(field, expected)| {
        value.get(*field).and_then(|v| v.as_str()) == Some(expected.as_str())
    }))
}

#[async_trait]
impl<D: Document> EntityStore<D> for MemoryDocumentStore<D> {
    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn list_active(&self) -> Result<Vec<Record<D>>, StoreError> {
        let records = self.records.read().await;
        let mut active: Vec<Record<D>> =
            records.values().filter(|r| r.is_active()).cloned().collect();
        active.sort_by(|a, b| {
            a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
        });
        Ok(active)
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn get_by_id(
        &self, id: &EntityId,
    ) -> Result<Option<Record<D>>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).filter(|r| r.is_active()).cloned())
    }

    #[instrument(skip(self, document), fields(collection = D::COLLECTION))]
    async fn insert(&self, document: D) -> Result<Record<D>, StoreError> {
        let record = Record::new(document);
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(StoreError::Internal(format!(
                "duplicate id {}",
                record.id
            )));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    #[instrument(skip(self, document), fields(collection = D::COLLECTION))]
    async fn replace_by_id(
        &self, id: &EntityId, document: D,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) if record.is_active() && record.document != document => {
                record.document = document;
                record.updated_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn set_deleted_flag(&self, id: &EntityId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) if record.is_active() => {
                record.is_deleted = true;
                record.updated_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn exists_by_id(&self, id: &EntityId) -> Result<bool, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).is_some_and(|r| r.is_active()))
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn exists_by_unique_field(
        &self, fields: &[(&'static str, String)],
    ) -> Result<bool, StoreError> {
        if fields.is_empty() {
            return Ok(false);
        }
        let records = self.records.read().await;
        for record in records.values().filter(|r| r.is_active()) {
            if field_matches(&record.document, fields)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
