use async_trait::async_trait;

use crate::{Document, EntityId, Record, StoreError};

/// Persistence contract for one document collection.
///
/// Reads and existence checks only see records whose soft-delete flag is
/// unset. Every method is a single-document (or single-query) operation; no
/// transactions span calls.
#[async_trait]
pub trait EntityStore<D: Document>: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Record<D>>, StoreError>;

    async fn get_by_id(
        &self, id: &EntityId,
    ) -> Result<Option<Record<D>>, StoreError>;

    async fn insert(&self, document: D) -> Result<Record<D>, StoreError>;

    /// Replaces the document body of an active record.
    ///
    /// Returns `false` when no active record matched or when the stored
    /// document is already equal to `document`.
    async fn replace_by_id(
        &self, id: &EntityId, document: D,
    ) -> Result<bool, StoreError>;

    /// Returns `false` when the record is missing or already deleted.
    async fn set_deleted_flag(&self, id: &EntityId) -> Result<bool, StoreError>;

    async fn exists_by_id(&self, id: &EntityId) -> Result<bool, StoreError>;

    /// `true` when an active record matches every `(field, value)` pair.
    async fn exists_by_unique_field(
        &self, fields: &[(&'static str, String)],
    ) -> Result<bool, StoreError>;
}
