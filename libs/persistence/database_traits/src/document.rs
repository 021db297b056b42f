use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::EntityId;

pub type UniqueFields = Vec<(&'static str, String)>;

/// A domain document persisted in a named collection.
pub trait Document:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static
{
    const COLLECTION: &'static str;

    /// Field/value pairs that must not be shared with another active record.
    /// Field names are the serialized (camelCase) names.
    fn unique_fields(&self) -> UniqueFields;
}

/// A stored document together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<D> {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub document: D,
}

impl<D: Document> Record<D> {
    pub fn new(document: D) -> Self {
        Self {
            id: EntityId::generate(),
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
            document,
        }
    }

    pub fn is_active(&self) -> bool { !self.is_deleted }
}
