use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database_traits::{Document, EntityId, EntityStore, Record, StoreError};
use sql_connection::SqlConnect;
use tokio_postgres::{Row, types::ToSql};
use tracing::instrument;

const COLUMNS: &str = "id, doc, created_at, updated_at, is_deleted";

/// Document store keeping each collection in its own JSONB table.
pub struct PgDocumentStore<D> {
    db: SqlConnect,
    _document: PhantomData<fn() -> D>,
}

impl<D> Clone for PgDocumentStore<D> {
    fn clone(&self) -> Self { Self::new(self.db.clone()) }
}

impl<D> PgDocumentStore<D> {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            db,
            _document: PhantomData,
        }
    }

    pub fn db(&self) -> &SqlConnect { &self.db }
}

impl<D: Document> PgDocumentStore<D> {
    fn map_row(&self, row: &Row) -> Result<Record<D>, StoreError> {
        let raw_id: String = row.get(0);
        let id = EntityId::parse(&raw_id).map_err(|e| {
            StoreError::Corrupt {
                id: raw_id.clone(),
                reason: e.to_string(),
            }
        })?;
        let doc: serde_json::Value = row.get(1);
        let document = serde_json::from_value(doc).map_err(|e| {
            StoreError::Corrupt {
                id: raw_id,
                reason: e.to_string(),
            }
        })?;

        Ok(Record {
            id,
            created_at: row.get(2),
            updated_at: row.get(3),
            is_deleted: row.get(4),
            document,
        })
    }
}

/// `doc->>'a' = $1 AND doc->>'b' = $2 ...`
fn unique_predicate(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .enumerate()
        .map(|(i, (field, _))| format!("doc->>'{}' = ${}", field, i + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn create_param_refs<T: ToSql + Sync>(params: &[T]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

#[async_trait]
impl<D: Document> EntityStore<D> for PgDocumentStore<D> {
    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn list_active(&self) -> Result<Vec<Record<D>>, StoreError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {COLUMNS} FROM {} WHERE NOT is_deleted ORDER BY \
                 created_at ASC, id ASC",
                D::COLLECTION
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        rows.iter().map(|row| self.map_row(row)).collect()
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn get_by_id(
        &self, id: &EntityId,
    ) -> Result<Option<Record<D>>, StoreError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {COLUMNS} FROM {} WHERE id = $1 AND NOT is_deleted",
                D::COLLECTION
            ))
            .await?;
        let rows = client.query(&stmt, &[&id.as_str()]).await?;

        rows.first().map(|row| self.map_row(row)).transpose()
    }

    #[instrument(skip(self, document), fields(collection = D::COLLECTION))]
    async fn insert(&self, document: D) -> Result<Record<D>, StoreError> {
        let record = Record::new(document);
        let doc = serde_json::to_value(&record.document)?;

        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "INSERT INTO {} ({COLUMNS}) VALUES ($1, $2, $3, NULL, FALSE)",
                D::COLLECTION
            ))
            .await?;
        client
            .execute(&stmt, &[&record.id.as_str(), &doc, &record.created_at])
            .await?;

        Ok(record)
    }

    #[instrument(skip(self, document), fields(collection = D::COLLECTION))]
    async fn replace_by_id(
        &self, id: &EntityId, document: D,
    ) -> Result<bool, StoreError> {
        let doc = serde_json::to_value(&document)?;
        let updated_at: DateTime<Utc> = Utc::now();

        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "UPDATE {} SET doc = $2, updated_at = $3
                 WHERE id = $1 AND NOT is_deleted AND doc IS DISTINCT FROM $2",
                D::COLLECTION
            ))
            .await?;
        let modified = client
            .execute(&stmt, &[&id.as_str(), &doc, &updated_at])
            .await?;

        Ok(modified > 0)
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn set_deleted_flag(&self, id: &EntityId) -> Result<bool, StoreError> {
        let updated_at: DateTime<Utc> = Utc::now();

        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "UPDATE {} SET is_deleted = TRUE, updated_at = $2
                 WHERE id = $1 AND NOT is_deleted",
                D::COLLECTION
            ))
            .await?;
        let modified = client.execute(&stmt, &[&id.as_str(), &updated_at]).await?;

        Ok(modified > 0)
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn exists_by_id(&self, id: &EntityId) -> Result<bool, StoreError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1 AND NOT \
                 is_deleted)",
                D::COLLECTION
            ))
            .await?;
        let row = client.query_one(&stmt, &[&id.as_str()]).await?;

        Ok(row.get(0))
    }

    #[instrument(skip(self), fields(collection = D::COLLECTION))]
    async fn exists_by_unique_field(
        &self, fields: &[(&'static str, String)],
    ) -> Result<bool, StoreError> {
        if fields.is_empty() {
            return Ok(false);
        }

        let values: Vec<&str> = fields.iter().map(|(_, v)| v.as_str()).collect();
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE NOT is_deleted AND {})",
                D::COLLECTION,
                unique_predicate(fields)
            ))
            .await?;
        let row = client.query_one(&stmt, &create_param_refs(&values)).await?;

        Ok(row.get(0))
    }
}
