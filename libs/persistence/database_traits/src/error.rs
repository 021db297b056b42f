use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
    #[error("Store error: {0}")]
    Internal(String),
}
