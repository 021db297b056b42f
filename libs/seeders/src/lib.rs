pub mod board_seeders;
pub mod seeder_runner;

use anyhow::Result;
use async_trait::async_trait;
use database_traits::{Document, EntityStore};
use redis_connection::CacheAside;
use task_cache_keys::collection_key;
use task_models::EntityKind;
use tracing::warn;

#[async_trait]
pub trait Seeder: Send + Sync {
    /// Inserts the seed data and returns the number of records written. A
    /// collection that already holds data is left alone.
    async fn seed(&self) -> Result<usize>;
    fn name(&self) -> &'static str;
}

pub use board_seeders::{GroupSeeder, ListSeeder, TaskSeeder, UserSeeder};
pub use seeder_runner::SeederRunner;

pub(crate) const SEED_AUTHOR: &str = "john@gmail.com";

pub(crate) async fn is_empty<D: Document>(
    store: &dyn EntityStore<D>,
) -> Result<bool> {
    Ok(store.list_active().await?.is_empty())
}

/// Seeding writes around the cache, so a collection key left over from an
/// earlier run has to go.
pub(crate) async fn evict_collection(cache: &CacheAside, kind: EntityKind) {
    let key = collection_key(kind);
    if let Err(e) = cache.invalidate(&key).await {
        warn!("Failed to invalidate {} after seeding: {}", key, e);
    }
}
