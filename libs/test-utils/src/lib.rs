pub mod cache;
pub mod postgres;
pub mod redis;
pub mod store;

pub use cache::{CountingCacheStore, FailingCacheStore};
pub use postgres::TestPostgresContainer;
pub use redis::TestRedisContainer;
pub use store::CountingStore;
