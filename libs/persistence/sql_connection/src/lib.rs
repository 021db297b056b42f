pub use config::{DbConnectConfig, DbOptionsConfig, PostgresDbConfig};
pub use database_traits;
pub use pool::{SqlConnect, connect_postgres_db, ensure_collections};

pub mod config;
mod pool;
