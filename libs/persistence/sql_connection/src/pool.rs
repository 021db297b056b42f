use std::time::Duration;

use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{debug, info, instrument};

use crate::config::{DbConnectConfig, DbOptionsConfig};

/// Handle to the primary connection pool, cloned into every store.
#[derive(Debug, Clone)]
pub struct SqlConnect {
    pool: Pool,
}

impl SqlConnect {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    /// Get connection for write operations
    pub async fn get_client(
        &self,
    ) -> Result<Object, deadpool_postgres::PoolError> {
        self.pool.get().await
    }

    /// Get connection for read operations
    pub async fn get_read_client(
        &self,
    ) -> Result<Object, deadpool_postgres::PoolError> {
        self.pool.get().await
    }

    /// (available, size) of the pool
    pub fn get_pool_status(&self) -> (usize, usize) {
        let status = self.pool.status();
        (status.available, status.size)
    }
}

/// Pre-warms a connection pool by creating connections up front
async fn prewarm_pool(pool: &Pool, count: u32) {
    debug!("Pre-warming pool with {} connections", count);
    let mut handles = vec![];

    for i in 0..count {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            match pool.get().await {
                Ok(_conn) => {
                    debug!("Pre-warmed connection {}/{}", i + 1, count);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to pre-warm connection {}: {}",
                        i + 1,
                        e
                    );
                }
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    let status = pool.status();
    info!(
        "Pool pre-warming complete: {} connections available",
        status.available
    );
}

#[instrument(skip_all, name = "connect-pgsql")]
pub async fn connect_postgres_db<C>(config: &C) -> Result<SqlConnect, anyhow::Error>
where
    C: DbConnectConfig + DbOptionsConfig,
{
    let db_url = config.uri();

    info!(
        postgres.max_conn = ?config.max_conn(),
        postgres.min_conn = ?config.min_conn(),
        postgres.sql_logger = config.sql_logger()
    );

    let pg_config = db_url.parse::<tokio_postgres::Config>()?;

    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

    let mut pool_builder = Pool::builder(mgr)
        .runtime(deadpool_postgres::Runtime::Tokio1)
        .wait_timeout(Some(Duration::from_millis(2000)))
        .create_timeout(Some(Duration::from_millis(5000)))
        .recycle_timeout(Some(Duration::from_millis(100)));

    if let Some(max_conn) = config.max_conn() {
        pool_builder = pool_builder.max_size(max_conn as usize);
    }

    let pool = pool_builder.build()?;

    if let Some(min_conn) = config.min_conn() {
        info!("Pre-warming primary pool with {} connections", min_conn);
        prewarm_pool(&pool, min_conn).await;
    }

    Ok(SqlConnect::new(pool))
}

/// Creates one table per collection if it does not exist yet.
///
/// Each table keeps the document body as JSONB next to the record metadata.
#[instrument(skip(db))]
pub async fn ensure_collections(
    db: &SqlConnect, collections: &[&str],
) -> Result<(), anyhow::Error> {
    let client = db.get_client().await?;
    for collection in collections {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {collection} (
                id TEXT PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NULL,
                is_deleted BOOLEAN NOT NULL DEFAULT FALSE
            )"
        );
        client.batch_execute(&ddl).await?;
        debug!(collection, "Collection ready");
    }
    Ok(())
}
