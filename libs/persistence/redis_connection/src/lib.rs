use deadpool_redis::{Config, Pool, PoolConfig, Runtime};
pub use deadpool_redis::PoolError;
pub use redis::RedisError;
use tracing::{info, instrument};
use url::Url;

pub mod aside;
pub mod cache;
pub mod config;
pub mod core;

pub use aside::CacheAside;
pub use cache::{
    memory::MemoryCache,
    redis_cache::RedisCache,
    store::{CacheError, CacheResult, CacheStore},
};
pub use config::{
    CachePolicy, CachePolicyConfig, MemoryConfig, RedisDbConfig, RedisTimeouts,
};
pub use self::core::backend::CacheBackend;

pub(crate) fn redis_url<C>(config: &C) -> anyhow::Result<Url>
where
    C: config::DbConnectConfig,
{
    let mut url = Url::parse("redis://")?;

    url.set_host(Some(config.host()))?;
    url.set_port(Some(config.port()))
        .map_err(|_| anyhow::anyhow!("redis url cannot carry a port"))?;
    if let Some(password) = config.password() {
        url.set_password(Some(password))
            .map_err(|_| anyhow::anyhow!("redis url cannot carry a password"))?;
    }
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("redis url cannot be a base"))?
        .extend(&[config.db().to_string()]);

    Ok(url)
}

pub(crate) fn pool_config<C>(config: &C) -> PoolConfig
where
    C: config::DbConnectConfig,
{
    PoolConfig {
        timeouts: config.timeouts(),
        ..PoolConfig::default()
    }
}

#[instrument(skip_all, name = "connect-redis")]
pub async fn connect_redis_db<C>(config: &C) -> anyhow::Result<Pool>
where
    C: config::DbConnectConfig,
{
    let url = redis_url(config)?;

    info!(redis.host = config.host(), redis.db = config.db(), redis.connect = true);

    let cfg = Config {
        url: Some(url.to_string()),
        pool: Some(pool_config(config)),
        connection: None,
    };

    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}
