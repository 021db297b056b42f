use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_redis::{Config, Pool, Runtime};
use testcontainers_modules::{
    redis::Redis,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

/// Redis test container using testcontainers-rs
pub struct TestRedisContainer {
    pub pool: Pool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Redis>,
}

impl TestRedisContainer {
    pub async fn new() -> Result<Self> {
        let container = Redis::default()
            .start()
            .await
            .context("Failed to start Redis container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(6379).await?;
        let connection_string = format!("redis://{host}:{port}");

        let pool = Self::create_pool(&connection_string).await?;

        Ok(Self {
            pool,
            connection_string,
            _container: container,
        })
    }

    async fn create_pool(connection_string: &str) -> Result<Pool> {
        let mut cfg = Config::from_url(connection_string);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(10));
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?;

        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(mut conn) => {
                    match deadpool_redis::redis::cmd("PING")
                        .query_async::<()>(&mut conn)
                        .await
                    {
                        Ok(_) => break,
                        Err(_) if attempts < 20 => {
                            attempts += 1;
                            tokio::time::sleep(Duration::from_millis(500))
                                .await;
                            continue;
                        }
                        Err(e) => return Err(e).context("Redis not ready"),
                    }
                }
                Err(_) if attempts < 20 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    continue;
                }
                Err(e) => {
                    return Err(e).context("Failed to get Redis connection");
                }
            }
        }

        Ok(pool)
    }

    pub async fn get_connection(&self) -> Result<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    pub async fn flush_db(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        deadpool_redis::redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }
}
