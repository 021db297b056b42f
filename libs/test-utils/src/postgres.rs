use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use sql_connection::{SqlConnect, ensure_collections};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};
use tokio_postgres::NoTls;

/// PostgreSQL test container using testcontainers-rs
pub struct TestPostgresContainer {
    pub pool: Pool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    /// Starts a fresh PostgreSQL container and waits until it answers.
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string = format!(
            "postgresql://testuser:testpass@{host}:{port}/testdb"
        );

        let pool = Self::create_pool(&connection_string).await?;

        Ok(Self {
            pool,
            connection_string,
            _container: container,
        })
    }

    /// Starts a container and creates the given collection tables.
    pub async fn with_collections(collections: &[&str]) -> Result<Self> {
        let instance = Self::new().await?;
        ensure_collections(&instance.sql_connect(), collections).await?;
        Ok(instance)
    }

    pub fn sql_connect(&self) -> SqlConnect { SqlConnect::new(self.pool.clone()) }

    async fn create_pool(connection_string: &str) -> Result<Pool> {
        let pg_config = connection_string.parse::<tokio_postgres::Config>()?;

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

        let pool = Pool::builder(mgr)
            .max_size(10)
            .build()
            .context("Failed to build PostgreSQL connection pool")?;

        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(client) => {
                    match client.query_one("SELECT 1", &[]).await {
                        Ok(_) => break,
                        Err(_) if attempts < 20 => {
                            attempts += 1;
                            tokio::time::sleep(Duration::from_millis(500))
                                .await;
                            continue;
                        }
                        Err(e) => {
                            return Err(e).context("PostgreSQL not ready");
                        }
                    }
                }
                Err(_) if attempts < 20 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    continue;
                }
                Err(e) => {
                    return Err(e)
                        .context("Failed to get PostgreSQL connection");
                }
            }
        }

        Ok(pool)
    }

    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(sql)
            .await
            .context("Failed to execute SQL")?;
        Ok(())
    }
}
