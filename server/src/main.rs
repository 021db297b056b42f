use redis_connection::{CacheAside, CacheBackend, connect_redis_db};
use seeders::SeederRunner;
use sql_connection::{connect_postgres_db, ensure_collections};
use task_dao::{COLLECTIONS, Stores};
use task_services::TaskBoardServices;
use taskboard::{
    CacheBackendKind, Health, ServerConfig, StoreBackendKind, build_app,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    info!("Initializing backends...");

    let (stores, db) = match config.store_backend {
        StoreBackendKind::Postgres => {
            let db = connect_postgres_db(&config.database).await?;
            ensure_collections(&db, &COLLECTIONS).await?;
            info!("PostgreSQL connection pool initialized");
            (Stores::postgres(db.clone()), Some(db))
        }
        StoreBackendKind::Memory => {
            warn!("Using the in-memory store, data is lost on restart");
            (Stores::memory(), None)
        }
    };

    let backend = match config.cache_backend {
        CacheBackendKind::Redis => {
            CacheBackend::from(connect_redis_db(&config.redis).await?)
        }
        CacheBackendKind::Memory => CacheBackend::from(config.memory.clone()),
    };
    let cache_name = backend.name();
    info!("Cache backend initialized: {}", cache_name);
    let cache = CacheAside::new(backend);

    if config.seed_database {
        SeederRunner::task_board(&stores, &cache).run_all().await?;
    }

    let services =
        TaskBoardServices::new(&stores, cache, config.cache_policy.policy());
    let app = build_app(
        services,
        Health {
            db,
            cache: cache_name,
        },
        &config.cors_origin,
    )?;

    info!("🚀 Task board server starting on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
