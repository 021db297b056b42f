use sql_connection::{PostgresDbConfig, connect_postgres_db, ensure_collections};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ImageExt, runners::AsyncRunner},
};

#[tokio::test]
#[ignore = "requires docker"]
async fn connects_and_bootstraps_collections() -> anyhow::Result<()> {
    let container = Postgres::default()
        .with_env_var("POSTGRES_DB", "testdb")
        .with_env_var("POSTGRES_USER", "testuser")
        .with_env_var("POSTGRES_PASSWORD", "testpass")
        .start()
        .await?;
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;

    let config = PostgresDbConfig {
        uri: format!("postgresql://testuser:testpass@{host}:{port}/testdb"),
        max_conn: Some(4),
        min_conn: Some(2),
        logger: false,
    };
    let db = connect_postgres_db(&config).await?;
    let (_, size) = db.get_pool_status();
    assert!(size <= 4);

    // idempotent
    ensure_collections(&db, &["groups", "lists"]).await?;
    ensure_collections(&db, &["groups", "lists"]).await?;

    let client = db.get_client().await?;
    let row = client
        .query_one(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_name IN ('groups', 'lists')",
            &[],
        )
        .await?;
    let tables: i64 = row.get(0);
    assert_eq!(tables, 2);
    Ok(())
}
