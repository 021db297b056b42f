use database_traits::{Document, EntityId, EntityStore, StoreError};
use task_dao::{COLLECTIONS, PgDocumentStore};
use task_models::{Group, List, ScheduleTask};
use test_utils::TestPostgresContainer;

fn group(name: &str) -> Group {
    Group {
        name: name.to_string(),
        description: format!("{name} tasks"),
        created_by: Some("john@gmail.com".into()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn group_lifecycle() -> anyhow::Result<()> {
    let container = TestPostgresContainer::with_collections(&COLLECTIONS).await?;
    let store = PgDocumentStore::<Group>::new(container.sql_connect());

    let record = store.insert(group("Work")).await?;
    assert!(store.exists_by_id(&record.id).await?);
    assert_eq!(
        store.get_by_id(&record.id).await?.map(|r| r.document),
        Some(group("Work"))
    );
    assert!(
        store
            .exists_by_unique_field(&group("Work").unique_fields())
            .await?
    );

    assert!(!store.replace_by_id(&record.id, group("Work")).await?);
    assert!(store.replace_by_id(&record.id, group("Office")).await?);
    let updated = store.get_by_id(&record.id).await?.unwrap();
    assert_eq!(updated.document.name, "Office");
    assert!(updated.updated_at.is_some());

    assert!(store.set_deleted_flag(&record.id).await?);
    assert!(!store.set_deleted_flag(&record.id).await?);
    assert!(!store.exists_by_id(&record.id).await?);
    assert!(store.get_by_id(&record.id).await?.is_none());
    assert!(store.list_active().await?.is_empty());
    assert!(!store.replace_by_id(&record.id, group("Home")).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn list_keeps_creation_order_and_links() -> anyhow::Result<()> {
    let container = TestPostgresContainer::with_collections(&COLLECTIONS).await?;
    let groups = PgDocumentStore::<Group>::new(container.sql_connect());
    let lists = PgDocumentStore::<List>::new(container.sql_connect());

    let work = groups.insert(group("Work")).await?;
    for name in ["Project A", "Project B"] {
        lists
            .insert(List {
                name: name.into(),
                group_id: Some(work.id.clone()),
                ..Default::default()
            })
            .await?;
    }

    let stored = lists.list_active().await?;
    let names: Vec<&str> = stored.iter().map(|r| r.document.name.as_str()).collect();
    assert_eq!(names, ["Project A", "Project B"]);
    assert!(stored.iter().all(|r| r.document.group_id == Some(work.id.clone())));
    assert!(!lists.exists_by_id(&EntityId::generate()).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn composite_unique_fields() -> anyhow::Result<()> {
    let container = TestPostgresContainer::with_collections(&COLLECTIONS).await?;
    let tasks = PgDocumentStore::<ScheduleTask>::new(container.sql_connect());

    let task = ScheduleTask {
        title: "Buy milk".into(),
        description: "Buy 2 liters of milk".into(),
        status: "Completed".into(),
        priority: 1,
        ..Default::default()
    };
    tasks.insert(task.clone()).await?;

    assert!(tasks.exists_by_unique_field(&task.unique_fields()).await?);
    let other = ScheduleTask {
        description: "Buy oat milk".into(),
        ..task
    };
    assert!(!tasks.exists_by_unique_field(&other.unique_fields()).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn corrupt_rows_are_reported() -> anyhow::Result<()> {
    let container = TestPostgresContainer::with_collections(&COLLECTIONS).await?;
    container
        .execute_sql(
            "INSERT INTO groups (id, doc, created_at) VALUES \
             ('65f0c0ffee65f0c0ffee65f0', '\"not an object\"', now())",
        )
        .await?;

    let store = PgDocumentStore::<Group>::new(container.sql_connect());
    let err = store.list_active().await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    Ok(())
}
