use std::sync::Arc;

use bytes::Bytes;
use database_traits::EntityStore;
use redis_connection::{CacheAside, CachePolicy};
use task_commands::{GroupCommand, ListCommand, TaskCommand, UserCommand};
use task_dao::{MemoryDocumentStore, Stores};
use task_models::{Group, List, ScheduleTask, User};
use task_services::{
    EntityService, GroupResource, GroupService, ListResource, Resource,
    TaskBoardServices, TaskResource, TaskService, UserResource, UserService,
};
use test_utils::{CountingCacheStore, CountingStore, FailingCacheStore};

struct Harness<R: Resource> {
    service: EntityService<R>,
    cache: CountingCacheStore,
    store: CountingStore<R::Document>,
}

fn harness<R: Resource>(inner: Arc<dyn EntityStore<R::Document>>) -> Harness<R> {
    let cache = CountingCacheStore::new();
    let store = CountingStore::new(inner);
    let service = EntityService::new(
        Arc::new(store.clone()),
        CacheAside::new(cache.clone()),
        CachePolicy::never_expire(),
    );
    Harness {
        service,
        cache,
        store,
    }
}

fn groups() -> Harness<GroupResource> {
    harness(Arc::new(MemoryDocumentStore::<Group>::new()))
}

fn group_cmd(name: &str) -> GroupCommand {
    GroupCommand {
        name: name.to_string(),
        description: format!("{name} related tasks"),
        created_by: Some("john@gmail.com".into()),
        ..Default::default()
    }
}

async fn create_group(service: &GroupService, name: &str) -> String {
    let created = service.create(group_cmd(name)).await;
    assert_eq!(created.status_code, 201, "{}", created.message);
    created.data.unwrap().id.to_string()
}

#[tokio::test]
async fn create_then_get_work_group() {
    let h = groups();

    let created = h.service.create(group_cmd("Work")).await;
    assert!(created.success);
    assert_eq!(created.status_code, 201);
    assert_eq!(created.message, "Group created successfully.");
    let id = created.data.unwrap().id;

    let fetched = h.service.get_by_id(id.as_str()).await;
    assert!(fetched.success);
    assert_eq!(fetched.status_code, 200);
    assert_eq!(fetched.message, "Group retrieved successfully.");
    assert_eq!(fetched.data.unwrap().name, "Work");
}

#[tokio::test]
async fn duplicate_create_is_a_conflict() {
    let h = groups();
    create_group(&h.service, "Work").await;

    let again = h.service.create(group_cmd("Work")).await;

    assert!(!again.success);
    assert_eq!(again.status_code, 409);
    assert_eq!(again.message, "A group with the same name already exists.");
    assert_eq!(again.data, None);
}

#[tokio::test]
async fn create_requires_a_name() {
    let h = groups();

    let response = h.service.create(group_cmd("  ")).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Group name cannot be null or empty.");
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn second_read_is_served_from_cache() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.store.reset();

    let first = h.service.list().await;
    let second = h.service.list().await;
    assert_eq!(first, second);
    assert_eq!(h.store.calls(), 1);

    h.service.get_by_id(&id).await;
    h.service.get_by_id(&id).await;
    assert_eq!(h.store.calls(), 2);
}

#[tokio::test]
async fn create_evicts_only_the_collection_key() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.service.list().await;
    h.service.get_by_id(&id).await;
    assert!(h.cache.contains("all_groups").await);
    h.cache.reset_counters();

    create_group(&h.service, "Personal").await;

    assert_eq!(h.cache.deleted_keys(), vec!["all_groups".to_string()]);
    assert!(!h.cache.contains("all_groups").await);
    assert!(h.cache.contains(&format!("group_{id}")).await);

    let listed = h.service.list().await.data.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn update_evicts_item_and_collection_keys() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.service.list().await;
    h.service.get_by_id(&id).await;
    let item_key = format!("group_{id}");
    assert!(h.cache.contains(&item_key).await);

    let mut cmd = group_cmd("Office");
    cmd.id = Some(id.clone());
    let updated = h.service.update(cmd).await;

    assert!(updated.success);
    assert_eq!(updated.status_code, 204);
    assert_eq!(updated.message, "Group updated successfully.");
    assert!(!h.cache.contains(&item_key).await);
    assert!(!h.cache.contains("all_groups").await);

    let fetched = h.service.get_by_id(&id).await;
    assert_eq!(fetched.data.unwrap().name, "Office");
}

#[tokio::test]
async fn identical_update_reports_no_changes() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.service.get_by_id(&id).await;
    h.cache.reset_counters();

    let mut cmd = group_cmd("Work");
    cmd.id = Some(id.clone());
    let response = h.service.update(cmd).await;

    assert!(!response.success);
    assert_eq!(response.status_code, 304);
    assert_eq!(response.message, "No changes made to the group.");
    assert_eq!(h.cache.deletes(), 0);
    assert!(h.cache.contains(&format!("group_{id}")).await);
}

#[tokio::test]
async fn update_of_unknown_id_reports_no_changes() {
    let h = groups();

    let mut cmd = group_cmd("Work");
    cmd.id = Some("65f0c0ffee65f0c0ffee65f0".into());
    let response = h.service.update(cmd).await;

    assert_eq!(response.status_code, 304);
}

#[tokio::test]
async fn malformed_update_id_never_reaches_the_store() {
    let h = groups();

    let mut cmd = group_cmd("Work");
    cmd.id = Some("not-a-valid-id".into());
    let response = h.service.update(cmd).await;

    assert!(!response.success);
    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Invalid Group ID.");
    assert_eq!(h.store.calls(), 0);
    assert_eq!(h.cache.gets() + h.cache.sets() + h.cache.deletes(), 0);
}

#[tokio::test]
async fn update_without_id_is_rejected() {
    let h = groups();

    let response = h.service.update(group_cmd("Work")).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Group ID cannot be null or empty.");
}

#[tokio::test]
async fn delete_evicts_and_hides_the_entity() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.service.list().await;
    h.service.get_by_id(&id).await;

    let deleted = h.service.delete(&id).await;
    assert!(deleted.success);
    assert_eq!(deleted.status_code, 204);
    assert_eq!(deleted.message, "Group deleted successfully.");
    assert!(!h.cache.contains(&format!("group_{id}")).await);
    assert!(!h.cache.contains("all_groups").await);

    let fetched = h.service.get_by_id(&id).await;
    assert_eq!(fetched.status_code, 404);
    assert_eq!(fetched.message, format!("Group with ID {id} not found."));

    let listed = h.service.list().await;
    assert_eq!(listed.message, "No groups found.");
    assert_eq!(listed.data, Some(vec![]));
}

#[tokio::test]
async fn deleting_twice_is_not_found() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;

    assert_eq!(h.service.delete(&id).await.status_code, 204);
    let again = h.service.delete(&id).await;

    assert!(!again.success);
    assert_eq!(again.status_code, 404);
}

#[tokio::test]
async fn empty_id_is_rejected_before_any_access() {
    let h = groups();

    let response = h.service.get_by_id("").await;

    assert!(!response.success);
    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Group ID cannot be null or empty.");
    assert_eq!(h.store.calls(), 0);
    assert_eq!(h.cache.gets(), 0);

    let delete = h.service.delete("xyz").await;
    assert_eq!(delete.status_code, 400);
    assert_eq!(delete.message, "Invalid Group ID.");
}

#[tokio::test]
async fn padded_id_is_malformed() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.store.reset();
    let padded = format!("  {id}\t");

    let fetched = h.service.get_by_id(&padded).await;
    assert_eq!(fetched.status_code, 400);
    assert_eq!(fetched.message, "Invalid Group ID.");

    let deleted = h.service.delete(&padded).await;
    assert_eq!(deleted.status_code, 400);
    assert_eq!(deleted.message, "Invalid Group ID.");

    assert_eq!(h.store.calls(), 0);
    assert_eq!(h.service.get_by_id(&id).await.status_code, 200);
}

#[tokio::test]
async fn update_cannot_blank_required_fields() {
    let h = groups();
    let id = create_group(&h.service, "Work").await;
    h.store.reset();
    h.cache.reset_counters();

    let mut cmd = group_cmd(" ");
    cmd.id = Some(id.clone());
    let response = h.service.update(cmd).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Group name cannot be null or empty.");
    assert_eq!(h.store.calls(), 0);
    assert_eq!(h.cache.deletes(), 0);
    assert_eq!(h.service.get_by_id(&id).await.data.unwrap().name, "Work");
}

#[tokio::test]
async fn missing_entity_is_not_cached() {
    let h = groups();
    let id = "65f0c0ffee65f0c0ffee65f0";

    let response = h.service.get_by_id(id).await;

    assert_eq!(response.status_code, 404);
    assert_eq!(h.cache.sets(), 0);
    assert!(!h.cache.contains(&format!("group_{id}")).await);
}

#[tokio::test]
async fn empty_collection_message() {
    let h = groups();

    let response = h.service.list().await;

    assert!(response.success);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.message, "No groups found.");
}

#[tokio::test]
async fn store_failure_is_a_500_without_invalidation() {
    let h = groups();
    h.store.set_failing(true);

    let listed = h.service.list().await;
    assert_eq!(listed.status_code, 500);
    assert_eq!(listed.message, "An error occurred while retrieving the groups.");

    let created = h.service.create(group_cmd("Work")).await;
    assert_eq!(created.status_code, 500);
    assert_eq!(created.message, "An error occurred while creating the group.");
    assert_eq!(h.cache.deletes(), 0);
    assert_eq!(h.cache.sets(), 0);
}

#[tokio::test]
async fn unreachable_cache_degrades_to_the_store() {
    let service: GroupService = EntityService::new(
        Arc::new(MemoryDocumentStore::<Group>::new()),
        CacheAside::new(FailingCacheStore::unreachable()),
        CachePolicy::never_expire(),
    );

    let id = create_group(&service, "Work").await;

    let fetched = service.get_by_id(&id).await;
    assert_eq!(fetched.status_code, 200);
    let listed = service.list().await;
    assert_eq!(listed.data.unwrap().len(), 1);

    let mut cmd = group_cmd("Office");
    cmd.id = Some(id.clone());
    assert_eq!(service.update(cmd).await.status_code, 204);
    assert_eq!(service.delete(&id).await.status_code, 204);
}

#[tokio::test]
async fn undecodable_cache_entry_is_an_error() {
    let cache = FailingCacheStore::default();
    cache.seed("all_groups", Bytes::from_static(b"garbage")).await;
    let service: GroupService = EntityService::new(
        Arc::new(MemoryDocumentStore::<Group>::new()),
        CacheAside::new(cache),
        CachePolicy::never_expire(),
    );

    let response = service.list().await;

    assert!(!response.success);
    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn user_rules() {
    let h = harness::<UserResource>(Arc::new(
        MemoryDocumentStore::<User>::new(),
    ));
    let john = UserCommand {
        username: "john_doe".into(),
        email: "john@gmail.com".into(),
        first_name: "John".into(),
        last_name: "Doe".into(),
        ..Default::default()
    };

    let missing_email = h
        .service
        .create(UserCommand {
            email: String::new(),
            ..john.clone()
        })
        .await;
    assert_eq!(missing_email.status_code, 400);
    assert_eq!(
        missing_email.message,
        "Username and Email cannot be null or empty."
    );

    assert_eq!(h.service.create(john.clone()).await.status_code, 201);

    let duplicate = h
        .service
        .create(UserCommand {
            username: "johnny".into(),
            ..john
        })
        .await;
    assert_eq!(duplicate.status_code, 409);
    assert_eq!(
        duplicate.message,
        "User with Email john@gmail.com already exists."
    );

    let listed = h.service.list().await;
    assert_eq!(listed.message, "Users retrieved successfully.");
}

#[tokio::test]
async fn task_uniqueness_is_title_and_description() {
    let h = harness::<TaskResource>(Arc::new(
        MemoryDocumentStore::<ScheduleTask>::new(),
    ));
    let task = TaskCommand {
        title: "Buy milk".into(),
        description: "Buy 2 liters of milk".into(),
        status: "Pending".into(),
        priority: 1,
        ..Default::default()
    };
    let service: &TaskService = &h.service;

    assert_eq!(service.create(task.clone()).await.status_code, 201);

    let duplicate = service.create(task.clone()).await;
    assert_eq!(duplicate.status_code, 409);
    assert_eq!(
        duplicate.message,
        "Task with title 'Buy milk' and description 'Buy 2 liters of milk' already exists."
    );

    let different = service
        .create(TaskCommand {
            description: "Buy 1 liter of milk".into(),
            ..task
        })
        .await;
    assert_eq!(different.status_code, 201);
}

#[tokio::test]
async fn mutations_do_not_cross_entity_kinds() {
    let cache = CountingCacheStore::new();
    let services = TaskBoardServices::new(
        &Stores::memory(),
        CacheAside::new(cache.clone()),
        CachePolicy::never_expire(),
    );

    let list = services
        .lists
        .create(ListCommand {
            name: "Project A".into(),
            ..Default::default()
        })
        .await
        .data
        .unwrap();
    services.lists.list().await;
    services.lists.get_by_id(list.id.as_str()).await;

    let task = services
        .tasks
        .create(TaskCommand {
            title: "Complete the report".into(),
            list_id: Some(list.id.clone()),
            ..Default::default()
        })
        .await
        .data
        .unwrap();
    services.tasks.delete(task.id.as_str()).await;

    assert!(cache.contains("all_lists").await);
    assert!(cache.contains(&format!("list_{}", list.id)).await);
}

#[tokio::test]
async fn services_share_one_cache_without_key_clashes() {
    let cache = CountingCacheStore::new();
    let services = TaskBoardServices::new(
        &Stores::memory(),
        CacheAside::new(cache.clone()),
        CachePolicy::never_expire(),
    );
    let users: &UserService = &services.users;

    users
        .create(UserCommand {
            username: "jane_doe".into(),
            email: "jane@gmail.com".into(),
            ..Default::default()
        })
        .await;
    services.groups.create(group_cmd("Work")).await;

    assert_eq!(users.list().await.data.unwrap().len(), 1);
    assert_eq!(services.groups.list().await.data.unwrap().len(), 1);
    assert!(services.tasks.list().await.data.unwrap().is_empty());
    for key in ["all_users", "all_groups", "all_tasks"] {
        assert!(cache.contains(key).await, "{key} should be cached");
    }
}

/// Runs create, update and delete against a warm cache and checks which keys
/// each mutation evicts.
async fn assert_mutations_evict<R: Resource>(
    h: Harness<R>, first: R::Command, second: R::Command,
    mut changed: R::Command, name: &str, plural: &str,
) {
    let created = h.service.create(first).await;
    assert_eq!(created.status_code, 201, "{}", created.message);
    let body = serde_json::to_value(created.data.unwrap()).unwrap();
    let id = body["id"].as_str().unwrap().to_string();
    let collection_key = format!("all_{plural}");
    let item_key = format!("{name}_{id}");

    h.service.list().await;
    h.service.get_by_id(&id).await;
    assert!(h.cache.contains(&collection_key).await);
    assert!(h.cache.contains(&item_key).await);
    h.cache.reset_counters();

    let other = h.service.create(second).await;
    assert_eq!(other.status_code, 201, "{}", other.message);
    assert_eq!(h.cache.deleted_keys(), vec![collection_key.clone()]);
    assert!(h.cache.contains(&item_key).await);

    h.service.list().await;
    R::set_command_id(&mut changed, id.clone());
    let updated = h.service.update(changed).await;
    assert_eq!(updated.status_code, 204, "{}", updated.message);
    assert!(!h.cache.contains(&item_key).await);
    assert!(!h.cache.contains(&collection_key).await);

    h.service.list().await;
    h.service.get_by_id(&id).await;
    let deleted = h.service.delete(&id).await;
    assert_eq!(deleted.status_code, 204, "{}", deleted.message);
    assert!(!h.cache.contains(&item_key).await);
    assert!(!h.cache.contains(&collection_key).await);
    assert_eq!(h.service.list().await.data.unwrap().len(), 1);
}

fn list_cmd(name: &str) -> ListCommand {
    ListCommand {
        name: name.into(),
        description: format!("Tasks for {name}"),
        ..Default::default()
    }
}

fn task_cmd(title: &str) -> TaskCommand {
    TaskCommand {
        title: title.into(),
        description: format!("{title} today"),
        status: "Pending".into(),
        priority: 1,
        ..Default::default()
    }
}

fn user_cmd(username: &str) -> UserCommand {
    UserCommand {
        username: username.into(),
        email: format!("{username}@example.com"),
        first_name: "Sam".into(),
        last_name: "Lee".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn list_mutations_evict_their_keys() {
    let h = harness::<ListResource>(Arc::new(MemoryDocumentStore::<List>::new()));
    assert_mutations_evict(
        h,
        list_cmd("Project A"),
        list_cmd("Grocery List"),
        list_cmd("Project B"),
        "list",
        "lists",
    )
    .await;
}

#[tokio::test]
async fn task_mutations_evict_their_keys() {
    let h = harness::<TaskResource>(Arc::new(
        MemoryDocumentStore::<ScheduleTask>::new(),
    ));
    let mut done = task_cmd("Complete the report");
    done.status = "Completed".into();
    assert_mutations_evict(
        h,
        task_cmd("Complete the report"),
        task_cmd("Buy milk"),
        done,
        "task",
        "tasks",
    )
    .await;
}

#[tokio::test]
async fn user_mutations_evict_their_keys() {
    let h = harness::<UserResource>(Arc::new(MemoryDocumentStore::<User>::new()));
    let mut renamed = user_cmd("sam");
    renamed.first_name = "Samuel".into();
    assert_mutations_evict(
        h,
        user_cmd("sam"),
        user_cmd("jane"),
        renamed,
        "user",
        "users",
    )
    .await;
}

#[tokio::test]
async fn duplicate_list_name_is_a_conflict() {
    let h = harness::<ListResource>(Arc::new(MemoryDocumentStore::<List>::new()));
    assert_eq!(h.service.create(list_cmd("Project A")).await.status_code, 201);
    h.cache.reset_counters();

    let again = h.service.create(list_cmd("Project A")).await;

    assert!(!again.success);
    assert_eq!(again.status_code, 409);
    assert_eq!(again.message, "A list with the same name already exists.");
    assert_eq!(again.data, None);
    assert_eq!(h.cache.deletes(), 0);
    assert_eq!(h.service.list().await.data.unwrap().len(), 1);
}
