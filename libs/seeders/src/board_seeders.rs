use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use database_traits::{Document, EntityId, EntityStore, Record};
use redis_connection::CacheAside;
use task_models::{
    EntityKind, Group, List, ScheduleTask, TaskPriority, TaskStatus, User,
};
use tracing::{info, instrument, warn};

use crate::{SEED_AUTHOR, Seeder, evict_collection, is_empty};

async fn insert_all<D: Document>(
    store: &dyn EntityStore<D>, documents: Vec<D>,
) -> Result<usize> {
    let count = documents.len();
    for document in documents {
        store.insert(document).await?;
    }
    Ok(count)
}

fn find_record<D>(
    records: &[Record<D>], matches: impl Fn(&D) -> bool,
) -> Option<Record<D>>
where
    D: Document,
{
    records.iter().find(|r| matches(&r.document)).cloned()
}

pub struct UserSeeder {
    users: Arc<dyn EntityStore<User>>,
    cache: CacheAside,
}

impl UserSeeder {
    pub fn new(users: Arc<dyn EntityStore<User>>, cache: CacheAside) -> Self {
        Self { users, cache }
    }

    fn users() -> Vec<User> {
        vec![
            User {
                username: "john_doe".into(),
                email: "john@gmail.com".into(),
                first_name: "John".into(),
                last_name: "Doe".into(),
                assigned_task_ids: Vec::new(),
            },
            User {
                username: "jane_doe".into(),
                email: "jane@gmail.com".into(),
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                assigned_task_ids: Vec::new(),
            },
        ]
    }
}

#[async_trait]
impl Seeder for UserSeeder {
    #[instrument(skip(self))]
    async fn seed(&self) -> Result<usize> {
        if !is_empty(self.users.as_ref()).await? {
            info!("Users already present, skipping");
            return Ok(0);
        }

        let written = insert_all(self.users.as_ref(), Self::users()).await?;
        evict_collection(&self.cache, EntityKind::User).await;
        Ok(written)
    }

    fn name(&self) -> &'static str { "UserSeeder" }
}

pub struct GroupSeeder {
    groups: Arc<dyn EntityStore<Group>>,
    cache: CacheAside,
}

impl GroupSeeder {
    pub fn new(groups: Arc<dyn EntityStore<Group>>, cache: CacheAside) -> Self {
        Self { groups, cache }
    }

    fn group(name: &str, description: &str) -> Group {
        Group {
            name: name.into(),
            description: description.into(),
            list_ids: Vec::new(),
            created_by: Some(SEED_AUTHOR.into()),
            updated_by: Some(SEED_AUTHOR.into()),
        }
    }
}

#[async_trait]
impl Seeder for GroupSeeder {
    #[instrument(skip(self))]
    async fn seed(&self) -> Result<usize> {
        if !is_empty(self.groups.as_ref()).await? {
            info!("Groups already present, skipping");
            return Ok(0);
        }

        let groups = vec![
            Self::group("Work", "Work-related tasks"),
            Self::group("Personal", "Personal tasks"),
        ];
        let written = insert_all(self.groups.as_ref(), groups).await?;
        evict_collection(&self.cache, EntityKind::Group).await;
        Ok(written)
    }

    fn name(&self) -> &'static str { "GroupSeeder" }
}

pub struct ListSeeder {
    lists: Arc<dyn EntityStore<List>>,
    groups: Arc<dyn EntityStore<Group>>,
    cache: CacheAside,
}

impl ListSeeder {
    pub fn new(
        lists: Arc<dyn EntityStore<List>>, groups: Arc<dyn EntityStore<Group>>,
        cache: CacheAside,
    ) -> Self {
        Self {
            lists,
            groups,
            cache,
        }
    }

    fn list(name: &str, description: &str, group_id: Option<EntityId>) -> List {
        List {
            name: name.into(),
            description: description.into(),
            group_id,
            task_ids: Vec::new(),
            created_by: Some(SEED_AUTHOR.into()),
            updated_by: Some(SEED_AUTHOR.into()),
        }
    }
}

#[async_trait]
impl Seeder for ListSeeder {
    #[instrument(skip(self))]
    async fn seed(&self) -> Result<usize> {
        if !is_empty(self.lists.as_ref()).await? {
            info!("Lists already present, skipping");
            return Ok(0);
        }

        let groups = self.groups.list_active().await?;
        let group_id = |name: &str| {
            let found = find_record(&groups, |g: &Group| g.name == name).map(|r| r.id);
            if found.is_none() {
                warn!("Group '{}' not found, seeding its list unlinked", name);
            }
            found
        };

        let lists = vec![
            Self::list("Project A", "Tasks for Project A", group_id("Work")),
            Self::list("Grocery List", "Items to buy", group_id("Personal")),
        ];
        let written = insert_all(self.lists.as_ref(), lists).await?;
        evict_collection(&self.cache, EntityKind::List).await;
        Ok(written)
    }

    fn name(&self) -> &'static str { "ListSeeder" }
}

pub struct TaskSeeder {
    tasks: Arc<dyn EntityStore<ScheduleTask>>,
    lists: Arc<dyn EntityStore<List>>,
    cache: CacheAside,
}

impl TaskSeeder {
    pub fn new(
        tasks: Arc<dyn EntityStore<ScheduleTask>>,
        lists: Arc<dyn EntityStore<List>>, cache: CacheAside,
    ) -> Self {
        Self {
            tasks,
            lists,
            cache,
        }
    }

    fn task(
        title: &str, description: &str, status: TaskStatus,
        priority: TaskPriority, list: Option<&Record<List>>,
    ) -> ScheduleTask {
        ScheduleTask {
            title: title.into(),
            description: description.into(),
            status: status.as_str().into(),
            priority: priority.into(),
            list_id: list.map(|l| l.id.clone()),
            group_id: list.and_then(|l| l.document.group_id.clone()),
            assigned_user_ids: Vec::new(),
            created_by: Some(SEED_AUTHOR.into()),
            updated_by: Some(SEED_AUTHOR.into()),
        }
    }
}

#[async_trait]
impl Seeder for TaskSeeder {
    #[instrument(skip(self))]
    async fn seed(&self) -> Result<usize> {
        if !is_empty(self.tasks.as_ref()).await? {
            info!("Tasks already present, skipping");
            return Ok(0);
        }

        let lists = self.lists.list_active().await?;
        let project_a = find_record(&lists, |l: &List| l.name == "Project A");
        let groceries = find_record(&lists, |l: &List| l.name == "Grocery List");

        let tasks = vec![
            Self::task(
                "Complete the report",
                "Finish the quarterly report",
                TaskStatus::Pending,
                TaskPriority::High,
                project_a.as_ref(),
            ),
            Self::task(
                "Buy milk",
                "Buy 2 liters of milk",
                TaskStatus::Completed,
                TaskPriority::Medium,
                groceries.as_ref(),
            ),
        ];
        let written = insert_all(self.tasks.as_ref(), tasks).await?;
        evict_collection(&self.cache, EntityKind::Task).await;
        Ok(written)
    }

    fn name(&self) -> &'static str { "TaskSeeder" }
}
