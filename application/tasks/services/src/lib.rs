use std::{fmt, marker::PhantomData, sync::Arc};

use common_errors::AppError;
use database_traits::{EntityId, EntityStore, IdError};
use redis_connection::{CacheAside, CachePolicy};
use task_cache_keys::mutation_keys;
use task_dao::Stores;
use task_errors::ServiceError;
use task_models::EntityKind;
use task_responses::ServiceResponse;
use tracing::{error, warn};

mod commands;
mod queries;
mod resource;

pub use resource::{
    GroupResource, ListResource, Resource, TaskResource, UserResource,
};

pub type GroupService = EntityService<GroupResource>;
pub type ListService = EntityService<ListResource>;
pub type TaskService = EntityService<TaskResource>;
pub type UserService = EntityService<UserResource>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get_by_id",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn internal_message(self, kind: EntityKind) -> String {
        match self {
            Operation::List => {
                format!("An error occurred while retrieving the {}.", kind.plural())
            }
            Operation::Get => {
                format!("An error occurred while retrieving the {}.", kind.name())
            }
            Operation::Create => {
                format!("An error occurred while creating the {}.", kind.name())
            }
            Operation::Update => {
                format!("An error occurred while updating the {}.", kind.name())
            }
            Operation::Delete => {
                format!("An error occurred while deleting the {}.", kind.name())
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD over one entity type with cache-aside reads.
///
/// Reads go through the cache; writes go to the store and then evict the
/// affected item and collection keys. Every outcome, including failures, is
/// reported through a [`ServiceResponse`].
pub struct EntityService<R: Resource> {
    store: Arc<dyn EntityStore<R::Document>>,
    cache: CacheAside,
    policy: CachePolicy,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for EntityService<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            cache: self.cache.clone(),
            policy: self.policy,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> EntityService<R> {
    pub fn new(
        store: Arc<dyn EntityStore<R::Document>>, cache: CacheAside,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store,
            cache,
            policy,
            _resource: PhantomData,
        }
    }

    /// Evicts the keys a mutation invalidates. Failures are logged; the
    /// store write has already happened.
    async fn evict(&self, operation: Operation, id: Option<&EntityId>) {
        for key in mutation_keys(R::KIND, id) {
            if let Err(e) = self.cache.invalidate(&key).await {
                warn!(
                    operation = operation.as_str(),
                    entity = R::KIND.name(),
                    error = %e,
                    "Cache invalidation failed for key: {}",
                    key
                );
            }
        }
    }

    fn fail<T>(&self, operation: Operation, err: ServiceError) -> ServiceResponse<T> {
        if err.is_internal() {
            error!(
                operation = operation.as_str(),
                entity = R::KIND.name(),
                error = %err,
                "{} {} failed",
                R::KIND.label(),
                operation
            );
            ServiceResponse::from_error(&AppError::internal_server_error(
                &operation.internal_message(R::KIND),
            ))
        }
        else {
            warn!(
                operation = operation.as_str(),
                entity = R::KIND.name(),
                "{}",
                err
            );
            ServiceResponse::from(AppError::from(err))
        }
    }
}

/// Validates a raw id; both messages are user facing.
pub(crate) fn parse_id(kind: EntityKind, raw: &str) -> Result<EntityId, ServiceError> {
    EntityId::parse(raw).map_err(|e| {
        match e {
            IdError::Empty => {
                ServiceError::Validation(format!(
                    "{} ID cannot be null or empty.",
                    kind.label()
                ))
            }
            IdError::Malformed => {
                ServiceError::Validation(format!("Invalid {} ID.", kind.label()))
            }
        }
    })
}

/// The four services sharing one cache.
#[derive(Clone)]
pub struct TaskBoardServices {
    pub groups: GroupService,
    pub lists: ListService,
    pub tasks: TaskService,
    pub users: UserService,
}

impl TaskBoardServices {
    pub fn new(stores: &Stores, cache: CacheAside, policy: CachePolicy) -> Self {
        Self {
            groups: EntityService::new(stores.groups.clone(), cache.clone(), policy),
            lists: EntityService::new(stores.lists.clone(), cache.clone(), policy),
            tasks: EntityService::new(stores.tasks.clone(), cache.clone(), policy),
            users: EntityService::new(stores.users.clone(), cache, policy),
        }
    }
}
