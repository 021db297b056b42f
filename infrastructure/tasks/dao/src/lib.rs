use std::sync::Arc;

use database_traits::{Document, EntityStore};
use sql_connection::SqlConnect;
use task_models::{Group, List, ScheduleTask, User};

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Collections backing the board, in creation order.
pub const COLLECTIONS: [&str; 4] = [
    User::COLLECTION,
    Group::COLLECTION,
    List::COLLECTION,
    ScheduleTask::COLLECTION,
];

/// One store per entity type.
#[derive(Clone)]
pub struct Stores {
    pub groups: Arc<dyn EntityStore<Group>>,
    pub lists: Arc<dyn EntityStore<List>>,
    pub tasks: Arc<dyn EntityStore<ScheduleTask>>,
    pub users: Arc<dyn EntityStore<User>>,
}

impl Stores {
    pub fn postgres(db: SqlConnect) -> Self {
        Self {
            groups: Arc::new(PgDocumentStore::<Group>::new(db.clone())),
            lists: Arc::new(PgDocumentStore::<List>::new(db.clone())),
            tasks: Arc::new(PgDocumentStore::<ScheduleTask>::new(db.clone())),
            users: Arc::new(PgDocumentStore::<User>::new(db)),
        }
    }

    pub fn memory() -> Self {
        Self {
            groups: Arc::new(MemoryDocumentStore::<Group>::new()),
            lists: Arc::new(MemoryDocumentStore::<List>::new()),
            tasks: Arc::new(MemoryDocumentStore::<ScheduleTask>::new()),
            users: Arc::new(MemoryDocumentStore::<User>::new()),
        }
    }
}
