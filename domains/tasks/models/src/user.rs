use database_traits::{Document, EntityId, UniqueFields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub assigned_task_ids: Vec<EntityId>,
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn unique_fields(&self) -> UniqueFields { vec![("email", self.email.clone())] }
}
