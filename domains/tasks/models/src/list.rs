use database_traits::{Document, EntityId, UniqueFields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct List {
    pub name: String,
    pub description: String,
    pub group_id: Option<EntityId>,
    pub task_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Document for List {
    const COLLECTION: &'static str = "lists";

    fn unique_fields(&self) -> UniqueFields { vec![("name", self.name.clone())] }
}
