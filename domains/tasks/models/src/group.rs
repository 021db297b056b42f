use database_traits::{Document, EntityId, UniqueFields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub name: String,
    pub description: String,
    pub list_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Document for Group {
    const COLLECTION: &'static str = "groups";

    fn unique_fields(&self) -> UniqueFields { vec![("name", self.name.clone())] }
}
