use serde::{Deserialize, Serialize};
use task_models::{EntityId, Group, List, ScheduleTask, User};
use utoipa::ToSchema;

/// Body of a group create or update. `id` comes from the path on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupCommand {
    #[serde(skip)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[schema(value_type = Vec<String>)]
    pub list_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<GroupCommand> for Group {
    fn from(cmd: GroupCommand) -> Self {
        Self {
            name: cmd.name,
            description: cmd.description,
            list_ids: cmd.list_ids,
            created_by: cmd.created_by,
            updated_by: cmd.updated_by,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListCommand {
    #[serde(skip)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[schema(value_type = Option<String>)]
    pub group_id: Option<EntityId>,
    #[schema(value_type = Vec<String>)]
    pub task_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<ListCommand> for List {
    fn from(cmd: ListCommand) -> Self {
        Self {
            name: cmd.name,
            description: cmd.description,
            group_id: cmd.group_id,
            task_ids: cmd.task_ids,
            created_by: cmd.created_by,
            updated_by: cmd.updated_by,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskCommand {
    #[serde(skip)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: i32,
    #[schema(value_type = Option<String>)]
    pub list_id: Option<EntityId>,
    #[schema(value_type = Option<String>)]
    pub group_id: Option<EntityId>,
    #[schema(value_type = Vec<String>)]
    pub assigned_user_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<TaskCommand> for ScheduleTask {
    fn from(cmd: TaskCommand) -> Self {
        Self {
            title: cmd.title,
            description: cmd.description,
            status: cmd.status,
            priority: cmd.priority,
            list_id: cmd.list_id,
            group_id: cmd.group_id,
            assigned_user_ids: cmd.assigned_user_ids,
            created_by: cmd.created_by,
            updated_by: cmd.updated_by,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCommand {
    #[serde(skip)]
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = Vec<String>)]
    pub assigned_task_ids: Vec<EntityId>,
}

impl From<UserCommand> for User {
    fn from(cmd: UserCommand) -> Self {
        Self {
            username: cmd.username,
            email: cmd.email,
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            assigned_task_ids: cmd.assigned_task_ids,
        }
    }
}
