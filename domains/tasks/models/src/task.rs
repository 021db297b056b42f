use std::fmt;

use database_traits::{Document, EntityId, UniqueFields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleTask {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: i32,
    pub list_id: Option<EntityId>,
    pub group_id: Option<EntityId>,
    pub assigned_user_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Document for ScheduleTask {
    const COLLECTION: &'static str = "schedule_tasks";

    fn unique_fields(&self) -> UniqueFields {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TaskPriority {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl From<TaskPriority> for i32 {
    fn from(priority: TaskPriority) -> Self { priority as i32 }
}

impl TryFrom<i32> for TaskPriority {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskPriority::Low),
            1 => Ok(TaskPriority::Medium),
            2 => Ok(TaskPriority::High),
            other => Err(other),
        }
    }
}

/// Status values used by the board. The stored field is free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
