use std::fmt;

pub use database_traits::{Document, EntityId, Record, UniqueFields};
use serde::{Deserialize, Serialize};

mod group;
mod list;
mod task;
mod user;

pub use group::Group;
pub use list::List;
pub use task::{ScheduleTask, TaskPriority, TaskStatus};
pub use user::User;

/// The four kinds of entity managed by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Group,
    List,
    Task,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Group,
        EntityKind::List,
        EntityKind::Task,
        EntityKind::User,
    ];

    /// Lowercase singular, e.g. `group`.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Group => "group",
            EntityKind::List => "list",
            EntityKind::Task => "task",
            EntityKind::User => "user",
        }
    }

    /// Lowercase plural, e.g. `groups`.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Group => "groups",
            EntityKind::List => "lists",
            EntityKind::Task => "tasks",
            EntityKind::User => "users",
        }
    }

    /// Capitalised singular used in messages, e.g. `Group`.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Group => "Group",
            EntityKind::List => "List",
            EntityKind::Task => "Task",
            EntityKind::User => "User",
        }
    }

    /// Capitalised plural used in messages, e.g. `Groups`.
    pub fn plural_label(self) -> &'static str {
        match self {
            EntityKind::Group => "Groups",
            EntityKind::List => "Lists",
            EntityKind::Task => "Tasks",
            EntityKind::User => "Users",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
