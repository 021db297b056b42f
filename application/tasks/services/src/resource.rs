use std::fmt::Debug;

use database_traits::{Document, Record};
use serde::{Serialize, de::DeserializeOwned};
use task_commands::{GroupCommand, ListCommand, TaskCommand, UserCommand};
use task_models::{EntityKind, Group, List, ScheduleTask, User};
use task_responses::{GroupResponse, ListResponse, TaskResponse, UserResponse};

/// What an entity type plugs into [`EntityService`](crate::EntityService).
pub trait Resource: Send + Sync + 'static {
    type Document: Document;
    type Command: DeserializeOwned + Debug + Send + Sync + 'static;
    type Response: Serialize
        + DeserializeOwned
        + From<Record<Self::Document>>
        + Clone
        + Send
        + Sync
        + 'static;

    const KIND: EntityKind;

    /// Id of the entity an update targets.
    fn command_id(command: &Self::Command) -> Option<&str>;

    fn set_command_id(command: &mut Self::Command, id: String);

    /// Required-field check; the error is the user-facing message.
    fn validate(command: &Self::Command) -> Result<(), String>;

    fn into_document(command: Self::Command) -> Self::Document;

    /// Message for a create that collides with an existing record.
    fn conflict_message(document: &Self::Document) -> String;
}

fn blank(value: &str) -> bool { value.trim().is_empty() }

pub struct GroupResource;

impl Resource for GroupResource {
    type Command = GroupCommand;
    type Document = Group;
    type Response = GroupResponse;

    const KIND: EntityKind = EntityKind::Group;

    fn command_id(command: &GroupCommand) -> Option<&str> { command.id.as_deref() }

    fn set_command_id(command: &mut GroupCommand, id: String) { command.id = Some(id) }

    fn validate(command: &GroupCommand) -> Result<(), String> {
        if blank(&command.name) {
            return Err("Group name cannot be null or empty.".into());
        }
        Ok(())
    }

    fn into_document(command: GroupCommand) -> Group { command.into() }

    fn conflict_message(_: &Group) -> String {
        "A group with the same name already exists.".into()
    }
}

pub struct ListResource;

impl Resource for ListResource {
    type Command = ListCommand;
    type Document = List;
    type Response = ListResponse;

    const KIND: EntityKind = EntityKind::List;

    fn command_id(command: &ListCommand) -> Option<&str> { command.id.as_deref() }

    fn set_command_id(command: &mut ListCommand, id: String) { command.id = Some(id) }

    fn validate(command: &ListCommand) -> Result<(), String> {
        if blank(&command.name) {
            return Err("List name cannot be null or empty.".into());
        }
        Ok(())
    }

    fn into_document(command: ListCommand) -> List { command.into() }

    fn conflict_message(_: &List) -> String {
        "A list with the same name already exists.".into()
    }
}

pub struct TaskResource;

impl Resource for TaskResource {
    type Command = TaskCommand;
    type Document = ScheduleTask;
    type Response = TaskResponse;

    const KIND: EntityKind = EntityKind::Task;

    fn command_id(command: &TaskCommand) -> Option<&str> { command.id.as_deref() }

    fn set_command_id(command: &mut TaskCommand, id: String) { command.id = Some(id) }

    fn validate(command: &TaskCommand) -> Result<(), String> {
        if blank(&command.title) {
            return Err("Task title cannot be null or empty.".into());
        }
        Ok(())
    }

    fn into_document(command: TaskCommand) -> ScheduleTask { command.into() }

    fn conflict_message(task: &ScheduleTask) -> String {
        format!(
            "Task with title '{}' and description '{}' already exists.",
            task.title, task.description
        )
    }
}

pub struct UserResource;

impl Resource for UserResource {
    type Command = UserCommand;
    type Document = User;
    type Response = UserResponse;

    const KIND: EntityKind = EntityKind::User;

    fn command_id(command: &UserCommand) -> Option<&str> { command.id.as_deref() }

    fn set_command_id(command: &mut UserCommand, id: String) { command.id = Some(id) }

    fn validate(command: &UserCommand) -> Result<(), String> {
        if blank(&command.username) || blank(&command.email) {
            return Err("Username and Email cannot be null or empty.".into());
        }
        Ok(())
    }

    fn into_document(command: UserCommand) -> User { command.into() }

    fn conflict_message(user: &User) -> String {
        format!("User with Email {} already exists.", user.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_requires_username_and_email() {
        let mut cmd = UserCommand {
            username: "john_doe".into(),
            ..Default::default()
        };
        assert_eq!(
            UserResource::validate(&cmd),
            Err("Username and Email cannot be null or empty.".to_string())
        );
        cmd.email = "john@gmail.com".into();
        assert!(UserResource::validate(&cmd).is_ok());
    }

    #[test]
    fn whitespace_name_is_blank() {
        let cmd = GroupCommand {
            name: "   ".into(),
            ..Default::default()
        };
        assert!(GroupResource::validate(&cmd).is_err());
    }

    #[test]
    fn task_conflict_names_title_and_description() {
        let task = ScheduleTask {
            title: "Buy milk".into(),
            description: "Buy 2 liters of milk".into(),
            ..Default::default()
        };
        assert_eq!(
            TaskResource::conflict_message(&task),
            "Task with title 'Buy milk' and description 'Buy 2 liters of milk' already exists."
        );
    }

    #[test]
    fn command_id_round_trip() {
        let mut cmd = ListCommand::default();
        assert_eq!(ListResource::command_id(&cmd), None);
        ListResource::set_command_id(&mut cmd, "abc".into());
        assert_eq!(ListResource::command_id(&cmd), Some("abc"));
    }
}
