use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use common_errors::AppError;
use serde::{Deserialize, Serialize};
use task_models::{EntityId, Group, List, Record, ScheduleTask, User};
use utoipa::ToSchema;

/// Envelope returned by every service operation.
///
/// `status_code` doubles as the HTTP status of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}

impl<T> ServiceResponse<T> {
    fn with(data: Option<T>, success: bool, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data,
            success,
            status_code: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::with(Some(data), true, StatusCode::OK, message)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with(Some(data), true, StatusCode::CREATED, message)
    }

    pub fn no_content(message: impl Into<String>) -> Self {
        Self::with(None, true, StatusCode::NO_CONTENT, message)
    }

    pub fn not_modified(message: impl Into<String>) -> Self {
        Self::with(None, false, StatusCode::NOT_MODIFIED, message)
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with(None, false, status, message)
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::failure(err.status_code(), err.message())
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T> From<AppError> for ServiceResponse<T> {
    fn from(err: AppError) -> Self { Self::from_error(&err) }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        // 204 and 304 must not carry a body
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
            return status.into_response();
        }
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    #[schema(value_type = String)]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[schema(value_type = Vec<String>)]
    pub list_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Record<Group>> for GroupResponse {
    fn from(record: Record<Group>) -> Self {
        let group = record.document;
        Self {
            id: record.id,
            name: group.name,
            description: group.description,
            list_ids: group.list_ids,
            created_by: group.created_by,
            updated_by: group.updated_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[schema(value_type = String)]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[schema(value_type = Option<String>)]
    pub group_id: Option<EntityId>,
    #[schema(value_type = Vec<String>)]
    pub task_ids: Vec<EntityId>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Record<List>> for ListResponse {
    fn from(record: Record<List>) -> Self {
        let list = record.document;
        Self {
            id: record.id,
            name: list.name,
            description: list.description,
            group_id: list.group_id,
            task_ids: list.task_ids,
            created_by: list.created_by,
            updated_by: list.updated_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[schema(value_type = String)]
    pub id: EntityId,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Record<ScheduleTask>> for TaskResponse {
    fn from(record: Record<ScheduleTask>) -> Self {
        let task = record.document;
        Self {
            id: record.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            list_id: task.list_id,
            group_id: task.group_id,
            assigned_user_ids: task.assigned_user_ids,
            created_by: task.created_by,
            updated_by: task.updated_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(value_type = String)]
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = Vec<String>)]
    pub assigned_task_ids: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Record<User>> for UserResponse {
    fn from(record: Record<User>) -> Self {
        let user = record.document;
        Self {
            id: record.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            assigned_task_ids: user.assigned_task_ids,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
