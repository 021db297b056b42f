use axum::{
    Router,
    extract::rejection::JsonRejection,
};
use common_errors::AppError;
use task_responses::ServiceResponse;
use task_services::TaskBoardServices;
use tracing::warn;

#[macro_use]
mod routes;

/// Envelope for a body that could not be read as the expected JSON.
pub(crate) fn rejected<T>(rejection: JsonRejection) -> ServiceResponse<T> {
    warn!(error = %rejection, "Rejected request body");
    ServiceResponse::from(AppError::bad_request_with_details(
        "INVALID_BODY",
        "Request body is not valid JSON for this resource.",
        &rejection.body_text(),
    ))
}

entity_routes!(
    groups,
    GroupService,
    GroupResource,
    GroupCommand,
    GroupResponse,
    "groups",
    "/api/groups",
    "/api/groups/{id}"
);

entity_routes!(
    lists,
    ListService,
    ListResource,
    ListCommand,
    ListResponse,
    "lists",
    "/api/lists",
    "/api/lists/{id}"
);

entity_routes!(
    tasks,
    TaskService,
    TaskResource,
    TaskCommand,
    TaskResponse,
    "tasks",
    "/api/tasks",
    "/api/tasks/{id}"
);

entity_routes!(
    users,
    UserService,
    UserResource,
    UserCommand,
    UserResponse,
    "users",
    "/api/users",
    "/api/users/{id}"
);

/// All entity routes, each bound to its own service.
pub fn router(services: TaskBoardServices) -> Router {
    Router::new()
        .merge(groups::routes(services.groups))
        .merge(lists::routes(services.lists))
        .merge(tasks::routes(services.tasks))
        .merge(users::routes(services.users))
}
