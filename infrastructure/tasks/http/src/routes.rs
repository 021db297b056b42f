/// Generates the documented handlers and routes of one entity.
macro_rules! entity_routes {
    (
        $module:ident,
        $service:ident,
        $resource:ident,
        $command:ident,
        $response:ident,
        $tag:tt,
        $collection:tt,
        $item:tt
    ) => {
        pub mod $module {
            use axum::{
                Json, Router,
                extract::{Path, State, rejection::JsonRejection},
                routing,
            };
            use task_commands::$command;
            use task_responses::{$response, ServiceResponse};
            use task_services::{$resource, $service, Resource};
            use tracing::instrument;

            use crate::rejected;

            pub fn routes(service: $service) -> Router {
                Router::new()
                    .route($collection, routing::get(list).post(create))
                    .route(
                        $item,
                        routing::get(get_by_id).put(update).delete(delete),
                    )
                    .with_state(service)
            }

            #[utoipa::path(
                get,
                path = $collection,
                operation_id = concat!("list_", $tag),
                responses(
                    (status = 200, description = "All active entities", body = ServiceResponse<Vec<$response>>),
                    (status = 500, description = "Internal server error", body = ServiceResponse<Vec<$response>>)
                ),
                tag = $tag
            )]
            #[instrument(skip_all)]
            pub async fn list(
                State(service): State<$service>,
            ) -> ServiceResponse<Vec<$response>> {
                service.list().await
            }

            #[utoipa::path(
                get,
                path = $item,
                operation_id = concat!("get_", $tag),
                params(
                    ("id" = String, Path, description = "24-character hex id")
                ),
                responses(
                    (status = 200, description = "Entity found", body = ServiceResponse<$response>),
                    (status = 400, description = "Malformed id", body = ServiceResponse<$response>),
                    (status = 404, description = "Entity not found", body = ServiceResponse<$response>),
                    (status = 500, description = "Internal server error", body = ServiceResponse<$response>)
                ),
                tag = $tag
            )]
            #[instrument(skip_all)]
            pub async fn get_by_id(
                State(service): State<$service>, Path(id): Path<String>,
            ) -> ServiceResponse<$response> {
                service.get_by_id(&id).await
            }

            #[utoipa::path(
                post,
                path = $collection,
                operation_id = concat!("create_", $tag),
                request_body = $command,
                responses(
                    (status = 201, description = "Entity created", body = ServiceResponse<$response>),
                    (status = 400, description = "Invalid request data", body = ServiceResponse<$response>),
                    (status = 409, description = "Entity already exists", body = ServiceResponse<$response>),
                    (status = 500, description = "Internal server error", body = ServiceResponse<$response>)
                ),
                tag = $tag
            )]
            #[instrument(skip_all)]
            pub async fn create(
                State(service): State<$service>,
                payload: Result<Json<$command>, JsonRejection>,
            ) -> ServiceResponse<$response> {
                match payload {
                    Ok(Json(command)) => service.create(command).await,
                    Err(rejection) => rejected(rejection),
                }
            }

            #[utoipa::path(
                put,
                path = $item,
                operation_id = concat!("update_", $tag),
                request_body = $command,
                params(
                    ("id" = String, Path, description = "24-character hex id")
                ),
                responses(
                    (status = 204, description = "Entity updated"),
                    (status = 304, description = "No changes made"),
                    (status = 400, description = "Invalid id or request data", body = ServiceResponse<$response>),
                    (status = 500, description = "Internal server error", body = ServiceResponse<$response>)
                ),
                tag = $tag
            )]
            #[instrument(skip_all)]
            pub async fn update(
                State(service): State<$service>, Path(id): Path<String>,
                payload: Result<Json<$command>, JsonRejection>,
            ) -> ServiceResponse<()> {
                let Json(mut command) = match payload {
                    Ok(payload) => payload,
                    Err(rejection) => return rejected(rejection),
                };
                <$resource as Resource>::set_command_id(&mut command, id);
                service.update(command).await
            }

            #[utoipa::path(
                delete,
                path = $item,
                operation_id = concat!("delete_", $tag),
                params(
                    ("id" = String, Path, description = "24-character hex id")
                ),
                responses(
                    (status = 204, description = "Entity deleted"),
                    (status = 400, description = "Malformed id", body = ServiceResponse<$response>),
                    (status = 404, description = "Entity not found", body = ServiceResponse<$response>),
                    (status = 500, description = "Internal server error", body = ServiceResponse<$response>)
                ),
                tag = $tag
            )]
            #[instrument(skip_all)]
            pub async fn delete(
                State(service): State<$service>, Path(id): Path<String>,
            ) -> ServiceResponse<()> {
                service.delete(&id).await
            }
        }
    };
}
