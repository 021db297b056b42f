use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
};
use sql_connection::SqlConnect;
use task_services::TaskBoardServices;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Backends reported by the health check.
#[derive(Clone)]
pub struct Health {
    pub db: Option<SqlConnect>,
    pub cache: &'static str,
}

/// Entity routes, docs, health check, CORS and request tracing.
pub fn build_app(
    services: TaskBoardServices, health: Health, cors_origin: &str,
) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(health_check))
        .with_state(health)
        .merge(task_http::router(services))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        task_http::groups::list,
        task_http::groups::get_by_id,
        task_http::groups::create,
        task_http::groups::update,
        task_http::groups::delete,
        task_http::lists::list,
        task_http::lists::get_by_id,
        task_http::lists::create,
        task_http::lists::update,
        task_http::lists::delete,
        task_http::tasks::list,
        task_http::tasks::get_by_id,
        task_http::tasks::create,
        task_http::tasks::update,
        task_http::tasks::delete,
        task_http::users::list,
        task_http::users::get_by_id,
        task_http::users::create,
        task_http::users::update,
        task_http::users::delete
    ),
    components(
        schemas(
            task_commands::GroupCommand,
            task_commands::ListCommand,
            task_commands::TaskCommand,
            task_commands::UserCommand,
            task_responses::GroupResponse,
            task_responses::ListResponse,
            task_responses::TaskResponse,
            task_responses::UserResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "groups", description = "Group management endpoints"),
        (name = "lists", description = "List management endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "users", description = "User management endpoints")
    ),
    info(
        title = "Task Board API",
        description = "Groups, lists, tasks and users with cached reads",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check with backend status", body = String)
    ),
    tag = "health"
)]
async fn health_check(State(health): State<Health>) -> impl IntoResponse {
    let store = match &health.db {
        Some(db) => {
            let (available, size) = db.get_pool_status();
            format!("Postgres Pool: {available}/{size} available")
        }
        None => "Store: memory".to_string(),
    };

    (StatusCode::OK, format!("OK - {store}, Cache: {}", health.cache))
}
