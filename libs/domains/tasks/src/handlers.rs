use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestJsonResponse, InternalServerErrorResponse, NotFoundResponse,
        UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{CreateTask, Page, PageQuery, Task, TaskStats, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, task_stats, get_task, update_task, patch_task, delete_task),
    components(
        schemas(Task, CreateTask, UpdateTask, Page<Task>, TaskStats),
        responses(
            BadRequestJsonResponse,
            InternalServerErrorResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
        )
    ),
    tags((name = "tasks", description = "Task management"))
)]
pub struct ApiDoc;

/// Routes relative to the mount point, usually `/tasks`
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    Router::new()
        .route("/", get(list_tasks::<R>).post(create_task::<R>))
        .route("/stats", get(task_stats::<R>))
        .route(
            "/{id}",
            get(get_task::<R>)
                .put(update_task::<R>)
                .patch(patch_task::<R>)
                .delete(delete_task::<R>),
        )
        .with_state(Arc::new(service))
}

/// List tasks, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of tasks", body = Page<Task>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(query): Query<PageQuery>,
) -> TaskResult<Json<Page<Task>>> {
    Ok(Json(service.list_tasks(query).await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Total, completed and pending counts
#[utoipa::path(
    get,
    path = "/stats",
    tag = "tasks",
    responses(
        (status = 200, description = "Task statistics", body = TaskStats),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn task_stats<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<TaskStats>> {
    Ok(Json(service.stats().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    UuidPath(id): UuidPath,
) -> TaskResult<Json<Task>> {
    Ok(Json(service.get_task(id).await?))
}

/// Replace the provided fields of a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, response = BadRequestJsonResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    Ok(Json(service.update_task(id, input).await?))
}

/// Same as `PUT`: absent fields are left unchanged
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "tasks",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, response = BadRequestJsonResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn patch_task<R: TaskRepository>(
    state: State<Arc<TaskService<R>>>,
    id: UuidPath,
    input: ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    update_task(state, id, input).await
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    UuidPath(id): UuidPath,
) -> TaskResult<StatusCode> {
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
