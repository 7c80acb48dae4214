use crate::{
    auth::{authorize_owner, AuthenticatedUser},
    error::AppError,
    models::{CompletionQuery, Task, TaskInput, TaskReplace},
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str =
    "id, title, description, completion_status, owner_email, created_at, updated_at";

/// Retrieves the authenticated caller's tasks, newest first.
///
/// The query is ownership-scoped at the SQL level; no other user's tasks can
/// appear in the result. No pagination.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks: Vec<Task> = sqlx::query_as(&format!(
        "SELECT {} FROM tasks WHERE owner_email = $1 ORDER BY created_at DESC",
        TASK_COLUMNS
    ))
    .bind(caller.email())
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated caller.
///
/// The owner is always the caller's authenticated identity; the request body
/// carries no owner field and any extra field is ignored. The id is a
/// server-generated UUID and the task starts pending.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If validation fails (e.g., empty title).
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), caller.email());

    let created: Task = sqlx::query_as(&format!(
        "INSERT INTO tasks (id, title, description, completion_status, owner_email, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.completion_status)
    .bind(&task.owner_email)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Sets a task's completion state.
///
/// `completion_status` arrives as a query parameter and defaults to `true`;
/// both directions are always legal. The row is located first (404 when
/// absent), then ownership is checked (403 on mismatch), then the mutation is
/// applied, all inside one transaction.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller does not own the task.
/// - `404 Not Found`: If no task with the given id exists.
#[patch("/{id}")]
pub async fn set_completion_status(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    query: web::Query<CompletionQuery>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let mut tx = pool.begin().await?;

    // Locate, then authorize.
    let owner: Option<(String,)> = sqlx::query_as("SELECT owner_email FROM tasks WHERE id = $1")
        .bind(task_id)
        .fetch_optional(&mut *tx)
        .await?;

    let (owner_email,) = owner.ok_or_else(|| AppError::NotFound("No such task exists".into()))?;
    authorize_owner(&owner_email, caller.email())?;

    let updated: Task = sqlx::query_as(&format!(
        "UPDATE tasks SET completion_status = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(query.completion_status)
    .bind(Utc::now())
    .bind(task_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Replaces all mutable fields of a task atomically.
///
/// The target id travels in the body. Same locate-authorize-mutate sequence
/// as the other mutations; the owner field itself is immutable.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller does not own the task.
/// - `404 Not Found`: If no task with the given id exists.
/// - `422 Unprocessable Entity`: If validation fails (e.g., empty title).
#[put("")]
pub async fn replace_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
    task_data: web::Json<TaskReplace>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let mut tx = pool.begin().await?;

    let owner: Option<(String,)> = sqlx::query_as("SELECT owner_email FROM tasks WHERE id = $1")
        .bind(task_data.id)
        .fetch_optional(&mut *tx)
        .await?;

    let (owner_email,) = owner.ok_or_else(|| AppError::NotFound("No such task exists".into()))?;
    authorize_owner(&owner_email, caller.email())?;

    let updated: Task = sqlx::query_as(&format!(
        "UPDATE tasks
         SET title = $1, description = $2, completion_status = $3, updated_at = $4
         WHERE id = $5
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(task_data.completion_status)
    .bind(Utc::now())
    .bind(task_data.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a task by its id.
///
/// Deletion removes the entity outright; there is no terminal completion
/// state. Same locate-authorize-mutate sequence as the other mutations.
///
/// ## Responses:
/// - `200 OK`: Confirmation message naming the deleted task.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller does not own the task.
/// - `404 Not Found`: If no task with the given id exists.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let mut tx = pool.begin().await?;

    let row: Option<(String, String)> =
        sqlx::query_as("SELECT title, owner_email FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(&mut *tx)
            .await?;

    let (title, owner_email) =
        row.ok_or_else(|| AppError::NotFound("No such task exists".into()))?;
    authorize_owner(&owner_email, caller.email())?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("Task '{}' deleted successfully", title)
    })))
}
