use crate::{
    auth::Identity,
    error::AppError,
    models::{CreateTask, Task, TaskStatus, UpdateTask},
    response,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, completed, user_id, created_at, updated_at";

/// Loads a task by id, without any ownership filter.
///
/// Keeping the lookup unfiltered is what lets handlers distinguish a task
/// that does not exist (404) from one owned by someone else (403).
async fn load_task(pool: &PgPool, task_id: i64) -> Result<Task, AppError> {
    sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
        .bind(task_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Lists the caller's tasks, newest first.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    who: Identity,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(who.user_id)
    .fetch_all(&**pool)
    .await?;

    Ok(response::ok("Tasks retrieved successfully", tasks))
}

/// Creates a task owned by the caller.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    who: Identity,
    task_data: web::Json<CreateTask>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, user_id) VALUES ($1, $2) RETURNING {TASK_COLUMNS}"
    ))
    .bind(&task_data.title)
    .bind(who.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(response::created("Task created successfully", task))
}

/// Retrieves one of the caller's tasks by id.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    who: Identity,
) -> Result<impl Responder, AppError> {
    let task = load_task(&pool, task_id.into_inner()).await?;
    task.ensure_owned_by(who.user_id)?;

    Ok(response::ok("Task retrieved successfully", task))
}

/// Updates a task's title and/or completion flag.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    who: Identity,
    task_data: web::Json<UpdateTask>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = load_task(&pool, task_id.into_inner()).await?;
    task.ensure_owned_by(who.user_id)?;

    let title = task_data.title.clone().unwrap_or(task.title);
    let completed = task_data.completed.unwrap_or(task.completed);

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $1, completed = $2, updated_at = NOW() \
         WHERE id = $3 RETURNING {TASK_COLUMNS}"
    ))
    .bind(title)
    .bind(completed)
    .bind(task.id)
    .fetch_one(&**pool)
    .await?;

    Ok(response::ok("Task updated successfully", updated))
}

/// Sets a task's completion status.
#[patch("/{id}/status")]
pub async fn set_task_status(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    who: Identity,
    status: web::Json<TaskStatus>,
) -> Result<impl Responder, AppError> {
    let task = load_task(&pool, task_id.into_inner()).await?;
    task.ensure_owned_by(who.user_id)?;

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET completed = $1, updated_at = NOW() \
         WHERE id = $2 RETURNING {TASK_COLUMNS}"
    ))
    .bind(status.completed)
    .bind(task.id)
    .fetch_one(&**pool)
    .await?;

    Ok(response::ok("Task status updated successfully", updated))
}

/// Deletes one of the caller's tasks.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    who: Identity,
) -> Result<impl Responder, AppError> {
    let task = load_task(&pool, task_id.into_inner()).await?;
    task.ensure_owned_by(who.user_id)?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task.id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
